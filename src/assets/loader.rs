use rayon::prelude::*;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::assets::source::{describe_ref, resolve_ref};
use crate::foundation::error::{PairsheetError, PairsheetResult};

/// Borrowed references for one mergeable pair (both sides present).
#[derive(Clone, Copy, Debug)]
pub struct ValidPair<'a> {
    /// Reference to the "before" image.
    pub before: &'a str,
    /// Reference to the "after" image.
    pub after: &'a str,
}

/// Both images of one pair, decoded.
#[derive(Clone, Debug)]
pub struct LoadedPair {
    pub before: DecodedImage,
    pub after: DecodedImage,
}

/// Resolve and decode every pair concurrently, preserving input order.
///
/// All-or-nothing: the first failing reference fails the whole call and no
/// partial results are returned.
#[tracing::instrument(skip(pairs), fields(count = pairs.len()))]
pub fn load_pairs(pairs: &[ValidPair<'_>]) -> PairsheetResult<Vec<LoadedPair>> {
    let loaded = pairs
        .par_iter()
        .map(|pair| -> PairsheetResult<LoadedPair> {
            Ok(LoadedPair {
                before: load_ref(pair.before)?,
                after: load_ref(pair.after)?,
            })
        })
        .collect::<Vec<_>>();

    let mut out = Vec::with_capacity(loaded.len());
    for item in loaded {
        out.push(item?);
    }
    Ok(out)
}

fn load_ref(source: &str) -> PairsheetResult<DecodedImage> {
    let bytes = resolve_ref(source)?;
    decode_image(&bytes).map_err(|e| match e {
        PairsheetError::Decode(msg) => {
            PairsheetError::Decode(format!("{}: {msg}", describe_ref(source)))
        }
        other => other,
    })
}
