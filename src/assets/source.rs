use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::foundation::error::{PairsheetError, PairsheetResult};

/// Opaque image reference: either a `data:image/...;base64,` URI or a
/// filesystem path.
pub type ImageRef = String;

/// Resolve an image reference to its encoded bytes.
///
/// Data URIs are decoded in memory; anything else is read from disk. Both
/// failure modes surface as [`PairsheetError::Decode`] since the caller
/// cannot distinguish an unreadable reference from an undecodable one.
pub fn resolve_ref(source: &str) -> PairsheetResult<Vec<u8>> {
    let trimmed = source.trim();
    if trimmed.starts_with("data:image/") {
        let base64_start = trimmed.find(";base64,").ok_or_else(|| {
            PairsheetError::decode("data URI is missing a base64 marker")
        })?;
        let base64_data = &trimmed[base64_start + 8..];
        return general_purpose::STANDARD
            .decode(base64_data)
            .map_err(|e| PairsheetError::decode(format!("decode base64 payload: {e}")));
    }

    let path = Path::new(trimmed);
    std::fs::read(path)
        .map_err(|e| PairsheetError::decode(format!("read image file '{}': {e}", path.display())))
}

/// Short human-readable form of a reference for error messages. Data URIs
/// are elided so a multi-megabyte payload never lands in a message.
pub(crate) fn describe_ref(source: &str) -> String {
    let trimmed = source.trim();
    if trimmed.starts_with("data:image/") {
        "data URI".to_string()
    } else {
        format!("file '{trimmed}'")
    }
}
