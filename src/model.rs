use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::source::ImageRef;
use crate::foundation::error::{PairsheetError, PairsheetResult};

/// One before/after pair of image references destined for one gallery row.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ImagePair {
    /// Stable caller-assigned identity used for list operations; the engine
    /// itself never consumes it.
    pub id: String,
    /// Reference to the "before" image, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<ImageRef>,
    /// Reference to the "after" image, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<ImageRef>,
}

impl ImagePair {
    /// A pair is mergeable only when both references are present and
    /// non-empty.
    pub fn is_complete(&self) -> bool {
        fn populated(side: &Option<ImageRef>) -> bool {
            side.as_deref().is_some_and(|s| !s.is_empty())
        }
        populated(&self.before) && populated(&self.after)
    }
}

/// Immutable per-merge layout settings.
///
/// Field names on the wire keep the shape of the settings payload this tool
/// has always accepted (`imageWidth`/`imageHeight`/`maintainAspectRatio`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Label drawn above the left (before) column of row 0.
    #[serde(default = "default_before_label")]
    pub before_label: String,
    /// Label drawn above the right (after) column of row 0.
    #[serde(default = "default_after_label")]
    pub after_label: String,
    /// Width in pixels of every image cell. Must be > 0.
    #[serde(default = "default_cell_width", rename = "imageWidth")]
    pub cell_width: u32,
    /// Height in pixels of every image cell. Must be > 0.
    #[serde(default = "default_cell_height", rename = "imageHeight")]
    pub cell_height: u32,
    /// Cover-with-crop placement when true, stretch-to-fit when false.
    #[serde(default = "default_preserve_aspect_ratio", rename = "maintainAspectRatio")]
    pub preserve_aspect_ratio: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            before_label: default_before_label(),
            after_label: default_after_label(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            preserve_aspect_ratio: default_preserve_aspect_ratio(),
        }
    }
}

/// One merge job: the pairs to compose plus the layout settings.
///
/// This is the JSON-facing representation accepted by the CLI. Both fields
/// tolerate omission so a job file can be as small as `{}` (which then fails
/// the merge for having no pairs, not for being malformed).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MergeJob {
    /// Image pairs, in gallery order.
    #[serde(default)]
    pub pairs: Vec<ImagePair>,
    /// Layout settings; missing fields take their defaults.
    #[serde(default)]
    pub settings: LayoutConfig,
}

impl MergeJob {
    /// Parse a merge job from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PairsheetResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PairsheetError::validation(format!("parse merge job JSON: {e}")))
    }

    /// Parse a merge job from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PairsheetResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PairsheetError::validation(format!("open merge job JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

fn default_before_label() -> String {
    "Before".to_string()
}

fn default_after_label() -> String {
    "After".to_string()
}

fn default_cell_width() -> u32 {
    400
}

fn default_cell_height() -> u32 {
    280
}

fn default_preserve_aspect_ratio() -> bool {
    true
}
