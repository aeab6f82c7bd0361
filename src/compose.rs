use std::io::Cursor;

use crate::assets::loader::{ValidPair, load_pairs};
use crate::assets::text::{LabelFont, TextLayoutEngine};
use crate::foundation::error::{PairsheetError, PairsheetResult};
use crate::foundation::geom::{CanvasSize, Rgba8Premul};
use crate::layout::plan::plan;
use crate::model::{ImagePair, LayoutConfig};
use crate::render::cell::draw_cell;
use crate::render::labels::draw_label_bar;
use crate::render::surface::{Surface, unpremultiply_in_place};

/// A finished gallery: PNG bytes plus the canvas dimensions they encode.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    /// Encoded PNG file contents.
    pub png: Vec<u8>,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Builds before/after gallery sheets.
///
/// One `Compositor` can merge any number of jobs; it holds the text
/// shaping contexts and the optional label font across calls. Without a
/// font the label bars render with no caption.
pub struct Compositor {
    text_engine: TextLayoutEngine,
    font: Option<LabelFont>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// A compositor with no label font.
    pub fn new() -> Self {
        Self {
            text_engine: TextLayoutEngine::new(),
            font: None,
        }
    }

    /// A compositor that captions the label bars with `font`.
    pub fn with_font(font: LabelFont) -> Self {
        Self {
            text_engine: TextLayoutEngine::new(),
            font: Some(font),
        }
    }

    /// Merge image pairs into one gallery PNG.
    ///
    /// Pairs missing either side are dropped up front; if none survive the
    /// whole merge fails rather than emitting an empty sheet. Every kept
    /// reference must decode, and a single failure aborts the run with no
    /// partial output.
    #[tracing::instrument(skip(self, pairs, config), fields(pairs = pairs.len()))]
    pub fn merge(
        &mut self,
        pairs: &[ImagePair],
        config: &LayoutConfig,
    ) -> PairsheetResult<CompositeResult> {
        let valid = complete_pairs(pairs);
        if valid.is_empty() {
            return Err(PairsheetError::EmptyInput);
        }

        let loaded = load_pairs(&valid)?;
        let plan = plan(loaded.len(), config)?;

        let size = CanvasSize::new(plan.canvas_width, plan.canvas_height)?;
        let mut surface = Surface::new(size, Rgba8Premul::opaque(255, 255, 255));

        for row in &plan.rows {
            let Some((before_bar, after_bar)) = row.label_bars else {
                continue;
            };
            draw_label_bar(
                &mut surface,
                &mut self.text_engine,
                self.font.as_ref(),
                before_bar,
                &config.before_label,
            )?;
            draw_label_bar(
                &mut surface,
                &mut self.text_engine,
                self.font.as_ref(),
                after_bar,
                &config.after_label,
            )?;
        }

        for (row, pair) in plan.rows.iter().zip(&loaded) {
            draw_cell(&mut surface, &pair.before, row.before, config.preserve_aspect_ratio)?;
            draw_cell(&mut surface, &pair.after, row.after, config.preserve_aspect_ratio)?;
        }

        let width = surface.width();
        let height = surface.height();
        let mut rgba = surface.into_data();
        unpremultiply_in_place(&mut rgba);
        let png = encode_png(rgba, width, height)?;

        Ok(CompositeResult { png, width, height })
    }
}

/// The pairs that carry both references, in input order.
fn complete_pairs(pairs: &[ImagePair]) -> Vec<ValidPair<'_>> {
    pairs
        .iter()
        .filter(|p| p.is_complete())
        .filter_map(|p| match (p.before.as_deref(), p.after.as_deref()) {
            (Some(before), Some(after)) => Some(ValidPair { before, after }),
            _ => None,
        })
        .collect()
}

fn encode_png(rgba: Vec<u8>, width: u32, height: u32) -> PairsheetResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        PairsheetError::encode("canvas byte length does not match its dimensions")
    })?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PairsheetError::encode(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: &str, before: Option<&str>, after: Option<&str>) -> ImagePair {
        ImagePair {
            id: id.to_string(),
            before: before.map(str::to_string),
            after: after.map(str::to_string),
        }
    }

    #[test]
    fn no_pairs_is_an_empty_input_error() {
        let mut compositor = Compositor::new();
        let err = compositor
            .merge(&[], &LayoutConfig::default())
            .unwrap_err();
        assert!(matches!(err, PairsheetError::EmptyInput));
    }

    #[test]
    fn only_incomplete_pairs_is_an_empty_input_error() {
        let mut compositor = Compositor::new();
        let pairs = vec![
            pair("missing-after", Some("a.png"), None),
            pair("missing-before", None, Some("b.png")),
            pair("blank-side", Some(""), Some("b.png")),
        ];
        let err = compositor
            .merge(&pairs, &LayoutConfig::default())
            .unwrap_err();
        assert!(matches!(err, PairsheetError::EmptyInput));
    }

    #[test]
    fn complete_pairs_keeps_input_order() {
        let pairs = vec![
            pair("first", Some("1b.png"), Some("1a.png")),
            pair("skipped", None, Some("2a.png")),
            pair("second", Some("3b.png"), Some("3a.png")),
        ];
        let valid = complete_pairs(&pairs);
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].before, "1b.png");
        assert_eq!(valid[1].before, "3b.png");
    }

    #[test]
    fn encode_png_rejects_mismatched_buffers() {
        let err = encode_png(vec![0u8; 5], 2, 2).unwrap_err();
        assert!(err.to_string().contains("encode error:"));
    }

    #[test]
    fn undecodable_reference_aborts_the_merge() {
        let mut compositor = Compositor::new();
        let pairs = vec![pair(
            "junk",
            Some("data:image/png;base64,AAAA"),
            Some("data:image/png;base64,AAAA"),
        )];
        let err = compositor
            .merge(&pairs, &LayoutConfig::default())
            .unwrap_err();
        assert!(matches!(err, PairsheetError::Decode(_)));
    }
}
