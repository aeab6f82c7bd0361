use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{PairsheetError, PairsheetResult};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Font face used for label text.
///
/// The same bytes back both Parley shaping and vello_cpu glyph
/// rasterization, so the face travels as raw bytes rather than a handle
/// into some platform font registry.
#[derive(Clone, Debug)]
pub struct LabelFont {
    bytes: Arc<Vec<u8>>,
}

impl LabelFont {
    /// Wrap already-loaded font bytes (TTF/OTF).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
        }
    }

    /// Read a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> PairsheetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PairsheetError::validation(format!("read font file '{}': {e}", path.display()))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out plain text using provided font bytes and styling.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        weight: parley::style::FontWeight,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> PairsheetResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PairsheetError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PairsheetError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PairsheetError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}

/// Tight extents of a laid-out run: widest line advance by summed line
/// heights.
pub(crate) fn layout_extents(layout: &parley::Layout<TextBrushRgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        let mut engine = TextLayoutEngine::new();
        let err = engine
            .layout_plain(
                "x",
                &[],
                0.0,
                parley::style::FontWeight::BOLD,
                TextBrushRgba8::default(),
                None,
            )
            .err()
            .unwrap();
        assert!(err.to_string().contains("size_px"));
    }

    #[test]
    fn junk_font_bytes_register_no_family() {
        let mut engine = TextLayoutEngine::new();
        let err = engine
            .layout_plain(
                "x",
                b"not a font",
                24.0,
                parley::style::FontWeight::BOLD,
                TextBrushRgba8::default(),
                None,
            )
            .err()
            .unwrap();
        assert!(err.to_string().contains("no font families"));
    }
}
