use crate::assets::text::{LabelFont, TextBrushRgba8, TextLayoutEngine, layout_extents};
use crate::foundation::error::{PairsheetError, PairsheetResult};
use crate::foundation::geom::{PixelRect, Rgba8Premul};
use crate::render::surface::Surface;

/// Fill behind the label text.
pub(crate) const BAR_FILL: Rgba8Premul = Rgba8Premul {
    r: 245,
    g: 245,
    b: 245,
    a: 255,
};

const TEXT_BRUSH: TextBrushRgba8 = TextBrushRgba8 {
    r: 51,
    g: 51,
    b: 51,
    a: 255,
};

const TEXT_SIZE_PX: f32 = 24.0;

/// Paint one label bar and center its caption in it.
///
/// The bar fill always lands. Text needs an explicit font face; without
/// one the bar stays blank. Glyphs are rasterized into a transparent
/// bar-sized pixmap and composited, so ink never escapes the bar.
pub(crate) fn draw_label_bar(
    surface: &mut Surface,
    text_engine: &mut TextLayoutEngine,
    font: Option<&LabelFont>,
    bar: PixelRect,
    text: &str,
) -> PairsheetResult<()> {
    surface.fill_rect(bar, BAR_FILL);

    let Some(font) = font else {
        return Ok(());
    };
    if bar.is_empty() || text.is_empty() {
        return Ok(());
    }

    let layout = text_engine.layout_plain(
        text,
        font.bytes(),
        TEXT_SIZE_PX,
        parley::style::FontWeight::BOLD,
        TEXT_BRUSH,
        None,
    )?;
    let (text_w, text_h) = layout_extents(&layout);

    let bar_w = u16::try_from(bar.width)
        .map_err(|_| PairsheetError::render("label bar width exceeds the rasterizer range"))?;
    let bar_h = u16::try_from(bar.height)
        .map_err(|_| PairsheetError::render("label bar height exceeds the rasterizer range"))?;

    let mut ctx = vello_cpu::RenderContext::new(bar_w, bar_h);
    let tx = (f64::from(bar.width) - text_w) * 0.5;
    let ty = (f64::from(bar.height) - text_h) * 0.5;
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((tx, ty)));

    let font_data =
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font.bytes().to_vec()), 0);
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font_data)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(bar_w, bar_h);
    ctx.render_to_pixmap(&mut pixmap);
    surface.over_blit(bar.x, bar.y, pixmap.data_as_u8_slice(), bar.width, bar.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::geom::CanvasSize;
    use crate::render::surface::sample_px;

    const BAR_PX: [u8; 4] = [245, 245, 245, 255];

    fn system_font_bytes() -> Option<Vec<u8>> {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ];
        CANDIDATES.iter().find_map(|p| std::fs::read(p).ok())
    }

    #[test]
    fn bar_is_filled_even_without_a_font() {
        let mut surface = Surface::new(
            CanvasSize::new(8, 6).unwrap(),
            Rgba8Premul::opaque(255, 255, 255),
        );
        let mut engine = TextLayoutEngine::new();
        let bar = PixelRect::new(1, 1, 6, 3);
        draw_label_bar(&mut surface, &mut engine, None, bar, "Before").unwrap();

        for y in 0..6u32 {
            for x in 0..8u32 {
                let inside = x >= 1 && x < 7 && y >= 1 && y < 4;
                let px = sample_px(surface.data(), 8, 6, x as i32, y as i32);
                if inside {
                    assert_eq!(px, BAR_PX);
                } else {
                    assert_eq!(px, [255, 255, 255, 255]);
                }
            }
        }
    }

    #[test]
    fn empty_caption_leaves_a_plain_bar() {
        let Some(bytes) = system_font_bytes() else {
            return;
        };
        let font = LabelFont::from_bytes(bytes);
        let mut surface = Surface::new(
            CanvasSize::new(8, 6).unwrap(),
            Rgba8Premul::opaque(255, 255, 255),
        );
        let mut engine = TextLayoutEngine::new();
        let bar = PixelRect::new(0, 0, 8, 4);
        draw_label_bar(&mut surface, &mut engine, Some(&font), bar, "").unwrap();

        for y in 0..4u32 {
            for x in 0..8u32 {
                assert_eq!(sample_px(surface.data(), 8, 6, x as i32, y as i32), BAR_PX);
            }
        }
    }

    #[test]
    fn caption_ink_stays_inside_the_bar() {
        let Some(bytes) = system_font_bytes() else {
            return;
        };
        let font = LabelFont::from_bytes(bytes);
        let mut surface = Surface::new(
            CanvasSize::new(120, 60).unwrap(),
            Rgba8Premul::opaque(255, 255, 255),
        );
        let mut engine = TextLayoutEngine::new();
        let bar = PixelRect::new(10, 10, 100, 40);
        draw_label_bar(&mut surface, &mut engine, Some(&font), bar, "Before").unwrap();

        let mut ink = 0usize;
        for y in 0..60u32 {
            for x in 0..120u32 {
                let inside = x >= 10 && x < 110 && y >= 10 && y < 50;
                let px = sample_px(surface.data(), 120, 60, x as i32, y as i32);
                if inside {
                    if px != BAR_PX {
                        ink += 1;
                    }
                } else {
                    assert_eq!(
                        px,
                        [255, 255, 255, 255],
                        "ink escaped the bar at ({x},{y})"
                    );
                }
            }
        }
        assert!(ink > 0, "caption should leave ink inside the bar");
    }
}
