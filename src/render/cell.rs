use crate::assets::decode::DecodedImage;
use crate::foundation::error::{PairsheetError, PairsheetResult};
use crate::foundation::geom::{PixelRect, Rect};
use crate::render::surface::{Surface, premul_over_px, sample_px};

/// Draw one decoded image into `target` on the shared canvas.
///
/// Stretch mode scales each axis independently to exactly fill the
/// rectangle. Cover mode scales uniformly until both axes are covered and
/// centers the overflowing axis; the overflow never lands on the canvas
/// because only pixels inside `target` are visited. Nearest-neighbor
/// inverse mapping at pixel centers, source-over compositing.
pub(crate) fn draw_cell(
    surface: &mut Surface,
    image: &DecodedImage,
    target: PixelRect,
    preserve_aspect_ratio: bool,
) -> PairsheetResult<()> {
    let expected = (image.width as usize)
        .saturating_mul(image.height as usize)
        .saturating_mul(4);
    if image.rgba8_premul.len() != expected {
        return Err(PairsheetError::render(
            "cell image byte length does not match its dimensions",
        ));
    }
    if target.is_empty() || image.width == 0 || image.height == 0 {
        return Ok(());
    }

    let draw = placement(image, target, preserve_aspect_ratio);

    let x0 = target.x.min(surface.width());
    let x1 = target.right().min(u64::from(surface.width())) as u32;
    let y0 = target.y.min(surface.height());
    let y1 = target.bottom().min(u64::from(surface.height())) as u32;

    let sx_scale = f64::from(image.width) / draw.width();
    let sy_scale = f64::from(image.height) / draw.height();
    let src = image.rgba8_premul.as_slice();
    let surf_w = surface.width() as usize;
    let data = surface.data_mut();

    for y in y0..y1 {
        let sy = ((f64::from(y) + 0.5) - draw.y0) * sy_scale - 0.5;
        for x in x0..x1 {
            let sx = ((f64::from(x) + 0.5) - draw.x0) * sx_scale - 0.5;
            let px = sample_px(
                src,
                image.width,
                image.height,
                sx.round() as i32,
                sy.round() as i32,
            );

            let idx = ((y as usize) * surf_w + (x as usize)) * 4;
            let d = &mut data[idx..idx + 4];
            let out = premul_over_px([d[0], d[1], d[2], d[3]], px);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Where the scaled image lands in canvas space. In cover mode this rect
/// can exceed `target` on exactly one axis; the caller clips by iteration.
fn placement(image: &DecodedImage, target: PixelRect, preserve_aspect_ratio: bool) -> Rect {
    let t = target.to_rect();
    if !preserve_aspect_ratio {
        return t;
    }

    let image_aspect = image.aspect();
    let container_aspect = target.aspect();
    if image_aspect > container_aspect {
        // Wider than the cell: match height, center the horizontal overflow.
        let draw_w = t.height() * image_aspect;
        let x0 = t.x0 - (draw_w - t.width()) / 2.0;
        Rect::new(x0, t.y0, x0 + draw_w, t.y1)
    } else {
        // Match width, center the vertical overflow. Equal ratios take this
        // branch and produce no overflow.
        let draw_h = t.width() / image_aspect;
        let y0 = t.y0 - (draw_h - t.height()) / 2.0;
        Rect::new(t.x0, y0, t.x1, y0 + draw_h)
    }
}
