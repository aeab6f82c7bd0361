use crate::foundation::error::{PairsheetError, PairsheetResult};
use crate::foundation::geom::{CanvasSize, PixelRect, Rgba8Premul};

/// Owned premultiplied-RGBA8 canvas the whole sheet is composited onto.
#[derive(Clone, Debug)]
pub(crate) struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub(crate) fn new(size: CanvasSize, fill: Rgba8Premul) -> Self {
        let mut data = vec![0u8; size.byte_len()];
        let bytes = [fill.r, fill.g, fill.b, fill.a];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        Self {
            width: size.width,
            height: size.height,
            data,
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Solid fill of `rect`, clipped to the surface.
    pub(crate) fn fill_rect(&mut self, rect: PixelRect, color: Rgba8Premul) {
        let x0 = rect.x.min(self.width) as usize;
        let x1 = rect.right().min(u64::from(self.width)) as usize;
        let y0 = rect.y.min(self.height) as usize;
        let y1 = rect.bottom().min(u64::from(self.height)) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let bytes = [color.r, color.g, color.b, color.a];
        let w = self.width as usize;
        for y in y0..y1 {
            let row = &mut self.data[(y * w + x0) * 4..(y * w + x1) * 4];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&bytes);
            }
        }
    }

    /// Source-over composite of a premultiplied RGBA8 block at
    /// `(dst_x, dst_y)`, clipped to the surface.
    pub(crate) fn over_blit(
        &mut self,
        dst_x: u32,
        dst_y: u32,
        src: &[u8],
        src_w: u32,
        src_h: u32,
    ) -> PairsheetResult<()> {
        let expected = (src_w as usize)
            .saturating_mul(src_h as usize)
            .saturating_mul(4);
        if src.len() != expected {
            return Err(PairsheetError::render(
                "over_blit source byte length does not match its dimensions",
            ));
        }

        let copy_w = src_w.min(self.width.saturating_sub(dst_x)) as usize;
        let copy_h = src_h.min(self.height.saturating_sub(dst_y)) as usize;
        let dst_w = self.width as usize;
        for row in 0..copy_h {
            let src_off = row * src_w as usize * 4;
            let dst_off = ((dst_y as usize + row) * dst_w + dst_x as usize) * 4;
            let src_row = &src[src_off..src_off + copy_w * 4];
            let dst_row = &mut self.data[dst_off..dst_off + copy_w * 4];
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
        Ok(())
    }
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Porter-Duff source-over for premultiplied pixels.
pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u16;
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

/// Fetch one RGBA8 pixel; out-of-bounds reads are transparent black.
pub(crate) fn sample_px(src: &[u8], width: u32, height: u32, x: i32, y: i32) -> [u8; 4] {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return [0, 0, 0, 0];
    }
    let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
    [src[idx], src[idx + 1], src[idx + 2], src[idx + 3]]
}

/// Convert premultiplied RGBA8 back to straight alpha for encoding.
pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
