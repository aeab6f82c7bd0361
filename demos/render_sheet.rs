//! Minimal end-to-end demo: build a two-pair job in code, merge it, and
//! write the sheet next to the working directory.
//!
//! Run with `cargo run --example render_sheet`.

use base64::{Engine as _, engine::general_purpose};
use pairsheet::{Compositor, ImagePair, LayoutConfig};

fn checker_uri(width: u32, height: u32, a: [u8; 4], b: [u8; 4]) -> String {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let cell = ((x / 4) + (y / 4)) % 2 == 0;
            rgba.extend_from_slice(if cell { &a } else { &b });
        }
    }
    let img = image::RgbaImage::from_raw(width, height, rgba).expect("buffer matches dimensions");
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("png encode");
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(&buf)
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let pairs = vec![
        ImagePair {
            id: "checker".to_string(),
            before: Some(checker_uri(40, 28, [200, 40, 40, 255], [255, 255, 255, 255])),
            after: Some(checker_uri(40, 28, [40, 160, 40, 255], [255, 255, 255, 255])),
        },
        ImagePair {
            id: "wide".to_string(),
            before: Some(checker_uri(64, 16, [40, 40, 200, 255], [230, 230, 230, 255])),
            after: Some(checker_uri(64, 16, [200, 160, 40, 255], [230, 230, 230, 255])),
        },
    ];

    let mut compositor = match std::env::args().nth(1) {
        Some(font_path) => {
            pairsheet::Compositor::with_font(pairsheet::LabelFont::from_file(font_path)?)
        }
        None => Compositor::new(),
    };
    let sheet = compositor.merge(&pairs, &LayoutConfig::default())?;

    let out = "demo_sheet.png";
    std::fs::write(out, &sheet.png)?;
    eprintln!("wrote {} ({}x{})", out, sheet.width, sheet.height);
    Ok(())
}
