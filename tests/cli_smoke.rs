use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose};
use pairsheet::{ImagePair, LayoutConfig, MergeJob};

fn solid_uri(width: u32, height: u32, color: [u8; 4]) -> String {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        rgba.extend_from_slice(&color);
    }
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(&buf)
    )
}

fn bin_exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_pairsheet")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "pairsheet.exe"
            } else {
                "pairsheet"
            });
            p
        })
}

#[test]
fn cli_merge_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let job_path = dir.join("job.json");
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let job = MergeJob {
        pairs: vec![ImagePair {
            id: "p0".to_string(),
            before: Some(solid_uri(40, 28, [255, 0, 0, 255])),
            after: Some(solid_uri(40, 28, [0, 255, 0, 255])),
        }],
        settings: LayoutConfig::default(),
    };

    let f = std::fs::File::create(&job_path).unwrap();
    serde_json::to_writer_pretty(f, &job).unwrap();

    let job_arg = job_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(bin_exe())
        .args(["merge", "--job", job_arg.as_str(), "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let png = std::fs::read(&out_path).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (860, 390));
}

#[test]
fn cli_merge_fails_on_an_empty_job() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let job_path = dir.join("empty_job.json");
    std::fs::write(&job_path, "{}").unwrap();
    let out_path = dir.join("should_not_exist.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_exe())
        .args([
            "merge",
            "--job",
            job_path.to_string_lossy().as_ref(),
            "--out",
            out_path.to_string_lossy().as_ref(),
        ])
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}
