use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pngcodec::{decode, encode, ColorType};
use tempfile::TempDir;

fn iconforge(args: &[&str], files: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iconforge"))
        .env("RUST_LOG", "off")
        .args(args)
        .args(files)
        .output()
        .expect("failed to run iconforge")
}

fn write_rgba(dir: &Path, name: &str, width: u32, height: u32, pixels: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, encode(width, height, ColorType::Rgba, pixels).unwrap()).unwrap();
    path
}

#[test]
fn opaque_image_reports_no_transparency() {
    let root = TempDir::new().unwrap();
    let path = write_rgba(root.path(), "opaque.png", 2, 2, &[255; 16]);

    let output = iconforge(&["check"], &[&path]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("no transparent pixels found"), "{text}");
}

#[test]
fn transparent_pixel_is_found_and_serialised() {
    let root = TempDir::new().unwrap();
    let mut pixels = vec![255; 3 * 3 * 4];
    pixels[4 * 4 + 3] = 0; // pixel (1, 1)
    let path = write_rgba(root.path(), "hole.png", 3, 3, &pixels);

    let output = iconforge(&["check", "--full", "--json"], &[&path]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["finding"], "transparent");
    assert_eq!(report["x"], 1);
    assert_eq!(report["y"], 1);
    assert_eq!(report["alpha"], 0);
}

#[test]
fn sample_grid_can_miss_transparency() {
    let root = TempDir::new().unwrap();
    let mut pixels = vec![255; 3 * 3 * 4];
    pixels[4 * 4 + 3] = 0;
    let path = write_rgba(root.path(), "hole.png", 3, 3, &pixels);

    let output = iconforge(&["check", "--row-step", "2", "--columns", "3"], &[&path]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("no transparent pixels found"), "{text}");
}

#[test]
fn malformed_file_is_reported_without_failing() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("broken.png");
    fs::write(&path, b"definitely not a png").unwrap();

    let output = iconforge(&["check"], &[&path]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Error checking"));
}

#[test]
fn mask_keeps_only_bright_pixels() {
    let root = TempDir::new().unwrap();
    let input = write_rgba(
        root.path(),
        "art.png",
        2,
        1,
        &[250, 250, 250, 255, 93, 64, 55, 255],
    );
    let output_path = root.path().join("masked.png");

    let output = iconforge(&["mask"], &[&input, &output_path]);
    assert!(output.status.success(), "{output:?}");

    let masked = decode(&fs::read(&output_path).unwrap()).unwrap();
    assert_eq!(masked.color, ColorType::Rgba);
    assert_eq!(masked.pixels, [250, 250, 250, 255, 0, 0, 0, 0]);
}
