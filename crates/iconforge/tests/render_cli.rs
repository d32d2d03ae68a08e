use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pngcodec::{decode, ColorType};
use tempfile::TempDir;

const MANIFEST: &str = r#"
version = 1
out_dir = "out"

[defaults]
size = 48
supersample = 2

[assets.logo]
glyph = "bean"
output = "logo.png"

[assets.icon]
glyph = "bean-nib"
output = "icons/app_icon.png"
supersample = "off"
compression = "fast"
"#;

fn iconforge(root: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_iconforge"));
    command
        .current_dir(root)
        .env("ICONFORGE_CONFIG_DIR", root.join("config"))
        .env_remove("ICONFORGE_MANIFEST")
        .env_remove("ICONFORGE_OUT_DIR")
        .env("RUST_LOG", "warn");
    command
}

fn run(command: &mut Command) -> Output {
    command.output().expect("failed to run iconforge")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn manifest_renders_every_asset_into_out_dir() {
    let root = TempDir::new().unwrap();
    let manifest = root.path().join("assets.toml");
    fs::write(&manifest, MANIFEST).unwrap();

    let output = run(iconforge(root.path()).arg("--manifest").arg(&manifest));
    assert!(output.status.success(), "{output:?}");

    let logo = decode(&fs::read(root.path().join("out/logo.png")).unwrap()).unwrap();
    assert_eq!((logo.width, logo.height), (48, 48));
    assert_eq!(logo.color, ColorType::Rgba);
    assert_eq!(logo.pixel(0, 0), Some(&[0u8, 0, 0, 0][..]));

    let icon = decode(&fs::read(root.path().join("out/icons/app_icon.png")).unwrap()).unwrap();
    assert_eq!(icon.color, ColorType::Rgb);
    // The bean is designed in 1024px units, so a 48px canvas sits inside it
    // with the slit running down the middle.
    assert_eq!(icon.pixel(0, 0), Some(&[212u8, 175, 55][..]));
    assert_eq!(icon.pixel(24, 10), Some(&[43u8, 27, 23][..]));

    let text = stdout(&output);
    assert!(text.contains("Rendered logo"), "{text}");
    assert!(text.contains("Rendered icon"), "{text}");
}

#[test]
fn named_assets_render_alone() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("iconforge.toml"), MANIFEST).unwrap();

    let output = run(iconforge(root.path()).arg("icon"));
    assert!(output.status.success(), "{output:?}");
    assert!(root.path().join("out/icons/app_icon.png").exists());
    assert!(!root.path().join("out/logo.png").exists());
}

#[test]
fn out_dir_flag_overrides_manifest() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("iconforge.toml"), MANIFEST).unwrap();

    let output = run(iconforge(root.path()).args(["--out-dir", "elsewhere", "logo"]));
    assert!(output.status.success(), "{output:?}");
    assert!(root.path().join("elsewhere/logo.png").exists());
    assert!(!root.path().join("out").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("iconforge.toml"), MANIFEST).unwrap();

    let output = run(iconforge(root.path()).arg("--dry-run"));
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Dry-run: logo would render bean"));
    assert!(!root.path().join("out").exists());
}

#[test]
fn unknown_glyph_fails_before_writing() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("iconforge.toml"),
        r#"
version = 1

[assets.a_first]
glyph = "bean"
output = "first.png"
size = 16

[assets.b_broken]
glyph = "teapot"
output = "broken.png"
"#,
    )
    .unwrap();

    let output = run(&mut iconforge(root.path()));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("teapot"), "{stderr}");
    assert!(!root.path().join("first.png").exists());
}

#[test]
fn missing_manifest_is_reported() {
    let root = TempDir::new().unwrap();
    let output = run(&mut iconforge(root.path()));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no asset manifest found"));
}

#[test]
fn glyph_command_renders_single_file() {
    let root = TempDir::new().unwrap();
    let target = root.path().join("single/cup.png");

    let output = run(iconforge(root.path())
        .args(["glyph", "CUP-PEN", "--size", "40x24", "--color", "rgb", "--output"])
        .arg(&target));
    assert!(output.status.success(), "{output:?}");

    let image = decode(&fs::read(&target).unwrap()).unwrap();
    assert_eq!((image.width, image.height), (40, 24));
    assert_eq!(image.color, ColorType::Rgb);
    assert!(stdout(&output).contains("Rendered cup-pen"));
}

#[test]
fn oversized_glyph_is_rejected_without_writing() {
    let root = TempDir::new().unwrap();
    let target = root.path().join("huge.png");

    let output = run(iconforge(root.path())
        .args(["glyph", "bean", "--size", "3000000000x1", "--output"])
        .arg(&target));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid canvas dimensions 3000000000x1"), "{stderr}");
    assert!(!target.exists());
}

#[test]
fn glyphs_command_lists_catalog() {
    let root = TempDir::new().unwrap();
    let output = run(iconforge(root.path()).arg("glyphs"));
    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["cup-line", "bean-nib-foreground", "checkbox-bean"] {
        assert!(text.contains(name), "missing {name} in {text}");
    }
}
