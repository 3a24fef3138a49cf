#![allow(clippy::float_cmp)]

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use super::*;

fn write_png(dir: &TempDir, name: &str, color: [u8; 4]) -> PathBuf {
    let path = dir.path().join(name);
    let img = RgbaImage::from_pixel(40, 30, Rgba(color));
    if let Err(e) = img.save(&path) {
        panic!("could not write fixture: {e}");
    }
    path
}

fn compose_args(images: Vec<PathBuf>) -> ComposeArgs {
    ComposeArgs { images, layout: None, background: None, output: None, data_uri: false }
}

#[test]
fn parse_size_accepts_either_separator() {
    assert!(matches!(parse_size("1000x2000"), Ok((w, h)) if w == 1000.0 && h == 2000.0));
    assert!(matches!(parse_size(" 640 X 480 "), Ok((w, h)) if w == 640.0 && h == 480.0));
    assert!(matches!(parse_size("640"), Err(CliError::InvalidSize(_))));
    assert!(matches!(parse_size("axb"), Err(CliError::InvalidSize(_))));
    assert!(matches!(parse_size("infx10"), Err(CliError::InvalidSize(_))));
}

#[test]
fn fit_uses_editor_canvas_by_default() {
    let Ok(value) = fit_json("1000x2000", None) else {
        panic!("fit failed");
    };
    let scale = value["scale"].as_f64().unwrap_or_default();
    assert!((scale - 1.92).abs() < 1e-9);
    assert!(value["x"].as_f64().unwrap_or(f64::NAN).abs() < 1e-9);
    assert!((value["y"].as_f64().unwrap_or_default() + 1380.0).abs() < 1e-9);
}

#[test]
fn fit_with_explicit_canvas() {
    let Ok(value) = fit_json("500x500", Some("1080x1080")) else {
        panic!("fit failed");
    };
    assert_eq!(value["scale"].as_f64(), Some(2.16));
}

#[test]
fn layouts_filtered_by_count() {
    let all = layouts_json(None);
    assert_eq!(all.as_array().map(Vec::len), Some(6));

    let two = layouts_json(Some(2));
    let ids: Vec<&str> = two.as_array().into_iter().flatten().filter_map(|l| l["id"].as_str()).collect();
    assert_eq!(ids, ["grid-2a", "grid-2b"]);

    assert_eq!(layouts_json(Some(5)).as_array().map(Vec::len), Some(0));
}

#[test]
fn layouts_include_region_geometry() {
    let one = layouts_json(Some(1));
    let region = &one[0]["regions"][0];
    assert_eq!(region["key"], "main");
    assert_eq!(region["width"], 1080);
}

#[test]
fn compose_writes_png() {
    let Ok(dir) = TempDir::new() else {
        panic!("no tempdir");
    };
    let a = write_png(&dir, "a.png", [255, 0, 0, 255]);
    let b = write_png(&dir, "b.png", [0, 0, 255, 255]);
    let out = dir.path().join("grid.png");

    let mut args = compose_args(vec![a, b]);
    args.layout = Some("grid-2b".into());
    args.output = Some(out.clone());
    let Ok(report) = run_compose(&args) else {
        panic!("compose failed");
    };
    assert_eq!(report["layout"], "grid-2b");
    assert_eq!(report["images"], 2);

    let Ok(written) = image::open(&out) else {
        panic!("output not readable");
    };
    assert_eq!((written.width(), written.height()), (1080, 1080));
}

#[test]
fn compose_falls_back_on_invalid_layout() {
    let Ok(dir) = TempDir::new() else {
        panic!("no tempdir");
    };
    let a = write_png(&dir, "a.png", [0, 255, 0, 255]);
    let mut args = compose_args(vec![a]);
    args.layout = Some("grid-3c".into());
    args.data_uri = true;
    let Ok(report) = run_compose(&args) else {
        panic!("compose failed");
    };
    assert_eq!(report["layout"], "grid-1");
    let uri = report["data_uri"].as_str().unwrap_or_default();
    assert!(uri.starts_with(compose::PNG_DATA_URI_PREFIX));
}

#[test]
fn compose_requires_an_output() {
    let args = compose_args(vec![PathBuf::from("missing.png")]);
    assert!(matches!(run_compose(&args), Err(CliError::NoOutput)));
}

#[test]
fn compose_rejects_unknown_layout() {
    let mut args = compose_args(vec![PathBuf::from("missing.png")]);
    args.layout = Some("grid-9".into());
    args.data_uri = true;
    assert!(matches!(run_compose(&args), Err(CliError::UnknownLayout(_))));
}

#[test]
fn compose_reports_unreadable_image() {
    let mut args = compose_args(vec![PathBuf::from("/nonexistent/flash.png")]);
    args.data_uri = true;
    assert!(matches!(run_compose(&args), Err(CliError::Image { .. })));
}

#[test]
fn normalize_drops_malformed_entries() {
    let raw = r#"{
        "image1": {
            "transform": {"x": 1, "y": 2, "scale": -4},
            "annotations": [
                {"type": "icon", "id": "a", "x": 10, "y": 20, "tool": "warning"},
                {"type": "icon", "id": "b", "x": 10, "y": 20, "tool": "laser"},
                {"type": "text", "id": "c", "x": 5, "y": 5, "text": "   "}
            ]
        },
        "image7": {},
        "notes": "ignored"
    }"#;
    let Ok(value) = normalize_state(raw, None) else {
        panic!("normalize failed");
    };
    let slot = &value["image1"];
    assert!(slot["transform"].is_null());
    let annotations = slot["annotations"].as_array().map(Vec::len);
    assert_eq!(annotations, Some(1));
    assert_eq!(slot["annotations"][0]["size"], 140.0);
    assert!(value.get("image7").is_none());
    assert!(value.get("notes").is_none());
}

#[test]
fn normalize_single_slot() {
    let raw = r#"{"image2": {"transform": {"x": 0, "y": 0, "scale": 2}, "annotations": []}}"#;
    let Ok(value) = normalize_state(raw, Some(2)) else {
        panic!("normalize failed");
    };
    assert_eq!(value["transform"]["scale"], 2.0);
    assert!(matches!(normalize_state(raw, Some(1)), Ok(Value::Null)));
    assert!(matches!(normalize_state(raw, Some(4)), Err(CliError::State(_))));
}

#[test]
fn normalize_garbage_is_empty() {
    assert!(matches!(normalize_state("not json", None), Ok(Value::Object(m)) if m.is_empty()));
}

#[test]
fn icons_cover_every_tool() {
    let value = icons_json("https://example.test/");
    let Some(map) = value.as_object() else {
        panic!("expected object");
    };
    assert_eq!(map.len(), IconKind::ALL.len());
    assert_eq!(map["warning"], "https://example.test/assets/img/annotations/warning.png");
}
