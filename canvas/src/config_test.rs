use super::*;

#[test]
fn defaults() {
    let c = EditorConfig::default();
    assert!(c.base_url.is_empty());
    assert!(c.show_safe_zone);
    assert_eq!(c.background, DEFAULT_BACKGROUND);
}

#[test]
fn from_json_partial_uses_defaults() {
    let c = EditorConfig::from_json(r#"{"base_url":"https://flash.example.com/"}"#).unwrap();
    assert_eq!(c.base_url, "https://flash.example.com");
    assert!(c.show_safe_zone);
}

#[test]
fn from_json_overrides() {
    let c = EditorConfig::from_json(r##"{"show_safe_zone":false,"background":"#000"}"##).unwrap();
    assert!(!c.show_safe_zone);
    assert_eq!(c.background, "#000");
}

#[test]
fn from_json_malformed_errors() {
    let err = EditorConfig::from_json("{").unwrap_err().to_string();
    assert!(err.contains("invalid editor config"));
}

#[test]
fn icon_url_uses_base() {
    let c = EditorConfig::from_json(r#"{"base_url":"https://flash.example.com"}"#).unwrap();
    assert_eq!(c.icon_url(IconKind::Warning), "https://flash.example.com/assets/img/annotations/warning.png");
}
