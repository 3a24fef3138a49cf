#![allow(clippy::float_cmp)]

use super::*;

fn est(size: f64) -> impl Fn(&str) -> f64 {
    move |s: &str| estimate_width(s, size)
}

// --- blank / lines ---

#[test]
fn blank_detects_whitespace_only() {
    assert!(is_blank(""));
    assert!(is_blank("   "));
    assert!(is_blank(" \n\t "));
    assert!(!is_blank(" a "));
}

#[test]
fn explicit_lines_splits_on_newline_only() {
    assert_eq!(explicit_lines("one two\nthree"), vec!["one two", "three"]);
    assert_eq!(explicit_lines("a\r\nb"), vec!["a", "b"]);
    assert_eq!(explicit_lines("single"), vec!["single"]);
}

// --- estimated_block ---

#[test]
fn estimated_block_short_text_uses_min_width() {
    let (w, h) = estimated_block("Hi", 32.0);
    assert_eq!(w, 140.0);
    assert!((h - 41.6).abs() < 1e-9);
}

#[test]
fn estimated_block_long_text_caps_width() {
    let line = "x".repeat(200);
    let (w, _) = estimated_block(&line, 32.0);
    assert_eq!(w, 980.0);
}

#[test]
fn estimated_block_uses_longest_line() {
    // 20 chars * 20 * 0.6 = 240
    let (w, h) = estimated_block("short\n12345678901234567890\nmid", 20.0);
    assert!((w - 240.0).abs() < 1e-9);
    assert!((h - 3.0 * 26.0).abs() < 1e-9);
}

#[test]
fn padded_box_adds_padding_on_all_sides() {
    let (l, t, w, h) = padded_box(100.0, 200.0, "Hi", 32.0);
    assert_eq!(l, 88.0);
    assert_eq!(t, 188.0);
    assert_eq!(w, 164.0);
    assert!((h - (41.6 + 24.0)).abs() < 1e-9);
}

// --- wrap_lines ---

#[test]
fn wrap_keeps_short_lines() {
    assert_eq!(wrap_lines("slip hazard", 980.0, est(32.0)), vec!["slip hazard"]);
}

#[test]
fn wrap_breaks_between_words() {
    let measure = |s: &str| s.chars().count() as f64 * 10.0;
    let lines = wrap_lines("aaa bbb ccc", 70.0, measure);
    assert_eq!(lines, vec!["aaa bbb", "ccc"]);
}

#[test]
fn wrap_preserves_explicit_newlines_and_blank_lines() {
    let measure = |s: &str| s.chars().count() as f64 * 10.0;
    let lines = wrap_lines("one\n\ntwo", 100.0, measure);
    assert_eq!(lines, vec!["one", "", "two"]);
}

#[test]
fn wrap_breaks_overlong_word() {
    let measure = |s: &str| s.chars().count() as f64 * 10.0;
    let lines = wrap_lines("abcdefghij", 40.0, measure);
    assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn wrap_for_export_respects_max_width() {
    let text = "caution wet floor near loading dock ".repeat(10);
    let measure = est(40.0);
    for line in wrap_for_export(&text, &measure) {
        assert!(measure(&line) <= 980.0, "line too wide: {line}");
    }
}

#[test]
fn wrap_empty_text_yields_single_empty_line() {
    assert_eq!(wrap_lines("", 100.0, |_| 0.0), vec![String::new()]);
}
