//! Text block layout shared by hit-testing, creation and both render variants.
//!
//! Screen rendering breaks lines only at explicit newlines. Export rendering
//! additionally greedy-wraps each line to a maximum width using a caller
//! supplied measure function (the browser's `measureText` in production, the
//! glyph-width estimate in tests).

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use crate::consts::{CHAR_WIDTH_RATIO, LINE_HEIGHT_RATIO, TEXT_MAX_WIDTH, TEXT_MIN_WIDTH, TEXT_PADDING};

/// Whether the text has nothing visible to draw.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Split on explicit newlines only. `\r\n` is treated as a single break.
#[must_use]
pub fn explicit_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
}

/// Line height for a font size.
#[must_use]
pub fn line_height(size: f64) -> f64 {
    size * LINE_HEIGHT_RATIO
}

/// Estimated advance of a single line at `size`.
#[must_use]
pub fn estimate_width(line: &str, size: f64) -> f64 {
    line.chars().count() as f64 * size * CHAR_WIDTH_RATIO
}

/// Estimated unpadded size of a text block, as `(width, height)`.
///
/// Width is the longest explicit line's estimate clamped to
/// `[TEXT_MIN_WIDTH, TEXT_MAX_WIDTH]`; height is one line height per line.
#[must_use]
pub fn estimated_block(text: &str, size: f64) -> (f64, f64) {
    let lines = explicit_lines(text);
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = (longest as f64 * size * CHAR_WIDTH_RATIO).clamp(TEXT_MIN_WIDTH, TEXT_MAX_WIDTH);
    let height = lines.len() as f64 * line_height(size);
    (width, height)
}

/// Estimated padded box `(left, top, width, height)` for text anchored at `(x, y)`.
#[must_use]
pub fn padded_box(x: f64, y: f64, text: &str, size: f64) -> (f64, f64, f64, f64) {
    let (w, h) = estimated_block(text, size);
    (x - TEXT_PADDING, y - TEXT_PADDING, w + TEXT_PADDING * 2.0, h + TEXT_PADDING * 2.0)
}

/// Greedy word wrap: explicit newlines are kept, then each line is packed
/// word by word so no line exceeds `max_w`. Words wider than `max_w` are
/// broken by character.
pub fn wrap_lines<F>(text: &str, max_w: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut out = Vec::new();
    for raw_line in explicit_lines(text) {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if measure(&candidate) <= max_w {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_w {
                current = word.to_owned();
            } else {
                let mut chunks = break_long_word(word, max_w, &measure);
                if let Some(last) = chunks.pop() {
                    out.extend(chunks);
                    current = last;
                }
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn break_long_word<F>(word: &str, max_w: f64, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && measure(&candidate) > max_w {
            lines.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Export-time wrap at the fixed maximum line width.
pub fn wrap_for_export<F>(text: &str, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    wrap_lines(text, TEXT_MAX_WIDTH, measure)
}
