//! Deterministic text fitting for panels.
//!
//! Widths are estimated from a monospace advance instead of measured glyphs, so the same input
//! always wraps the same way regardless of which fonts are installed.

/// Approximate monospace advance as a fraction of the font size.
pub const MONO_ADVANCE: f64 = 0.6;

const ELLIPSIS: char = '…';

/// Characters of a `font_size` monospace face that fit in `width_px` (at least 1).
pub fn char_budget(width_px: f64, font_size: f64) -> usize {
    let fits = width_px / (font_size * MONO_ADVANCE);
    if fits.is_finite() && fits >= 1.0 {
        fits.floor() as usize
    } else {
        1
    }
}

/// Cut `text` to at most `max_chars` characters, ending with `…` when shortened.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Greedy word wrap to `max_chars` per line and at most `max_lines` lines.
///
/// Words longer than a line are split. When text remains after the last allowed line, that
/// line is shortened to end with `…`.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let max_lines = max_lines.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        while !chars.is_empty() {
            let needed = if current_len == 0 {
                chars.len()
            } else {
                current_len + 1 + chars.len()
            };

            if needed <= max_chars {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current_len += chars.len();
                current.extend(chars.drain(..));
            } else if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            } else {
                let head: String = chars.drain(..max_chars).collect();
                lines.push(head);
            }
        }
    }
    if current_len > 0 {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut shortened: String = last.chars().take(max_chars - 1).collect();
            shortened.push(ELLIPSIS);
            *last = shortened;
        }
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
