use super::*;

#[test]
fn short_text_is_one_line() {
    assert_eq!(wrap_text("all good", 20, 3), vec!["all good"]);
    assert!(wrap_text("   ", 20, 3).is_empty());
}

#[test]
fn wraps_on_word_boundaries() {
    let lines = wrap_text("Habitica API returned 401: not authorized", 16, 5);
    assert_eq!(
        lines,
        vec!["Habitica API", "returned 401:", "not authorized"]
    );
    assert!(lines.iter().all(|l| l.chars().count() <= 16));
}

#[test]
fn splits_words_longer_than_a_line() {
    let lines = wrap_text("abcdefghij klm", 4, 10);
    assert_eq!(lines, vec!["abcd", "efgh", "ij", "klm"]);
}

#[test]
fn overflow_is_bounded_and_marked() {
    let text = "word ".repeat(200);
    let lines = wrap_text(&text, 12, 3);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.chars().count() <= 12));
    assert!(lines[2].ends_with('…'));
}

#[test]
fn wrapping_is_deterministic() {
    let text = "could not reach the Habitica API: error sending request for url";
    assert_eq!(wrap_text(text, 30, 4), wrap_text(text, 30, 4));
}

#[test]
fn truncate_respects_char_budget() {
    assert_eq!(truncate_with_ellipsis("short", 10), "short");
    assert_eq!(truncate_with_ellipsis("abcdefghij", 5), "abcd…");
    assert_eq!(truncate_with_ellipsis("ééééé", 3).chars().count(), 3);
}

#[test]
fn char_budget_uses_monospace_advance() {
    assert_eq!(char_budget(480.0, 14.0), 57);
    assert_eq!(char_budget(0.0, 14.0), 1);
    assert_eq!(char_budget(100.0, 0.0), 1);
}
