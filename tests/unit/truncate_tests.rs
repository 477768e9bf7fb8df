//! Pixel-budget truncation for name and handle fields.

use tweetpress::render::layout::shorten_to_width;

/// Ten pixels per character, like a fixed-advance font.
fn width_of(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap() * 10
}

#[test]
fn within_budget_is_unchanged() {
    assert_eq!(shorten_to_width("short", 100, width_of), "short");
}

#[test]
fn exact_budget_is_unchanged() {
    assert_eq!(shorten_to_width("exact", 50, width_of), "exact");
}

#[test]
fn overlong_text_is_cut_with_trailing_dots() {
    // Budget of 50 px admits five characters; two survive plus "...".
    assert_eq!(shorten_to_width("abcdefghij", 50, width_of), "ab...");
}

#[test]
fn truncation_is_idempotent() {
    let once = shorten_to_width("abcdefghij", 50, width_of);
    let twice = shorten_to_width(&once, 50, width_of);
    assert_eq!(once, twice);
}

#[test]
fn already_truncated_input_within_budget_is_unchanged() {
    assert_eq!(shorten_to_width("ab...", 50, width_of), "ab...");
}

#[test]
fn hopeless_budget_degrades_to_dots() {
    assert_eq!(shorten_to_width("abcdef", 10, width_of), "...");
}

#[test]
fn repeated_calls_are_stable() {
    let first = shorten_to_width("a rather long display name", 120, width_of);
    let second = shorten_to_width("a rather long display name", 120, width_of);
    assert_eq!(first, second);
}
