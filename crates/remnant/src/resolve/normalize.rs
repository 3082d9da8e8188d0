//! Stem normalization for matching an extra file back to its main file.
//!
//! Companion files carry decorations the main file's name does not:
//! `Show.S01E01.en.srt`, `Show.S01E01-thumb.jpg`, `Show.S01E01 (2019).nfo`.
//! Exactly one rule fires, in a fixed order, and the result is never
//! re-checked — `x-thumb.en` loses only `.en`.

use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace, then a parenthesized run of word characters, dots, hyphens,
// commas and spaces; the closing paren may be missing.
static RELEASE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\([\w.\-, ]*\)?$").expect("release tag pattern"));

pub fn strip_locale_suffix(stem: &str) -> Option<&str> {
    stem.strip_suffix(".en")
}

pub fn strip_thumb_suffix(stem: &str) -> Option<&str> {
    stem.strip_suffix("-thumb")
}

pub fn strip_release_tag(stem: &str) -> Option<&str> {
    RELEASE_TAG.find(stem).map(|tag| &stem[..tag.start()])
}

/// Apply the first matching rule once.
pub fn normalize_stem(stem: &str) -> &str {
    strip_locale_suffix(stem)
        .or_else(|| strip_thumb_suffix(stem))
        .or_else(|| strip_release_tag(stem))
        .unwrap_or(stem)
}
