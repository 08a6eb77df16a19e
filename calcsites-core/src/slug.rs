//! Slug and title derivation for keywords

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::MAX_SLUG_LEN;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9 -]").expect("static slug pattern"));

/// Filesystem and URL safe identifier for a keyword.
///
/// Lower-cases, drops everything outside `[a-z0-9 -]`, turns spaces into
/// hyphens and keeps at most 50 characters. Distinct keywords may share a
/// slug (`"Test!"` and `"Test?"` both give `"test"`).
pub fn slugify(keyword: &str) -> String {
    let lowered = keyword.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let mut slug = cleaned.replace(' ', "-");
    // Only ASCII survives the filter, so byte truncation is safe
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Title-case a keyword: every run of letters starts upper-case, the rest is lower-case
pub fn title_case(keyword: &str) -> String {
    let mut title = String::with_capacity(keyword.len());
    let mut in_word = false;
    for ch in keyword.chars() {
        if ch.is_alphabetic() {
            if in_word {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(ch);
            in_word = false;
        }
    }
    title
}
