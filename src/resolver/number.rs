use std::sync::LazyLock;

use regex::Regex;

static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+$").expect("trailing digits pattern"));

// Level-X variant pages carry the variant's own digits, not the collector
// number, and must be left alone.
static LEVEL_X_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-lv[0-9]+$").expect("level-x suffix pattern"));

/// Rewrites the URL's trailing digit run to the card's collector number.
///
/// Storefront product URLs sometimes end in an internal numeric id; the cube
/// tracks the printed collector number, so the suffix is repaired here.
/// Returns the URL unchanged when the number is empty, when the URL already
/// ends with it, or when the URL ends with `-lv<digits>`.
pub fn reconcile_number(url: &str, number: &str) -> String {
    if number.is_empty() || url.ends_with(number) || LEVEL_X_SUFFIX.is_match(url) {
        return url.to_string();
    }
    TRAILING_DIGITS.replace(url, number).into_owned()
}
