use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::normalization::slug::slugify;
use crate::providers::search::SearchHit;

/// How deep into the ranking the strict pass looks. The correct set-specific
/// match is expected early; anything past this is left to the relaxed pass.
const STRICT_PASS_DEPTH: usize = 5;

/// Product-detail pages sit at least this deep in the URL path. Shallower
/// URLs are category or landing pages.
const MIN_PATH_SEPARATORS: usize = 5;

/// Literal substrings that mark non-product or aggregate pages.
const NOISE_SUBSTRINGS: [&str; 4] = ["deck", "product", "price-guide", "secret-rare"];

// Secondary-market listing pages end in a short alphabetic run followed by
// digits. The character class skips `l` and `v` so `-lv45` style variant
// endings never trip this filter.
static LISTING_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[a-km-uw-z]+[0-9]+$").expect("listing suffix pattern"));

fn has_noise_substring(link: &str) -> bool {
    NOISE_SUBSTRINGS.iter().any(|s| link.contains(s))
}

/// Listing-page filter. Promo sets legitimately use listing-style URLs, so
/// the filter stands down when the set name mentions "promo". An empty set
/// gives us nothing to judge promo status by, so the filter is off too.
fn is_listing_page(link: &str, set: &str) -> bool {
    !set.is_empty() && LISTING_SUFFIX.is_match(link) && !set.to_lowercase().contains("promo")
}

/// Guards against Level-X variant pages matching a non-Level-X card.
fn is_level_x_mismatch(link: &str, name: &str) -> bool {
    link.contains("lvx") && !name.to_lowercase().contains("lv")
}

fn is_too_shallow(link: &str) -> bool {
    link.matches('/').count() < MIN_PATH_SEPARATORS
}

/// Rejection rules shared by both passes.
fn is_rejected(link: &str, name: &str, set: &str) -> bool {
    has_noise_substring(link)
        || is_listing_page(link, set)
        || is_level_x_mismatch(link, name)
        || is_too_shallow(link)
}

/// Picks the single most plausible product URL out of provider-ranked hits.
///
/// Two passes, first acceptable hit wins within each:
/// 1. strict: only the top [`STRICT_PASS_DEPTH`] hits, and the URL must carry
///    the set slug;
/// 2. relaxed: the full list, set slug no longer required.
///
/// Both passes demand the name slug and apply the shared rejection rules.
/// When neither pass matches, the top raw hit is returned as a best-effort
/// default (logged conspicuously) rather than leaving the cell blank; `None`
/// only when the hit list is empty.
pub fn select_candidate<'a>(hits: &'a [SearchHit], name: &str, set: &str) -> Option<&'a str> {
    let name_slug = slugify(name);
    let set_slug = slugify(set);

    let strict = hits.iter().take(STRICT_PASS_DEPTH).find(|hit| {
        hit.link.contains(&set_slug)
            && !is_rejected(&hit.link, name, set)
            && hit.link.contains(&name_slug)
    });
    if let Some(hit) = strict {
        debug!(link = %hit.link, "strict pass matched");
        return Some(&hit.link);
    }

    let relaxed = hits
        .iter()
        .find(|hit| !is_rejected(&hit.link, name, set) && hit.link.contains(&name_slug));
    if let Some(hit) = relaxed {
        debug!(link = %hit.link, "relaxed pass matched");
        return Some(&hit.link);
    }

    hits.first().map(|hit| {
        warn!(card = name, link = %hit.link, "no candidate passed the filters; defaulting to the top result");
        hit.link.as_str()
    })
}
