/// Storefront URL slug for a free-text card or set name.
///
/// Normalization steps:
/// - lowercase
/// - map spaces to hyphens
/// - strip the punctuation the storefront never carries in a path segment:
///   apostrophes, parentheses, brackets, periods, exclamation marks
///
/// Match recall of the candidate scorer is bounded by how closely this tracks
/// the storefront's actual slugging rules, so keep it in sync with the site.
pub fn slugify(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '\'' | '(' | ')' | '[' | ']' | '.' | '!' => None,
            other => Some(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Base Set"), "base-set");
    }

    #[test]
    fn strips_apostrophes() {
        assert_eq!(slugify("Rocket's Secret Machine"), "rockets-secret-machine");
    }

    #[test]
    fn strips_the_full_punctuation_class() {
        assert_eq!(slugify("Mr. Mime (Delta Species) [EX]!"), "mr-mime-delta-species-ex");
    }

    #[test]
    fn empty_input_yields_empty_slug() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn keeps_digits_and_existing_hyphens() {
        assert_eq!(slugify("EX Team Rocket Returns 2"), "ex-team-rocket-returns-2");
        assert_eq!(slugify("Diamond-Pearl"), "diamond-pearl");
    }
}
