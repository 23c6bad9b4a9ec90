/// Search query for one card: `buy "<name>" <set> <number> pokemon`.
///
/// The name is quoted to bias the engine toward exact-phrase matches. Set and
/// number ride along unquoted and may be empty; URL encoding is the search
/// client's concern, not ours.
pub fn build_query(name: &str, set: &str, number: &str) -> String {
    format!("buy \"{name}\" {set} {number} pokemon")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_the_name_only() {
        assert_eq!(
            build_query("Pikachu", "Base Set", "58"),
            "buy \"Pikachu\" Base Set 58 pokemon"
        );
    }

    #[test]
    fn tolerates_empty_set_and_number() {
        assert_eq!(build_query("Mew", "", ""), "buy \"Mew\"   pokemon");
    }
}
