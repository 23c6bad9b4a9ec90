use tracing::{debug, info, warn};

use crate::providers::search::SearchProvider;
use crate::providers::sheets::{CardRow, CellUpdate};
use crate::resolver::number::reconcile_number;
use crate::resolver::query::build_query;
use crate::resolver::scorer::select_candidate;

/// Per-row result. No error variant: everything that goes wrong inside a row
/// folds into `Skipped` so sibling rows are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Resolved(CellUpdate),
}

/// Resolves one catalog row to a purchase link.
///
/// Skips the header row, rows without a name, and rows whose link cell is
/// already filled (an earlier run's answer is never overwritten). Otherwise
/// searches, scores the hits, reconciles the trailing number and emits the
/// cell update.
pub async fn resolve_row(search: &dyn SearchProvider, row: &CardRow) -> Outcome {
    if row.row_index < 2 {
        return Outcome::Skipped;
    }
    if row.name.is_empty() {
        debug!(row = row.row_index, "no card name; skipping");
        return Outcome::Skipped;
    }

    info!(card = row.row_index - 1, name = %row.name, "resolving card");

    if !row.existing_link.is_empty() {
        debug!(row = row.row_index, "link already present; skipping");
        return Outcome::Skipped;
    }

    let query = build_query(&row.name, &row.set, &row.number);
    debug!(row = row.row_index, query = %query, "issuing search");

    let hits = match search.search(&query).await {
        Ok(hits) => hits,
        Err(err) => {
            warn!(row = row.row_index, error = %err, "search failed; skipping row");
            return Outcome::Skipped;
        }
    };
    if hits.is_empty() {
        info!(row = row.row_index, "search returned nothing; skipping");
        return Outcome::Skipped;
    }

    let Some(candidate) = select_candidate(&hits, &row.name, &row.set) else {
        return Outcome::Skipped;
    };
    let value = reconcile_number(candidate, &row.number);

    Outcome::Resolved(CellUpdate {
        row_index: row.row_index,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    use crate::providers::search::SearchHit;

    struct StubSearch {
        links: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl SearchProvider for StubSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
            if self.fail {
                return Err(anyhow!("quota exhausted"));
            }
            Ok(self
                .links
                .iter()
                .map(|l| SearchHit { link: (*l).to_string() })
                .collect())
        }
    }

    fn card(row_index: usize) -> CardRow {
        CardRow {
            row_index,
            name: "Pikachu".into(),
            number: "58".into(),
            set: "Base Set".into(),
            existing_link: String::new(),
        }
    }

    const HIT: &str = "https://shop.example.com/pokemon/base-set/pikachu-99";

    #[tokio::test]
    async fn header_row_is_never_resolved() {
        let search = StubSearch { links: vec![HIT], fail: false };
        assert_eq!(resolve_row(&search, &card(1)).await, Outcome::Skipped);
    }

    #[tokio::test]
    async fn nameless_rows_are_skipped() {
        let search = StubSearch { links: vec![HIT], fail: false };
        let mut row = card(3);
        row.name = String::new();
        assert_eq!(resolve_row(&search, &row).await, Outcome::Skipped);
    }

    #[tokio::test]
    async fn filled_link_cells_are_never_overwritten() {
        let search = StubSearch { links: vec![HIT], fail: false };
        let mut row = card(3);
        row.existing_link = "https://x/already-there".into();
        assert_eq!(resolve_row(&search, &row).await, Outcome::Skipped);
    }

    #[tokio::test]
    async fn empty_search_results_skip_the_row() {
        let search = StubSearch { links: vec![], fail: false };
        assert_eq!(resolve_row(&search, &card(3)).await, Outcome::Skipped);
    }

    #[tokio::test]
    async fn a_failed_search_folds_into_skipped() {
        let search = StubSearch { links: vec![], fail: true };
        assert_eq!(resolve_row(&search, &card(3)).await, Outcome::Skipped);
    }

    #[tokio::test]
    async fn resolves_and_reconciles_the_collector_number() {
        let search = StubSearch { links: vec![HIT], fail: false };
        let outcome = resolve_row(&search, &card(4)).await;
        assert_eq!(
            outcome,
            Outcome::Resolved(CellUpdate {
                row_index: 4,
                value: "https://shop.example.com/pokemon/base-set/pikachu-58".into(),
            })
        );
    }
}
