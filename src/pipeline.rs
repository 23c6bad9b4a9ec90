use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::{info, warn};

use crate::providers::search::SearchProvider;
use crate::providers::sheets::{CardRow, CellUpdate, SheetStore};
use crate::resolver::row::{resolve_row, Outcome};

/// Resolves every row concurrently and collects the non-skipped updates.
///
/// One task per row, all launched eagerly and joined together. Rows are
/// independent; the only thing tying an update back to its row is the
/// `row_index` it carries, so completion order does not matter.
pub async fn resolve_all(search: Arc<dyn SearchProvider>, rows: Vec<CardRow>) -> Vec<CellUpdate> {
    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        let search = Arc::clone(&search);
        tasks.push(tokio::spawn(async move {
            resolve_row(search.as_ref(), &row).await
        }));
    }

    let mut updates = Vec::new();
    for joined in join_all(tasks).await {
        match joined {
            Ok(Outcome::Resolved(update)) => updates.push(update),
            Ok(Outcome::Skipped) => {}
            Err(join_err) => warn!(error = %join_err, "row task aborted"),
        }
    }
    updates
}

/// Full batch run: fetch the grid, resolve all rows, write the batch back.
///
/// An all-skipped run is a normal no-op, not an error. Fetch and commit
/// failures propagate to the caller.
pub async fn run(
    search: Arc<dyn SearchProvider>,
    store: &dyn SheetStore,
    dry_run: bool,
) -> Result<()> {
    let rows = store.fetch_rows().await.context("fetching sheet rows")?;
    let total = rows.len();
    info!(rows = total, "fetched sheet rows");

    let updates = resolve_all(search, rows).await;
    info!(
        resolved = updates.len(),
        skipped = total - updates.len(),
        "resolution finished"
    );

    if updates.is_empty() {
        info!("no rows resolved; nothing to commit");
        return Ok(());
    }

    if dry_run {
        for update in &updates {
            info!(row = update.row_index, value = %update.value, "dry-run update");
        }
        return Ok(());
    }

    store
        .commit_updates(&updates)
        .await
        .context("committing link updates")?;
    info!(updates = updates.len(), "batch committed");
    Ok(())
}
