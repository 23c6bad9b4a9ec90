use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use cardcube::config::Config;
use cardcube::pipeline;
use cardcube::providers::search::{CustomSearchProvider, SearchProvider};
use cardcube::providers::sheets::SheetsStore;
use cardcube::util::env as env_util;

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    cardcube::tracing::init_tracing("info")?;

    let config = Config::from_args()?;
    info!(sheet = %config.sheet, dry_run = config.dry_run, "cardcube starting");

    let search: Arc<dyn SearchProvider> = Arc::new(CustomSearchProvider::new(
        None,
        &config.search_api_key,
        &config.search_cx,
    )?);
    let store = SheetsStore::new(None, &config.sheet, &config.sheets_token)?;

    pipeline::run(search, &store, config.dry_run).await
}
