use anyhow::{Context, Result};
use clap::Parser;

use crate::util::env::{env_flag, env_opt};

#[derive(Debug, Parser)]
#[command(name = "cardcube", version, about = "Fill the cube sheet's purchase-link column from web search")]
struct Cli {
    /// Spreadsheet id to operate on.
    #[arg(long)]
    sheet: Option<String>,
    /// API key for the custom search engine.
    #[arg(long)]
    search_api_key: Option<String>,
    /// Custom search engine id (cx).
    #[arg(long)]
    search_cx: Option<String>,
    /// Bearer token for the spreadsheet API.
    #[arg(long)]
    sheets_token: Option<String>,
    /// Log the resolved batch without writing it back.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

/// Resolved configuration, built once in `main` and passed down. Every value
/// can come from the command line or from the matching `CARDCUBE_*` env var
/// (flags win).
#[derive(Debug, Clone)]
pub struct Config {
    pub sheet: String,
    pub search_api_key: String,
    pub search_cx: String,
    pub sheets_token: String,
    pub dry_run: bool,
}

fn require(cli_value: Option<String>, flag: &str, env_key: &str) -> Result<String> {
    cli_value
        .or_else(|| env_opt(env_key))
        .with_context(|| format!("missing {flag} (or {env_key})"))
}

impl Config {
    pub fn from_args() -> Result<Self> {
        Self::resolve(Cli::parse())
    }

    fn resolve(cli: Cli) -> Result<Self> {
        Ok(Self {
            sheet: require(cli.sheet, "--sheet", "CARDCUBE_SHEET")?,
            search_api_key: require(
                cli.search_api_key,
                "--search-api-key",
                "CARDCUBE_SEARCH_API_KEY",
            )?,
            search_cx: require(cli.search_cx, "--search-cx", "CARDCUBE_SEARCH_CX")?,
            sheets_token: require(cli.sheets_token, "--sheets-token", "CARDCUBE_SHEETS_TOKEN")?,
            dry_run: cli.dry_run || env_flag("CARDCUBE_DRY_RUN", false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_cli() -> Cli {
        Cli {
            sheet: Some("sheet-id".into()),
            search_api_key: Some("key".into()),
            search_cx: Some("cx".into()),
            sheets_token: Some("token".into()),
            dry_run: true,
        }
    }

    #[test]
    fn flags_resolve_without_env() {
        let config = Config::resolve(full_cli()).unwrap();
        assert_eq!(config.sheet, "sheet-id");
        assert!(config.dry_run);
    }

    #[test]
    fn missing_required_value_names_both_sources() {
        // Key unique to this test so no env mutation is needed.
        let err = require(None, "--search-cx", "CARDCUBE_TEST_NEVER_SET_CX").unwrap_err();
        assert!(err.to_string().contains("--search-cx"));
        assert!(err.to_string().contains("CARDCUBE_TEST_NEVER_SET_CX"));
    }
}
