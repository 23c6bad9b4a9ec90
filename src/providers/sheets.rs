use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Grid columns consumed, by position.
const NAME_COL: usize = 0;
const NUMBER_COL: usize = 1;
const SET_COL: usize = 2;
const LINK_COL: usize = 5;

/// A1-notation column the resolved link is written back to (column index 5).
const LINK_COLUMN: &str = "F";

/// One catalog entry read from the grid. Missing cells come through as empty
/// strings; `row_index` is the 1-based grid position and is the row's stable
/// identity for the write-back.
#[derive(Debug, Clone)]
pub struct CardRow {
    pub row_index: usize,
    pub name: String,
    pub number: String,
    pub set: String,
    pub existing_link: String,
}

/// Resolved outcome for one row: the URL to write into the link column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub row_index: usize,
    pub value: String,
}

/// Spreadsheet collaborator: read the grid once, write one batch back.
#[async_trait::async_trait]
pub trait SheetStore: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<CardRow>>;
    /// Single batched write. Callers never pass an empty slice.
    async fn commit_updates(&self, updates: &[CellUpdate]) -> Result<()>;
}

/// Google Sheets values API client.
///
/// Reads `values/A:Z` of the first sheet and writes each resolved link to
/// `F{row}` via `values:batchUpdate`. Auth is an injected bearer token; the
/// flow that obtains it is outside this binary.
#[derive(Debug, Clone)]
pub struct SheetsStore {
    base_url: String,
    http: Client,
    sheet_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct UpdateRange<'a> {
    range: String,
    values: [[&'a str; 1]; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateBody<'a> {
    value_input_option: &'static str,
    data: Vec<UpdateRange<'a>>,
}

fn cell(row: &[String], col: usize) -> String {
    row.get(col).cloned().unwrap_or_default()
}

/// Maps raw grid rows onto [`CardRow`]s, assigning 1-based row indices.
fn rows_from_values(values: Vec<Vec<String>>) -> Vec<CardRow> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, row)| CardRow {
            row_index: i + 1,
            name: cell(&row, NAME_COL),
            number: cell(&row, NUMBER_COL),
            set: cell(&row, SET_COL),
            existing_link: cell(&row, LINK_COL),
        })
        .collect()
}

fn update_ranges(updates: &[CellUpdate]) -> Vec<UpdateRange<'_>> {
    updates
        .iter()
        .map(|u| UpdateRange {
            range: format!("{LINK_COLUMN}{}", u.row_index),
            values: [[u.value.as_str()]],
        })
        .collect()
}

impl SheetsStore {
    pub fn new(base_url: Option<&str>, sheet_id: &str, token: &str) -> Result<Self> {
        let base_url = base_url
            .unwrap_or("https://sheets.googleapis.com")
            .trim_end_matches('/')
            .to_string();
        let http = Client::builder()
            .user_agent("cardcube/0.1")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            http,
            sheet_id: sheet_id.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl SheetStore for SheetsStore {
    async fn fetch_rows(&self) -> Result<Vec<CardRow>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/A:Z",
            self.base_url, self.sheet_id
        );
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            bail!("sheet fetch returned {status}");
        }

        let payload: ValueRange = resp.json().await?;
        Ok(rows_from_values(payload.values))
    }

    async fn commit_updates(&self, updates: &[CellUpdate]) -> Result<()> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values:batchUpdate",
            self.base_url, self.sheet_id
        );
        let body = BatchUpdateBody {
            value_input_option: "RAW",
            data: update_ranges(updates),
        };
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            bail!("sheet batch update returned {status}");
        }
        Ok(())
    }
}
