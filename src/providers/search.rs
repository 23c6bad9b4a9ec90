use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::Client;
use serde::Deserialize;

fn truncate_for_log(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        // Back off to a char boundary; a fixed byte cut can split a
        // multi-byte character and panic.
        let mut cut = max_len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("…");
    }
    s
}

/// One hit returned by the search engine. Only the link is consumed; the
/// engine's ranking order is the tie-break signal downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub link: String,
}

/// Web-search collaborator. The resolution pipeline only ever issues a query
/// and reads back the ranked links, so the seam is exactly that.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Google Custom Search JSON API client.
///
/// Base: https://www.googleapis.com/
/// Endpoint: GET /customsearch/v1?key=..&cx=..&q=..
///
/// Engine scope (which sites are searched) lives in the `cx` engine
/// configuration, not here. No retry and no quota handling: a failed call
/// surfaces as an error and the caller decides what to do with the row.
#[derive(Debug, Clone)]
pub struct CustomSearchProvider {
    base_url: String,
    http: Client,
    api_key: String,
    engine_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent entirely when the query has no results.
    #[serde(default)]
    items: Vec<SearchHit>,
}

impl CustomSearchProvider {
    pub fn new(base_url: Option<&str>, api_key: &str, engine_id: &str) -> Result<Self> {
        let base_url = base_url
            .unwrap_or("https://www.googleapis.com")
            .trim_end_matches('/')
            .to_string();
        let http = Client::builder()
            .user_agent("cardcube/0.1")
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url,
            http,
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl SearchProvider for CustomSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{}/customsearch/v1", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "custom search returned {status}: {}",
                truncate_for_log(body, 300)
            );
        }

        let payload: SearchResponse = resp.json().await?;
        Ok(payload.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_items_deserializes_to_empty() {
        let payload: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.items.is_empty());
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        // "é" is two bytes; byte 300 lands inside it.
        let body = format!("{}é", "a".repeat(299));
        let out = truncate_for_log(body, 300);
        assert_eq!(out, format!("{}…", "a".repeat(299)));
    }

    #[test]
    fn short_bodies_pass_through_untruncated() {
        assert_eq!(truncate_for_log("oops".into(), 300), "oops");
    }

    #[test]
    fn items_keep_provider_order() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{"items":[{"link":"https://a"},{"link":"https://b"}]}"#,
        )
        .unwrap();
        let links: Vec<&str> = payload.items.iter().map(|h| h.link.as_str()).collect();
        assert_eq!(links, ["https://a", "https://b"]);
    }
}
