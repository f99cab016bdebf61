// ABOUTME: Blocking HTTP client for the Notion REST API
// ABOUTME: Handles throttling, auth headers, cursor pagination, and fail-fast errors

use crate::config::{PageFilter, DEFAULT_API_BASE};
use crate::model::{Block, Page};
use crate::sync::PageSource;
use crate::{Error, Result};
use rand::Rng;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

pub const NOTION_VERSION: &str = "2022-06-28";
const BLOCK_PAGE_SIZE: u32 = 100;

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }

    // Find a valid UTF-8 boundary at or before max_chars
    let mut boundary = max_chars;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    if boundary == 0 {
        return String::new();
    }

    format!("{}...", &s[..boundary])
}

#[derive(Deserialize)]
struct Paginated<T> {
    results: Vec<T>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    database_id: String,
    throttle_min: u64,
    throttle_max: u64,
}

impl ApiClient {
    pub fn new(token: String, database_id: String, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(ApiClient {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_API_BASE.into())
                .trim_end_matches('/')
                .to_string(),
            token,
            database_id,
            throttle_min: 100,
            throttle_max: 300,
        })
    }

    pub fn with_throttle(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.throttle_min = min_ms;
        self.throttle_max = max_ms;
        self
    }

    pub fn disable_throttle(mut self) -> Self {
        self.throttle_min = 0;
        self.throttle_max = 0;
        self
    }

    fn throttle(&self) {
        if self.throttle_max > 0 {
            let sleep_ms = rand::thread_rng().gen_range(self.throttle_min..=self.throttle_max);
            std::thread::sleep(Duration::from_millis(sleep_ms));
        }
    }

    fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
        debug!(endpoint, "Sending request");

        let response = request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .header("Accept", "application/json")
            .header("User-Agent", "notion-sync/0.1 (Rust)")
            .send()?;

        self.throttle();

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            let preview = truncate_str(&message, 100);
            return Err(Error::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                message: preview,
            });
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                endpoint,
                error = %e,
                body = %truncate_str(&body, 500),
                "Failed to parse response"
            );
            Error::Parse(e)
        })
    }

    fn post<T: DeserializeOwned>(&self, endpoint: &str, body: serde_json::Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send(endpoint, self.client.post(&url).json(&body))
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send(endpoint, self.client.get(&url))
    }

    /// All pages matching `filter`, following `next_cursor` until exhausted.
    pub fn query_database(&self, filter: &PageFilter) -> Result<Vec<Page>> {
        let endpoint = format!("/v1/databases/{}/query", self.database_id);
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({
                "filter": {
                    "property": filter.property,
                    "select": { "equals": filter.value }
                }
            });
            if let Some(c) = &cursor {
                body["start_cursor"] = json!(c);
            }

            let resp: Paginated<Page> = self.post(&endpoint, body)?;
            pages.extend(resp.results);

            match resp.next_cursor {
                Some(next) if resp.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(pages)
    }

    /// First page of a page's child blocks. Further pages are not fetched.
    pub fn get_blocks(&self, page_id: &str) -> Result<Vec<Block>> {
        let resp: Paginated<Block> = self.get(&format!(
            "/v1/blocks/{}/children?page_size={}",
            page_id, BLOCK_PAGE_SIZE
        ))?;
        if resp.has_more {
            debug!(page_id, "Block children truncated to first page");
        }
        Ok(resp.results)
    }
}

impl PageSource for ApiClient {
    fn query_pages(&self, filter: &PageFilter) -> Result<Vec<Page>> {
        self.query_database(filter)
    }

    fn fetch_blocks(&self, page_id: &str) -> Result<Vec<Block>> {
        self.get_blocks(page_id)
    }
}
