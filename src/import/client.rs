//! HTTP access to the remote vocabulary service.

use crate::error::ImportError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, warn};

/// Browser user agent; the service rejects unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36 Edg/136.0.0.0";

/// Where word records and word pages come from.
pub trait WordSource {
    /// Raw JSON listing every word carrying the (already encoded) tag.
    fn fetch_tag_records(&self, encoded_tag: &str) -> Result<Value, ImportError>;

    /// HTML of a single word's page.
    fn fetch_word_page(&self, word_id: &str) -> Result<String, ImportError>;
}

pub struct HttpWordSource {
    client: Client,
    base_url: String,
    start_index: u32,
    page_size: u32,
}

impl HttpWordSource {
    pub fn new(base_url: &str, start_index: u32, page_size: u32) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            start_index,
            page_size,
        })
    }

    fn tag_url(&self, encoded_tag: &str) -> String {
        format!("{}/words/ajax_tags/{}", self.base_url, encoded_tag)
    }

    fn word_url(&self, word_id: &str) -> String {
        format!("{}/words/view/{}", self.base_url, word_id)
    }
}

impl WordSource for HttpWordSource {
    fn fetch_tag_records(&self, encoded_tag: &str) -> Result<Value, ImportError> {
        let url = self.tag_url(encoded_tag);
        debug!("Fetching word list from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("jtStartIndex", self.start_index.to_string()),
                ("jtPageSize", self.page_size.to_string()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(ImportError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.json()?)
    }

    fn fetch_word_page(&self, word_id: &str) -> Result<String, ImportError> {
        let url = self.word_url(word_id);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            // Scraped anyway; no marker means the sentinel.
            warn!("Word page {} returned status {}", url, response.status());
        }
        Ok(response.text()?)
    }
}
