//! HTTP implementation of [`MovieApi`] against the OMDb REST endpoint.
//!
//! # Security Note - Logging
//!
//! OMDb takes its key as the `apikey` query parameter, so request URLs carry
//! the secret. URLs are only ever logged through [`redact_url`], and the key
//! itself is held in a [`SecretBox`] so `Debug` output never shows it.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretBox};
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{MarqueeError, Result};
use crate::movie::MovieDetail;

use super::{MovieApi, SearchQuery, SearchResponse, wire};

const API_KEY_PARAM: &str = "apikey";

/// OMDb provider
pub struct OmdbClient {
    client: Client,
    base_url: Url,
    api_key: SecretBox<String>,
}

impl fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OmdbClient {
    /// Create a client from configuration.
    ///
    /// A missing API key is not an error here: requests go out without one
    /// and the API's own complaint is surfaced to the user.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key().unwrap_or_else(|| {
            tracing::warn!("no OMDb API key configured; requests will be rejected by the API");
            String::new()
        });
        Self::new(&config.api.url, &api_key, config.api_timeout())
    }

    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            api_key: SecretBox::new(Box::new(api_key.to_string())),
        })
    }

    fn url_with(&self, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(API_KEY_PARAM, self.api_key.expose_secret());
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    /// Full request URL for a search, API key included.
    pub fn search_url(&self, query: &SearchQuery) -> Url {
        self.url_with(&query.params())
    }

    /// Full request URL for a detail lookup, API key included.
    pub fn detail_url(&self, id: &str) -> Url {
        self.url_with(&[("i", id.to_string()), ("plot", "full".to_string())])
    }

    /// GET a URL and parse the JSON body.
    ///
    /// The body is parsed even for non-2xx statuses since OMDb reports
    /// application failures (bad key, over quota) as JSON with a 401.
    async fn get_json(&self, url: Url) -> Result<Value> {
        tracing::debug!(url = %redact_url(&url), "OMDb request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(MarqueeError::Status(status.as_u16())),
        }
    }
}

impl MovieApi for OmdbClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let body = self.get_json(self.search_url(query)).await?;
        let response = wire::parse_search(body, query.page)?;

        match &response {
            SearchResponse::Found(page) => tracing::debug!(
                term = %query.term,
                page = page.page,
                total = page.total_results,
                "search answered"
            ),
            SearchResponse::NotFound(message) => {
                tracing::debug!(term = %query.term, %message, "search found nothing")
            }
        }
        Ok(response)
    }

    async fn detail(&self, id: &str) -> Result<MovieDetail> {
        let body = self.get_json(self.detail_url(id)).await?;
        wire::parse_detail(body)
    }
}

/// Render a URL with the `apikey` parameter value replaced.
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == API_KEY_PARAM {
                (k.into_owned(), "[REDACTED]".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
