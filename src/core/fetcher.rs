// src/core/fetcher.rs
use crate::core::config_manager::ApiConfig;
use crate::error::FetchError;
use crate::types::Query;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use tracing::{error, info};

const SEARCH_ENDPOINT: &str = "/search";

/// Anything that can answer a search with raw job objects
pub trait JobSource {
    fn search(&self, query: &Query) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Client for the remote job search API
pub struct JobFetcher {
    client: Client,
    config: ApiConfig,
}

impl JobFetcher {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// One paginated request. Results come back unvalidated.
    pub async fn fetch(&self, query: &Query) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}{}", self.config.base_url, SEARCH_ENDPOINT);
        let search_text = query.search_text();
        let num_pages = self.config.num_pages.to_string();

        info!("Searching jobs: '{}' ({} pages)", search_text, num_pages);

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&[
                ("query", search_text.as_str()),
                ("page", "1"),
                ("num_pages", num_pages.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Job API error {}: {}", status, body);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let jobs = parsed.data.unwrap_or_default();

        info!("Job API returned {} records", jobs.len());
        Ok(jobs)
    }
}

impl JobSource for JobFetcher {
    fn search(&self, query: &Query) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send {
        self.fetch(query)
    }
}
