// src/core/pipeline.rs
//! Fetch with fallback: live results are cached, failures fall back to the cache

use crate::core::fallback_store::FallbackStore;
use crate::core::fetcher::JobSource;
use crate::core::normalizer;
use crate::error::FetchError;
use crate::types::{JobTable, Query};
use serde::Serialize;
use tracing::{info, warn};

/// Where a search's rows came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Live,
    /// Upstream failed or found nothing; rows are the last saved result
    Fallback { reason: String },
    /// Upstream failed and nothing was saved before
    Unavailable { reason: String },
}

/// Result of one search action, handed to whoever renders it
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: Query,
    pub table: JobTable,
    pub source: DataSource,
}

impl SearchOutcome {
    pub fn has_data(&self) -> bool {
        !self.table.is_empty()
    }

    /// Message to show alongside the results, if any
    pub fn notice(&self) -> Option<String> {
        match &self.source {
            DataSource::Live => None,
            DataSource::Fallback { reason } => {
                Some(format!("{} Showing results from the last successful search.", reason))
            }
            DataSource::Unavailable { reason } => {
                Some(format!("{} No job data available.", reason))
            }
        }
    }
}

/// Run one search. Never fails: every path ends in live rows, saved rows, or an
/// explicit empty outcome.
pub async fn search_with_fallback<S: JobSource>(
    source: &S,
    store: &FallbackStore,
    query: &Query,
) -> SearchOutcome {
    let failure = match source.search(query).await {
        Ok(values) if !values.is_empty() => {
            let table = normalizer::normalize_values(&values);
            if let Err(e) = store.save(&table).await {
                warn!("Failed to save fallback data: {:#}", e);
            }
            return SearchOutcome {
                query: query.clone(),
                table,
                source: DataSource::Live,
            };
        }
        Ok(_) => FetchError::EmptyResult,
        Err(e) => e,
    };

    warn!("Live search unusable ({}), loading fallback data", failure);
    recover_from_store(store, query, &failure).await
}

async fn recover_from_store(
    store: &FallbackStore,
    query: &Query,
    failure: &FetchError,
) -> SearchOutcome {
    let table = match store.load().await {
        Ok(table) => table,
        Err(e) => {
            warn!("Fallback data unreadable, treating as empty: {:#}", e);
            JobTable::default()
        }
    };

    let reason = failure.notice().to_string();
    let source = if table.is_empty() {
        DataSource::Unavailable { reason }
    } else {
        info!("Serving {} jobs from fallback data", table.len());
        DataSource::Fallback { reason }
    };

    SearchOutcome {
        query: query.clone(),
        table,
        source,
    }
}
