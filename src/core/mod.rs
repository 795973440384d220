// src/core/mod.rs
//! Search pipeline: fetch, normalize, cache, filter, aggregate

pub mod aggregator;
pub mod config_manager;
pub mod dashboard;
pub mod fallback_store;
pub mod fetcher;
pub mod filter;
pub mod normalizer;
pub mod pipeline;

pub use aggregator::{postings_over_time, top_n, Field};
pub use config_manager::{ApiConfig, ConfigManager, StorageConfig};
pub use dashboard::{Dashboard, DEFAULT_TOP_N};
pub use fallback_store::FallbackStore;
pub use fetcher::{JobFetcher, JobSource};
pub use filter::filter;
pub use normalizer::normalize;
pub use pipeline::{search_with_fallback, DataSource, SearchOutcome};
