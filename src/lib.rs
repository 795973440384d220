//! Job search dashboard backend: fetches postings from a job search API, keeps the
//! last good result as a CSV fallback, and summarizes results for display.

pub mod core;
pub mod error;
pub mod report;
pub mod search_cli;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::{
    filter, normalize, postings_over_time, search_with_fallback, top_n, Dashboard, DataSource,
    FallbackStore, Field, JobFetcher, JobSource, SearchOutcome,
};
pub use error::FetchError;
pub use types::{ExperienceLevel, JobFilter, JobRecord, JobTable, Query, SkillSet};
