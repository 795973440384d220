// src/error.rs
use thiserror::Error;

/// Why a search did not produce live results
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("job API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("job API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("job API response could not be decoded: {0}")]
    Decode(String),

    #[error("job API returned no results")]
    EmptyResult,
}

impl FetchError {
    /// Upstream could not be reached or answered badly (as opposed to answering with nothing)
    pub fn is_remote(&self) -> bool {
        !matches!(self, FetchError::EmptyResult)
    }

    /// Short message shown next to fallback data
    pub fn notice(&self) -> &'static str {
        match self {
            FetchError::EmptyResult => "No jobs found for this search.",
            _ => "Job API error.",
        }
    }
}
