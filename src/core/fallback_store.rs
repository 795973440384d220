// src/core/fallback_store.rs
//! Last-known-good result set, kept as a flat CSV file

use crate::core::normalizer;
use crate::types::{CachedRow, JobRecord, JobTable, RawJob};
use crate::utils::{read_file_safe, write_file_atomic};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct FallbackStore {
    path: PathBuf,
}

impl FallbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored table wholesale
    pub async fn save(&self, table: &JobTable) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        // Header is written even for an empty table so the file stays self-describing
        writer
            .write_record([
                "employer_name",
                "job_title",
                "job_city",
                "job_country",
                "job_posted_at_datetime_utc",
                "job_required_skills",
                "job_apply_link",
            ])
            .context("Failed to write fallback header")?;
        for record in table {
            writer
                .write_record(to_cached_row(record).as_fields())
                .context("Failed to serialize fallback row")?;
        }
        let content = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush fallback rows: {}", e))?;

        write_file_atomic(&self.path, &content).await?;
        info!(
            "Saved {} jobs to fallback file {}",
            table.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Stored table, or an empty one when nothing was saved yet.
    /// Rows that cannot be read are skipped.
    pub async fn load(&self) -> Result<JobTable> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            warn!("No fallback data found at {}", self.path.display());
            return Ok(JobTable::default());
        }

        let content = read_file_safe(&self.path).await?;
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let mut rows: Vec<RawJob> = Vec::new();
        for (index, result) in reader.deserialize::<CachedRow>().enumerate() {
            match result {
                Ok(row) => rows.push(row.into()),
                Err(e) => warn!("Skipping unreadable fallback row {}: {}", index + 1, e),
            }
        }

        let table = normalizer::normalize(rows);
        info!(
            "Loaded {} jobs from fallback file {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    /// Stored table with repeated postings removed
    pub async fn load_deduplicated(&self) -> Result<JobTable> {
        Ok(self.load().await?.deduplicated())
    }
}

fn to_cached_row(record: &JobRecord) -> CachedRow {
    CachedRow {
        employer_name: Some(record.employer_name.clone()),
        job_title: Some(record.job_title.clone()),
        job_city: Some(record.job_city.clone()),
        job_country: record.job_country.clone(),
        job_posted_at_datetime_utc: record
            .posted_on
            .map(|d| d.format(DATE_FORMAT).to_string()),
        job_required_skills: Some(record.skills.to_string()),
        job_apply_link: Some(record.apply_link.clone()),
        ..Default::default()
    }
}

impl CachedRow {
    fn as_fields(&self) -> [&str; 7] {
        [
            self.employer_name.as_deref().unwrap_or_default(),
            self.job_title.as_deref().unwrap_or_default(),
            self.job_city.as_deref().unwrap_or_default(),
            self.job_country.as_deref().unwrap_or_default(),
            self.job_posted_at_datetime_utc.as_deref().unwrap_or_default(),
            self.job_required_skills.as_deref().unwrap_or_default(),
            self.job_apply_link.as_deref().unwrap_or_default(),
        ]
    }
}
