// src/core/dashboard.rs
use crate::core::aggregator::{self, Field};
use crate::core::pipeline::{DataSource, SearchOutcome};
use crate::types::{JobFilter, JobTable, Query};
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Choices for the post-search refinement selectors, taken from the unfiltered result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Refinements {
    pub cities: Vec<String>,
    pub skills: Vec<String>,
}

/// Everything the presentation layer needs for one search
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub query: Query,
    pub filter: JobFilter,
    pub source: DataSource,
    pub notice: Option<String>,
    pub total_jobs: usize,
    pub matching_jobs: usize,
    pub jobs: JobTable,
    pub top_cities: Vec<ValueCount>,
    pub top_skills: Vec<ValueCount>,
    pub top_titles: Vec<ValueCount>,
    pub top_companies: Vec<ValueCount>,
    pub postings_over_time: Vec<DateCount>,
    pub refinements: Refinements,
}

impl Dashboard {
    pub fn build(outcome: SearchOutcome, filter: JobFilter, top: usize) -> Self {
        let jobs = crate::core::filter::filter(&outcome.table, &filter);
        let ranked = |field| {
            aggregator::top_n(&jobs, field, top)
                .into_iter()
                .map(|(value, count)| ValueCount { value, count })
                .collect::<Vec<_>>()
        };

        let top_cities = ranked(Field::City);
        let top_skills = ranked(Field::Skills);
        let top_titles = ranked(Field::Title);
        let top_companies = ranked(Field::Company);
        let postings_over_time = aggregator::postings_over_time(&jobs)
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect();

        let notice = outcome.notice();
        Self {
            refinements: Refinements {
                cities: outcome.table.distinct_cities(),
                skills: outcome.table.distinct_skills(),
            },
            total_jobs: outcome.table.len(),
            matching_jobs: jobs.len(),
            query: outcome.query,
            filter,
            source: outcome.source,
            notice,
            top_cities,
            top_skills,
            top_titles,
            top_companies,
            postings_over_time,
            jobs,
        }
    }

    /// Headline shown above the table
    pub fn summary(&self) -> String {
        format!(
            "Found {} jobs for '{}' in '{}'",
            self.matching_jobs, self.query.title, self.query.location
        )
    }
}
