// src/core/aggregator.rs
use crate::types::{JobRecord, JobTable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Columns that can be ranked by frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    City,
    Skills,
    Title,
    Company,
}

impl Field {
    fn values<'a>(&self, record: &'a JobRecord) -> Vec<&'a str> {
        match self {
            Field::City => vec![record.job_city.as_str()],
            Field::Title => vec![record.job_title.as_str()],
            Field::Company => vec![record.employer_name.as_str()],
            // Multi-valued: each listed skill counts once; unidentified contributes nothing
            Field::Skills => record.skills.as_slice().iter().map(String::as_str).collect(),
        }
    }
}

/// The `n` most frequent values, highest count first. Ties keep first-seen order.
pub fn top_n(table: &JobTable, field: Field, n: usize) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in table.iter().flat_map(|r| field.values(r)) {
        let next = counts.len();
        let i = *index.entry(value).or_insert(next);
        if i == next {
            counts.push((value, 0));
        }
        counts[i].1 += 1;
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Postings per calendar day, oldest first. Undated rows are left out and
/// days without postings are not filled in.
pub fn postings_over_time(table: &JobTable) -> Vec<(NaiveDate, usize)> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in table.iter().filter_map(|r| r.posted_on) {
        *by_day.entry(date).or_insert(0) += 1;
    }
    by_day.into_iter().collect()
}
