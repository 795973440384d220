// src/core/filter.rs
use crate::types::{JobFilter, JobRecord, JobTable};
use crate::utils::non_blank;

/// Rows satisfying every non-blank predicate, in input order
pub fn filter(table: &JobTable, predicates: &JobFilter) -> JobTable {
    let matcher = Matcher::new(predicates);
    table.iter().filter(|r| matcher.matches(r)).cloned().collect()
}

/// Predicates lowered once per call
struct Matcher {
    location: Option<String>,
    company: Option<String>,
    title: Option<String>,
    skill: Option<String>,
}

impl Matcher {
    fn new(predicates: &JobFilter) -> Self {
        let lowered = |p: &Option<String>| non_blank(p.as_deref()).map(str::to_lowercase);
        Self {
            location: lowered(&predicates.location),
            company: lowered(&predicates.company),
            title: lowered(&predicates.title),
            skill: non_blank(predicates.skill.as_deref()).map(str::to_string),
        }
    }

    fn matches(&self, record: &JobRecord) -> bool {
        substring(&self.location, &record.job_city)
            && substring(&self.company, &record.employer_name)
            && substring(&self.title, &record.job_title)
            && self
                .skill
                .as_deref()
                .map_or(true, |skill| record.skills.contains(skill))
    }
}

fn substring(needle: &Option<String>, field: &str) -> bool {
    needle
        .as_deref()
        .map_or(true, |n| field.to_lowercase().contains(n))
}
