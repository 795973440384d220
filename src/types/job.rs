// src/types/job.rs
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// City substituted when a posting does not name one
pub const CITY_NOT_SPECIFIED: &str = "Not Specified";

/// Marker written in place of a skill list when nothing was identified
pub const SKILLS_NOT_IDENTIFIED: &str = "N/A";

/// Skills attached to a posting.
///
/// `Identified` is never empty: a record whose explicit skill field and description
/// both yield nothing is `NotIdentified`, which counts for nothing in aggregations
/// and never satisfies a skill filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillSet {
    Identified(Vec<String>),
    NotIdentified,
}

impl SkillSet {
    pub fn from_list(skills: Vec<String>) -> Self {
        if skills.is_empty() {
            SkillSet::NotIdentified
        } else {
            SkillSet::Identified(skills)
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            SkillSet::Identified(skills) => skills,
            SkillSet::NotIdentified => &[],
        }
    }

    /// Case-insensitive exact membership
    pub fn contains(&self, skill: &str) -> bool {
        let wanted = skill.trim().to_lowercase();
        self.as_slice().iter().any(|s| s.to_lowercase() == wanted)
    }
}

impl fmt::Display for SkillSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillSet::Identified(skills) => write!(f, "{}", skills.join(", ")),
            SkillSet::NotIdentified => write!(f, "{}", SKILLS_NOT_IDENTIFIED),
        }
    }
}

impl Serialize for SkillSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SkillSet::Identified(skills) => skills.serialize(serializer),
            SkillSet::NotIdentified => serializer.serialize_str(SKILLS_NOT_IDENTIFIED),
        }
    }
}

/// Canonical row shared by every stage after normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub employer_name: String,
    pub job_title: String,
    pub job_city: String,
    pub job_country: Option<String>,
    pub posted_on: Option<NaiveDate>,
    pub skills: SkillSet,
    pub apply_link: String,
}

/// Ordered result set of one search. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JobTable {
    rows: Vec<JobRecord>,
}

impl JobTable {
    pub fn new(rows: Vec<JobRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[JobRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<JobRecord> {
        self.rows
    }

    /// Cities present in the table, in first-seen order
    pub fn distinct_cities(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.job_city.as_str()))
            .map(|r| r.job_city.clone())
            .collect()
    }

    /// Identified skills present in the table, in first-seen order
    pub fn distinct_skills(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .flat_map(|r| r.skills.as_slice())
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect()
    }

    /// Keeps the first occurrence of each employer/title/city/link combination
    pub fn deduplicated(&self) -> JobTable {
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .iter()
            .filter(|r| {
                seen.insert((
                    r.employer_name.as_str(),
                    r.job_title.as_str(),
                    r.job_city.as_str(),
                    r.apply_link.as_str(),
                ))
            })
            .cloned()
            .collect();
        JobTable { rows }
    }
}

impl From<Vec<JobRecord>> for JobTable {
    fn from(rows: Vec<JobRecord>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<JobRecord> for JobTable {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a JobTable {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
