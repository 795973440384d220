// src/core/normalizer.rs
//! Maps raw postings onto the canonical row

use crate::types::{
    JobRecord, JobTable, RawJob, RawSkills, SkillSet, CITY_NOT_SPECIFIED, SKILLS_NOT_IDENTIFIED,
};
use crate::utils::{contains_keyword, non_blank, strip_html};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info};

/// Skills looked for in descriptions when the posting lists none, in reporting order
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "SQL",
    "Excel",
    "Power BI",
    "Tableau",
    "Java",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "Rust",
    "Scala",
    "Spark",
    "Hadoop",
    "Kafka",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Linux",
    "Git",
    "React",
    "Node.js",
    "Django",
    "Flask",
    "Pandas",
    "NumPy",
    "TensorFlow",
    "PyTorch",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "Statistics",
    "Data Visualization",
    "ETL",
    "Snowflake",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
];

/// Normalize a batch of API objects
pub fn normalize_values(values: &[Value]) -> JobTable {
    normalize(values.iter().map(RawJob::from_value))
}

/// Normalize a batch of raw records. Never fails: bad fields degrade to sentinels.
pub fn normalize<I>(raw_records: I) -> JobTable
where
    I: IntoIterator<Item = RawJob>,
{
    let table: JobTable = raw_records.into_iter().map(normalize_record).collect();
    info!("Normalized {} job records", table.len());
    table
}

pub fn normalize_record(raw: RawJob) -> JobRecord {
    let posted_on = raw
        .job_posted_at_datetime_utc
        .as_deref()
        .and_then(parse_posted_date)
        .or_else(|| raw.job_posted_at_timestamp.and_then(date_from_timestamp));

    if posted_on.is_none() && raw.job_posted_at_datetime_utc.is_some() {
        debug!(
            "Unparseable posting date '{}' treated as absent",
            raw.job_posted_at_datetime_utc.as_deref().unwrap_or_default()
        );
    }

    let skills = extract_skills(
        raw.job_required_skills.as_ref(),
        raw.job_description.as_deref(),
    );

    JobRecord {
        employer_name: text_or_empty(raw.employer_name),
        job_title: text_or_empty(raw.job_title),
        job_city: non_blank(raw.job_city.as_deref())
            .unwrap_or(CITY_NOT_SPECIFIED)
            .to_string(),
        job_country: non_blank(raw.job_country.as_deref()).map(str::to_string),
        posted_on,
        skills,
        apply_link: text_or_empty(raw.job_apply_link),
    }
}

fn text_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Calendar date of a posting timestamp, or `None` when it cannot be read
pub fn parse_posted_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc().date());
    }

    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

fn date_from_timestamp(seconds: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

/// Explicit skills win, split on commas so no skill holds one; otherwise the description is scanned against the vocabulary
pub fn extract_skills(explicit: Option<&RawSkills>, description: Option<&str>) -> SkillSet {
    let listed: Vec<String> = match explicit {
        Some(RawSkills::List(items)) => items
            .iter()
            .flat_map(|item| item.split(','))
            .filter_map(clean_skill)
            .collect(),
        Some(RawSkills::Text(text)) => text.split(',').filter_map(clean_skill).collect(),
        None => Vec::new(),
    };
    if !listed.is_empty() {
        return SkillSet::Identified(listed);
    }

    let Some(description) = non_blank(description) else {
        return SkillSet::NotIdentified;
    };

    let haystack = strip_html(description).to_lowercase();
    SkillSet::from_list(
        SKILL_VOCABULARY
            .iter()
            .filter(|keyword| contains_keyword(&haystack, keyword))
            .map(|keyword| keyword.to_string())
            .collect(),
    )
}

fn clean_skill(skill: &str) -> Option<String> {
    let skill = skill.trim();
    if skill.is_empty() || skill.eq_ignore_ascii_case(SKILLS_NOT_IDENTIFIED) {
        None
    } else {
        Some(skill.to_string())
    }
}
