// src/types/raw.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Skill field as the source provided it
#[derive(Debug, Clone, PartialEq)]
pub enum RawSkills {
    List(Vec<String>),
    Text(String),
}

/// Job posting before normalization, from the API or the fallback file.
/// Every field is optional; the normalizer decides what missing means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawJob {
    pub employer_name: Option<String>,
    pub job_title: Option<String>,
    pub job_city: Option<String>,
    pub job_country: Option<String>,
    pub job_posted_at_datetime_utc: Option<String>,
    pub job_posted_at_timestamp: Option<i64>,
    pub job_required_skills: Option<RawSkills>,
    pub job_description: Option<String>,
    pub job_apply_link: Option<String>,
}

impl RawJob {
    /// Reads one element of the API's `data` array. Fields of the wrong type are
    /// treated as missing so one odd record never rejects the batch.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| match value.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let job_required_skills = match value.get("job_required_skills") {
            Some(Value::Array(items)) => Some(RawSkills::List(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            Some(Value::String(s)) => Some(RawSkills::Text(s.clone())),
            _ => None,
        };

        let job_posted_at_timestamp = value.get("job_posted_at_timestamp").and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().map(|f| f as i64))
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        });

        Self {
            employer_name: text("employer_name"),
            job_title: text("job_title"),
            job_city: text("job_city"),
            job_country: text("job_country"),
            job_posted_at_datetime_utc: text("job_posted_at_datetime_utc"),
            job_posted_at_timestamp,
            job_required_skills,
            job_description: text("job_description"),
            job_apply_link: text("job_apply_link"),
        }
    }
}

/// One line of the fallback CSV. Column names follow the API field names so files
/// written with the full raw column set still load; unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedRow {
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    pub job_required_skills: Option<String>,
    #[serde(default)]
    pub job_apply_link: Option<String>,
    // Only present in files holding the full raw column set
    #[serde(default)]
    pub job_posted_at_timestamp: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl From<CachedRow> for RawJob {
    fn from(row: CachedRow) -> Self {
        RawJob {
            employer_name: row.employer_name,
            job_title: row.job_title,
            job_city: row.job_city,
            job_country: row.job_country,
            job_posted_at_datetime_utc: row.job_posted_at_datetime_utc,
            job_posted_at_timestamp: row
                .job_posted_at_timestamp
                .as_deref()
                .and_then(parse_timestamp),
            job_required_skills: row.job_required_skills.map(RawSkills::Text),
            job_description: row.job_description,
            job_apply_link: row.job_apply_link,
        }
    }
}

/// Seconds since the epoch; whole-number floats written by spreadsheet tools are accepted
fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}
