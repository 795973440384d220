// src/web/types.rs
use crate::core::{FallbackStore, JobFetcher, DEFAULT_TOP_N};
use crate::types::{ExperienceLevel, JobFilter, Query};
use rocket::form::FromForm;
use rocket::serde::Serialize;

/// Largest ranking a client may ask for
pub const MAX_TOP_N: usize = 50;

pub struct ServerState {
    pub fetcher: JobFetcher,
    pub store: FallbackStore,
}

/// Query string of `GET /api/jobs/search`
#[derive(Debug, Default, FromForm)]
pub struct SearchParams {
    pub title: Option<String>,
    pub location: Option<String>,
    pub skill: Option<String>,
    pub experience: Option<String>,
    pub industry: Option<String>,
    pub city: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub require_skill: Option<String>,
    pub top: Option<usize>,
}

impl SearchParams {
    /// Remote query, or the rejected experience value
    pub fn query(&self) -> Result<Query, String> {
        let experience = match self.experience.as_deref() {
            Some(value) => ExperienceLevel::parse(value).ok_or_else(|| value.to_string())?,
            None => ExperienceLevel::Any,
        };

        Ok(Query {
            title: self.title.clone().unwrap_or_default(),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| "India".to_string()),
            skill: self.skill.clone(),
            experience,
            industry: self.industry.clone(),
        })
    }

    pub fn filter(&self) -> JobFilter {
        JobFilter {
            location: self.city.clone(),
            company: self.company.clone(),
            title: self.role.clone(),
            skill: self.require_skill.clone(),
        }
    }

    pub fn top(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP_N).clamp(1, MAX_TOP_N)
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}
