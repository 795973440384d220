// src/types/query.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seniority choices offered by the search form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    #[default]
    Any,
    Internship,
    EntryLevel,
    MidSeniorLevel,
    Director,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::Any,
        ExperienceLevel::Internship,
        ExperienceLevel::EntryLevel,
        ExperienceLevel::MidSeniorLevel,
        ExperienceLevel::Director,
    ];

    /// Text appended to the search query; empty for `Any`
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Any => "",
            ExperienceLevel::Internship => "Internship",
            ExperienceLevel::EntryLevel => "Entry level",
            ExperienceLevel::MidSeniorLevel => "Mid-Senior level",
            ExperienceLevel::Director => "Director",
        }
    }

    /// Accepts either the display label ("Mid-Senior level") or the kebab-case name
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim().to_lowercase();
        if wanted.is_empty() || wanted == "any" {
            return Some(ExperienceLevel::Any);
        }
        Self::ALL.into_iter().find(|level| {
            level.label().to_lowercase() == wanted
                || level.label().to_lowercase().replace(' ', "-") == wanted
        })
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One search action's remote query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub title: String,
    pub location: String,
    pub skill: Option<String>,
    #[serde(default)]
    pub experience: ExperienceLevel,
    pub industry: Option<String>,
}

impl Query {
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    pub fn with_experience(mut self, experience: ExperienceLevel) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Free-text query sent upstream: title, location, skill, experience, industry
    pub fn search_text(&self) -> String {
        [
            Some(self.title.as_str()),
            Some(self.location.as_str()),
            self.skill.as_deref(),
            Some(self.experience.label()),
            self.industry.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Post-fetch refinements. `None` or blank values impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilter {
    /// Substring of the city
    pub location: Option<String>,
    /// Substring of the employer name
    pub company: Option<String>,
    /// Substring of the job title
    pub title: Option<String>,
    /// Exact member of the skill set
    pub skill: Option<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        [&self.location, &self.company, &self.title, &self.skill]
            .into_iter()
            .all(|p| p.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}
