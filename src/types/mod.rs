// src/types/mod.rs
pub mod job;
pub mod query;
pub mod raw;

pub use job::{JobRecord, JobTable, SkillSet, CITY_NOT_SPECIFIED, SKILLS_NOT_IDENTIFIED};
pub use query::{ExperienceLevel, JobFilter, Query};
pub use raw::{CachedRow, RawJob, RawSkills};
