// src/core/config_manager.rs
//! Configuration: optional config.yaml plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_API_URL: &str = "https://jsearch.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "jsearch.p.rapidapi.com";
pub const DEFAULT_FALLBACK_FILE: &str = "fallback_jobs.csv";
pub const DEFAULT_NUM_PAGES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VAR: &str = "JSEARCH_API_KEY";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub host: String,
    pub api_key: String,
    pub num_pages: u32,
    pub timeout_seconds: u64,
}

// Keeps the key out of logs
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("api_key", &"***")
            .field("num_pages", &self.num_pages)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub fallback_path: PathBuf,
}

/// One environment section of config.yaml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSection {
    pub api_url: Option<String>,
    pub api_host: Option<String>,
    pub num_pages: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub fallback_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl ConfigManager {
    /// Load everything a search needs. Fails when the API key is missing.
    pub fn load() -> Result<Self> {
        let section = Self::load_file_section(Path::new("config.yaml"))?;
        let storage = Self::load_storage(&section)?;
        let api = Self::load_api(&section, std::env::var(API_KEY_VAR).ok())?;

        info!(
            "Using job API {} (pages: {}), fallback file {}",
            api.base_url,
            api.num_pages,
            storage.fallback_path.display()
        );

        Ok(Self { api, storage })
    }

    /// Storage settings only, for commands that never call the API
    pub fn load_storage_only() -> Result<StorageConfig> {
        let section = Self::load_file_section(Path::new("config.yaml"))?;
        Self::load_storage(&section)
    }

    fn get_environment() -> String {
        std::env::var("JOB_EXPLORER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Section of config.yaml for the current environment; defaults when the file is absent
    pub fn load_file_section(path: &Path) -> Result<FileSection> {
        if !path.exists() {
            return Ok(FileSection::default());
        }

        let environment = Self::get_environment();
        info!("Loading {} for environment: {}", path.display(), environment);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_file_section(&content, &environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_file_section(content: &str, environment: &str) -> Result<FileSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    fn load_storage(section: &FileSection) -> Result<StorageConfig> {
        let configured = std::env::var("JOB_EXPLORER_FALLBACK_PATH")
            .ok()
            .map(PathBuf::from)
            .or_else(|| section.fallback_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FALLBACK_FILE));

        let fallback_path = if configured.is_absolute() {
            configured
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(configured)
        };

        Ok(StorageConfig { fallback_path })
    }

    fn load_api(section: &FileSection, api_key: Option<String>) -> Result<ApiConfig> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .with_context(|| {
                format!(
                    "{} environment variable not set. Export your job search API key before searching.",
                    API_KEY_VAR
                )
            })?;

        let base_url = std::env::var("JSEARCH_API_URL")
            .ok()
            .or_else(|| section.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let host = std::env::var("JSEARCH_API_HOST")
            .ok()
            .or_else(|| section.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        Ok(ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            host,
            api_key,
            num_pages: section.num_pages.unwrap_or(DEFAULT_NUM_PAGES).max(1),
            timeout_seconds: section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

impl ApiConfig {
    /// Settings for a given endpoint and key, with default paging and timeout
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            host: DEFAULT_API_HOST.to_string(),
            api_key: api_key.into(),
            num_pages: DEFAULT_NUM_PAGES,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_fails_fast() {
        let err = ConfigManager::load_api(&FileSection::default(), None).unwrap_err();
        assert!(err.to_string().contains("JSEARCH_API_KEY"));

        let err = ConfigManager::load_api(&FileSection::default(), Some("   ".into())).unwrap_err();
        assert!(err.to_string().contains("JSEARCH_API_KEY"));
    }

    #[test]
    fn test_file_section_applies() {
        let yaml = r#"
local:
  num_pages: 5
  timeout_seconds: 10
  fallback_path: /var/cache/jobs.csv
production:
  num_pages: 1
"#;
        let local = ConfigManager::parse_file_section(yaml, "local").unwrap();
        assert_eq!(local.num_pages, Some(5));
        assert_eq!(local.fallback_path, Some(PathBuf::from("/var/cache/jobs.csv")));

        let production = ConfigManager::parse_file_section(yaml, "production").unwrap();
        assert_eq!(production.num_pages, Some(1));
        assert_eq!(production.timeout_seconds, None);

        let api = ConfigManager::load_api(&local, Some("secret".into())).unwrap();
        assert_eq!(api.num_pages, 5);
        assert_eq!(api.timeout_seconds, 10);
        assert_eq!(api.api_key, "secret");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(ConfigManager::parse_file_section("local: [unclosed", "local").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let api = ApiConfig::new("http://localhost:1/", "very-secret");
        assert_eq!(api.base_url, "http://localhost:1");
        assert!(!format!("{:?}", api).contains("very-secret"));
    }
}
