//! Configuration types for Laurel.
//!
//! Configuration is loaded from an optional YAML file (`laurel.yaml`) and a
//! mandatory credentials file (`credentials`, JSON). Every section has a
//! default so an empty or absent config file yields a usable configuration.
//!
//! # Configuration Files
//!
//! - **laurel.yaml**: page range, report output, manual review output, rules file
//! - **credentials**: `{"login": "...", "password": "..."}` for the portal session

pub mod credentials;
pub mod pages;
pub mod report;
pub mod review;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use credentials::Credentials;
pub use pages::PagesConfig;
pub use report::{DEFAULT_PROFILE_LINK_TEMPLATE, PROFILE_ID_PLACEHOLDER, ReportConfig};
pub use review::ReviewConfig;

/// Complete Laurel configuration loaded from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaurelConfig {
    /// Path to the JSON credentials file.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,

    /// Roster pages to visit.
    #[serde(default)]
    pub pages: PagesConfig,

    /// Audit report output.
    #[serde(default)]
    pub report: ReportConfig,

    /// Manual review output.
    #[serde(default)]
    pub review: ReviewConfig,

    /// Optional YAML rule set replacing the built-in rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
}

impl Default for LaurelConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
            pages: PagesConfig::default(),
            report: ReportConfig::default(),
            review: ReviewConfig::default(),
            rules_file: None,
        }
    }
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("credentials")
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LaurelConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    ///
    /// An empty document is accepted and yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration and resolve input paths relative to the file.
    ///
    /// `credentials_file` and `rules_file` are resolved against the directory
    /// containing the config file. Output paths are left as written.
    pub fn load_with_context(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::from_file(path)?;

        let base_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        config.credentials_file = resolve(&base_dir, &config.credentials_file);
        if let Some(rules_file) = &config.rules_file {
            config.rules_file = Some(resolve(&base_dir, rules_file));
        }

        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pages.validate()?;
        self.report.validate()?;
        Ok(())
    }

    /// Load the credentials referenced by this configuration.
    pub fn load_credentials(&self) -> Result<Credentials, ConfigError> {
        Credentials::from_file(&self.credentials_file)
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = LaurelConfig::from_yaml("").unwrap();
        assert_eq!(config.credentials_file, PathBuf::from("credentials"));
        assert_eq!(config.pages.start, 1);
        assert_eq!(config.pages.end, Some(10));
        assert_eq!(config.report.path, PathBuf::from("work_log.xml"));
        assert!(config.review.path.is_none());
        assert!(config.rules_file.is_none());
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
credentials_file: secrets/portal.json
pages:
  start: 3
  end: null
report:
  path: out/report.xml
  profile_link_template: "https://portal.example/p/{profile_id}"
review:
  path: out/review.jsonl
rules_file: rules.yaml
"#;
        let config = LaurelConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.pages.start, 3);
        assert_eq!(config.pages.end, None);
        assert_eq!(
            config.report.profile_link_template,
            "https://portal.example/p/{profile_id}"
        );
        assert_eq!(config.review.path, Some(PathBuf::from("out/review.jsonl")));
        assert_eq!(config.rules_file, Some(PathBuf::from("rules.yaml")));
    }

    #[test]
    fn rejects_inverted_page_range() {
        let yaml = "pages:\n  start: 5\n  end: 2\n";
        let err = LaurelConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn load_with_context_resolves_inputs_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("laurel.yaml");
        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, "credentials_file: creds.json").unwrap();
        writeln!(file, "rules_file: rules.yaml").unwrap();
        writeln!(file, "report:\n  path: work_log.xml").unwrap();

        let config = LaurelConfig::load_with_context(&config_path).unwrap();
        assert_eq!(config.credentials_file, dir.path().join("creds.json"));
        assert_eq!(config.rules_file, Some(dir.path().join("rules.yaml")));
        assert_eq!(config.report.path, PathBuf::from("work_log.xml"));
    }
}
