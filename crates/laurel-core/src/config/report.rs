//! Audit report configuration.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder substituted with the profile id in link templates.
pub const PROFILE_ID_PLACEHOLDER: &str = "{profile_id}";

/// Default link to a profile's achievements page.
pub const DEFAULT_PROFILE_LINK_TEMPLATE: &str = "https://schools.dnevnik.ru/admin/persons/person.aspx?person={profile_id}&school=1172&view=achievements";

/// Configuration for the XML audit report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output file, written once at the end of a successful run.
    #[serde(default = "default_report_path")]
    pub path: PathBuf,

    /// URL template for the `<link>` element of each profile.
    /// Must contain `{profile_id}`.
    #[serde(default = "default_link_template")]
    pub profile_link_template: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
            profile_link_template: default_link_template(),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.profile_link_template.contains(PROFILE_ID_PLACEHOLDER) {
            return Err(ConfigError::Config(format!(
                "report.profile_link_template must contain {}",
                PROFILE_ID_PLACEHOLDER
            )));
        }
        Ok(())
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("work_log.xml")
}

fn default_link_template() -> String {
    DEFAULT_PROFILE_LINK_TEMPLATE.to_string()
}
