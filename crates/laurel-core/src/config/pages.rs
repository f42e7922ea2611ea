//! Roster page range configuration.

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Inclusive, 1-based range of roster pages to visit.
///
/// `end: null` means "every page the portal reports". The default visits the
/// first ten pages only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesConfig {
    /// First page to visit.
    #[serde(default = "default_start_page")]
    pub start: u32,

    /// Last page to visit, or `None` for all pages.
    #[serde(default = "default_end_page")]
    pub end: Option<u32>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            start: default_start_page(),
            end: default_end_page(),
        }
    }
}

impl PagesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start == 0 {
            return Err(ConfigError::Config(
                "pages.start must be at least 1 (pages are 1-based)".to_string(),
            ));
        }
        if let Some(end) = self.end {
            if end < self.start {
                return Err(ConfigError::Config(format!(
                    "pages.end ({}) is before pages.start ({})",
                    end, self.start
                )));
            }
        }
        Ok(())
    }
}

fn default_start_page() -> u32 {
    1
}

fn default_end_page() -> Option<u32> {
    Some(10)
}
