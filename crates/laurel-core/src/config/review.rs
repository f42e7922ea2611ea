//! Manual review output configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where achievements without a matching rule are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// JSON Lines file receiving one record per flagged achievement.
    /// When unset, flagged items are only reported as warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
