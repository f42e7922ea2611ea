//! Core types shared across all Laurel crates.
//!
//! The data model describes what the portal shows for one profile: an opaque
//! [`ProfileId`] and the list of [`Achievement`] records awarded to it. The
//! [`ClassificationDecision`] is the outcome of running the normalization
//! rules against a single achievement.

use serde::{Deserialize, Serialize};
use std::fmt;

// Configuration types shared across all Laurel crates
pub mod config;

// Re-export commonly used config types for convenience
pub use config::{
    ConfigError, Credentials, LaurelConfig, PagesConfig, ReportConfig, ReviewConfig,
    DEFAULT_PROFILE_LINK_TEMPLATE, PROFILE_ID_PLACEHOLDER,
};

/// Opaque identifier of a profile on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProfileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One awarded item as displayed on a profile's achievements page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Free-form title of the achievement (e.g. "Призер олимпиады").
    pub name: String,
    /// Displayed result label (e.g. "Похвальный отзыв").
    pub result: String,
}

impl Achievement {
    pub fn new(name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: result.into(),
        }
    }
}

/// Handle to an achievement on the portal: its position in the list the
/// driver returned for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AchievementRef {
    pub profile_id: ProfileId,
    pub index: usize,
}

impl AchievementRef {
    pub fn new(profile_id: ProfileId, index: usize) -> Self {
        Self { profile_id, index }
    }
}

impl fmt::Display for AchievementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.profile_id, self.index)
    }
}

/// What the normalization rules decided for one achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "label", rename_all = "snake_case")]
pub enum ClassificationDecision {
    /// The result label is already acceptable.
    Exempt,
    /// The result label must be rewritten to the given value.
    Relabel(String),
    /// No rule matched; the achievement needs manual handling.
    Unclassifiable,
}

impl ClassificationDecision {
    /// Short machine-friendly name of the decision kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Exempt => "exempt",
            Self::Relabel(_) => "relabel",
            Self::Unclassifiable => "unclassifiable",
        }
    }
}

impl fmt::Display for ClassificationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exempt => f.write_str("exempt"),
            Self::Relabel(label) => write!(f, "relabel to '{}'", label),
            Self::Unclassifiable => f.write_str("unclassifiable"),
        }
    }
}
