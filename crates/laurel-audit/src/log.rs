//! Per-profile audit log.
//!
//! The log is append-only for the whole run: entries are never reordered,
//! merged or dropped, and profiles keep the order in which they were first
//! recorded.

use laurel_core::{DEFAULT_PROFILE_LINK_TEMPLATE, PROFILE_ID_PLACEHOLDER, ProfileId};
use std::collections::HashMap;

/// One recorded decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
}

/// All entries recorded for one profile, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLog {
    pub profile_id: ProfileId,
    pub entries: Vec<LogEntry>,
}

/// Audit log of a run, keyed by profile.
#[derive(Debug, Clone)]
pub struct AuditLog {
    link_template: String,
    run_id: Option<String>,
    profiles: Vec<ProfileLog>,
    /// Position of each profile in `profiles`.
    index: HashMap<ProfileId, usize>,
}

impl AuditLog {
    /// Create an empty log using the default profile link template.
    pub fn new() -> Self {
        Self::with_link_template(DEFAULT_PROFILE_LINK_TEMPLATE)
    }

    /// Create an empty log with a custom link template.
    ///
    /// `{profile_id}` in the template is replaced by the profile id.
    pub fn with_link_template(template: impl Into<String>) -> Self {
        Self {
            link_template: template.into(),
            run_id: None,
            profiles: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Tag the log with the id of the run that produced it.
    pub fn set_run_id(&mut self, run_id: impl Into<String>) {
        self.run_id = Some(run_id.into());
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Append a message to a profile's entries, creating them on first use.
    pub fn record(&mut self, profile_id: &ProfileId, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(profile = %profile_id, message = %message, "Audit entry");

        let pos = match self.index.get(profile_id) {
            Some(&pos) => pos,
            None => {
                self.profiles.push(ProfileLog {
                    profile_id: profile_id.clone(),
                    entries: Vec::new(),
                });
                let pos = self.profiles.len() - 1;
                self.index.insert(profile_id.clone(), pos);
                pos
            }
        };

        self.profiles[pos].entries.push(LogEntry { message });
    }

    /// Profiles in first-recorded order.
    pub fn profiles(&self) -> &[ProfileLog] {
        &self.profiles
    }

    /// Entries recorded for one profile.
    pub fn entries_for(&self, profile_id: &ProfileId) -> Option<&[LogEntry]> {
        self.index
            .get(profile_id)
            .map(|&pos| self.profiles[pos].entries.as_slice())
    }

    /// Link to a profile's achievements page.
    pub fn link_for(&self, profile_id: &ProfileId) -> String {
        self.link_template
            .replace(PROFILE_ID_PLACEHOLDER, profile_id.as_str())
    }

    /// Number of profiles with at least one entry.
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// Total number of entries across all profiles.
    pub fn len(&self) -> usize {
        self.profiles.iter().map(|p| p.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
