//! Roster snapshots and the offline driver that serves them.
//!
//! A snapshot is a YAML (or JSON) dump of the roster:
//!
//! ```yaml
//! pages:
//!   - profiles:
//!       - id: "1000001"
//!         achievements:
//!           - name: Призер олимпиады
//!             result: Похвальный отзыв
//!       - id: "1000002"
//!         achievements: []
//! ```
//!
//! [`SnapshotDriver`] answers the [`PageDriver`] calls from a snapshot and
//! applies label changes to its in-memory copy.

use crate::driver::{DriverError, PageDriver};
use async_trait::async_trait;
use laurel_core::{Achievement, AchievementRef, Credentials, ProfileId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A whole roster, page by page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub pages: Vec<RosterPage>,
}

/// One roster page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPage {
    #[serde(default)]
    pub profiles: Vec<RosterProfile>,
}

/// One profile and its achievements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterProfile {
    pub id: ProfileId,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl Roster {
    /// Load a snapshot. JSON is accepted as well since it is valid YAML.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read snapshot '{}': {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Write the snapshot, as JSON when the extension is `.json` and as
    /// YAML otherwise.
    pub fn write_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let content = if is_json {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content)?;
        Ok(())
    }

    pub fn profile_count(&self) -> usize {
        self.pages.iter().map(|p| p.profiles.len()).sum()
    }
}

/// A label written through [`SnapshotDriver::apply_label`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedLabel {
    pub target: AchievementRef,
    pub previous: String,
    pub new_label: String,
}

/// Offline [`PageDriver`] over a [`Roster`].
pub struct SnapshotDriver {
    roster: Roster,
    /// (page index, profile index) of every profile id.
    locations: HashMap<ProfileId, (usize, usize)>,
    applied: Vec<AppliedLabel>,
    logged_in_as: Option<String>,
    closed: bool,
}

impl SnapshotDriver {
    pub fn new(roster: Roster) -> Self {
        let mut locations = HashMap::new();
        for (page_idx, page) in roster.pages.iter().enumerate() {
            for (profile_idx, profile) in page.profiles.iter().enumerate() {
                // First listing wins, like a portal link would.
                locations
                    .entry(profile.id.clone())
                    .or_insert((page_idx, profile_idx));
            }
        }
        Self {
            roster,
            locations,
            applied: Vec::new(),
            logged_in_as: None,
            closed: false,
        }
    }

    /// Labels applied so far, in order.
    pub fn applied(&self) -> &[AppliedLabel] {
        &self.applied
    }

    /// Login the session was opened with.
    pub fn logged_in_as(&self) -> Option<&str> {
        self.logged_in_as.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current roster, including applied labels.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn into_roster(self) -> Roster {
        self.roster
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed {
            return Err(DriverError::SessionClosed);
        }
        Ok(())
    }

    fn profile(&self, profile_id: &ProfileId) -> Result<&RosterProfile, DriverError> {
        let &(page, idx) = self
            .locations
            .get(profile_id)
            .ok_or_else(|| DriverError::ProfileNotFound(profile_id.clone()))?;
        Ok(&self.roster.pages[page].profiles[idx])
    }
}

#[async_trait]
impl PageDriver for SnapshotDriver {
    async fn login(&mut self, credentials: &Credentials) -> Result<(), DriverError> {
        self.ensure_open()?;
        tracing::debug!(login = %credentials.login, "Snapshot session opened");
        self.logged_in_as = Some(credentials.login.clone());
        Ok(())
    }

    async fn total_pages(&mut self) -> Result<u32, DriverError> {
        self.ensure_open()?;
        Ok(self.roster.pages.len() as u32)
    }

    async fn profile_ids(&mut self, page: u32) -> Result<Vec<ProfileId>, DriverError> {
        self.ensure_open()?;
        // Pages past the end of the roster are empty, as on the portal.
        let ids: Vec<ProfileId> = page
            .checked_sub(1)
            .and_then(|idx| self.roster.pages.get(idx as usize))
            .map(|p| p.profiles.iter().map(|profile| profile.id.clone()).collect())
            .unwrap_or_default();
        Ok(ids)
    }

    async fn has_achievements(&mut self, profile_id: &ProfileId) -> Result<bool, DriverError> {
        self.ensure_open()?;
        Ok(!self.profile(profile_id)?.achievements.is_empty())
    }

    async fn fetch_achievements(
        &mut self,
        profile_id: &ProfileId,
    ) -> Result<Vec<Achievement>, DriverError> {
        self.ensure_open()?;
        Ok(self.profile(profile_id)?.achievements.clone())
    }

    async fn apply_label(
        &mut self,
        target: &AchievementRef,
        new_label: &str,
    ) -> Result<(), DriverError> {
        self.ensure_open()?;
        let &(page, idx) = self
            .locations
            .get(&target.profile_id)
            .ok_or_else(|| DriverError::ProfileNotFound(target.profile_id.clone()))?;
        let achievement = self.roster.pages[page].profiles[idx]
            .achievements
            .get_mut(target.index)
            .ok_or_else(|| DriverError::AchievementNotFound(target.clone()))?;

        let previous = std::mem::replace(&mut achievement.result, new_label.to_string());
        tracing::debug!(achievement = %target, from = %previous, to = %new_label, "Label applied");
        self.applied.push(AppliedLabel {
            target: target.clone(),
            previous,
            new_label: new_label.to_string(),
        });
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"
pages:
  - profiles:
      - id: "1"
        achievements:
          - name: Призер олимпиады
            result: Похвальный отзыв
      - id: "2"
        achievements: []
  - profiles:
      - id: "3"
"#;

    #[test]
    fn parses_snapshot_with_defaults() {
        let roster = Roster::from_yaml(SNAPSHOT).unwrap();
        assert_eq!(roster.pages.len(), 2);
        assert_eq!(roster.profile_count(), 3);
        assert!(roster.pages[1].profiles[0].achievements.is_empty());
    }

    #[tokio::test]
    async fn answers_driver_calls() {
        let mut driver = SnapshotDriver::new(Roster::from_yaml(SNAPSHOT).unwrap());

        assert_eq!(driver.total_pages().await.unwrap(), 2);
        assert_eq!(
            driver.profile_ids(1).await.unwrap(),
            vec![ProfileId::new("1"), ProfileId::new("2")]
        );
        assert!(driver.profile_ids(7).await.unwrap().is_empty());
        assert!(driver.has_achievements(&ProfileId::new("1")).await.unwrap());
        assert!(!driver.has_achievements(&ProfileId::new("2")).await.unwrap());
        assert_eq!(driver.fetch_achievements(&ProfileId::new("1")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_profile_is_an_error() {
        let mut driver = SnapshotDriver::new(Roster::from_yaml(SNAPSHOT).unwrap());
        let err = driver.has_achievements(&ProfileId::new("404")).await.unwrap_err();
        assert!(matches!(err, DriverError::ProfileNotFound(_)));
    }

    #[tokio::test]
    async fn apply_label_rewrites_result() {
        let mut driver = SnapshotDriver::new(Roster::from_yaml(SNAPSHOT).unwrap());
        let target = AchievementRef::new(ProfileId::new("1"), 0);

        driver.apply_label(&target, "Диплом").await.unwrap();

        assert_eq!(driver.applied().len(), 1);
        assert_eq!(driver.applied()[0].previous, "Похвальный отзыв");
        let roster = driver.into_roster();
        assert_eq!(roster.pages[0].profiles[0].achievements[0].result, "Диплом");
    }

    #[tokio::test]
    async fn apply_label_out_of_range_is_an_error() {
        let mut driver = SnapshotDriver::new(Roster::from_yaml(SNAPSHOT).unwrap());
        let target = AchievementRef::new(ProfileId::new("1"), 5);
        let err = driver.apply_label(&target, "Диплом").await.unwrap_err();
        assert!(matches!(err, DriverError::AchievementNotFound(_)));
    }

    #[tokio::test]
    async fn closed_session_rejects_calls() {
        let mut driver = SnapshotDriver::new(Roster::default());
        driver.login(&Credentials::new("admin", "pw")).await.unwrap();
        assert_eq!(driver.logged_in_as(), Some("admin"));

        driver.close().await.unwrap();
        assert!(driver.is_closed());
        assert!(matches!(
            driver.total_pages().await,
            Err(DriverError::SessionClosed)
        ));
    }

    #[test]
    fn write_to_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let roster = Roster::from_yaml(SNAPSHOT).unwrap();

        let json_path = dir.path().join("roster.json");
        roster.write_to(&json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["pages"][0]["profiles"][0]["id"], "1");

        let yaml_path = dir.path().join("roster.yaml");
        roster.write_to(&yaml_path).unwrap();
        assert_eq!(Roster::from_file(&yaml_path).unwrap(), roster);
    }
}
