use async_trait::async_trait;
use laurel_core::{Achievement, AchievementRef, Credentials, ProfileId};
use thiserror::Error;

/// Errors a page driver reports once its own waiting and fallbacks are exhausted.
///
/// Every variant aborts the run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("profile '{0}' not found")]
    ProfileNotFound(ProfileId),

    #[error("achievement {0} not found")]
    AchievementNotFound(AchievementRef),

    #[error("driver session is closed")]
    SessionClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One stateful portal session (an authenticated browser context, an HTTP
/// client with cookies, a fixture, ...).
///
/// Implementations absorb expected conditions themselves: a readiness wait
/// that times out on a best-effort check means "already satisfied", and a
/// missing achievements marker means "no achievements". Methods take
/// `&mut self` because a session must not be driven by two runs at once.
#[async_trait]
pub trait PageDriver: Send {
    /// Open the session. Called once, before any page is visited.
    async fn login(&mut self, credentials: &Credentials) -> Result<(), DriverError> {
        let _ = credentials;
        Ok(())
    }

    /// Number of roster pages the portal reports.
    async fn total_pages(&mut self) -> Result<u32, DriverError>;

    /// Profile ids listed on a roster page (1-based), in display order.
    async fn profile_ids(&mut self, page: u32) -> Result<Vec<ProfileId>, DriverError>;

    /// Whether the profile has any achievements.
    async fn has_achievements(&mut self, profile_id: &ProfileId) -> Result<bool, DriverError>;

    /// The profile's achievements, in display order.
    async fn fetch_achievements(
        &mut self,
        profile_id: &ProfileId,
    ) -> Result<Vec<Achievement>, DriverError>;

    /// Write a new result label for one achievement.
    async fn apply_label(
        &mut self,
        target: &AchievementRef,
        new_label: &str,
    ) -> Result<(), DriverError>;

    /// Release the session. Called exactly once at the end of a run.
    async fn close(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}
