//! Shared fixtures for runtime integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use laurel_audit::{AuditError, AuditLog, MemoryReviewSink, ReviewItem, ReviewSink};
use laurel_core::{Achievement, AchievementRef, Credentials, ProfileId};
use laurel_policy::Classifier;
use laurel_runtime::{
    DriverError, PageDriver, Pipeline, Roster, RosterPage, RosterProfile, SnapshotDriver,
};
use std::sync::Arc;

/// Builds a [`Roster`] page by page.
#[derive(Default)]
pub struct RosterBuilder {
    roster: Roster,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new roster page.
    pub fn page(mut self) -> Self {
        self.roster.pages.push(RosterPage::default());
        self
    }

    /// Add a profile to the current page.
    pub fn profile(mut self, id: &str, achievements: &[(&str, &str)]) -> Self {
        if self.roster.pages.is_empty() {
            self.roster.pages.push(RosterPage::default());
        }
        let page = self.roster.pages.last_mut().expect("page exists");
        page.profiles.push(RosterProfile {
            id: ProfileId::new(id),
            achievements: achievements
                .iter()
                .map(|(name, result)| Achievement::new(*name, *result))
                .collect(),
        });
        self
    }

    pub fn build(self) -> Roster {
        self.roster
    }
}

pub fn pipeline() -> (Pipeline, Arc<MemoryReviewSink>) {
    let review = Arc::new(MemoryReviewSink::new());
    let pipeline = Pipeline::new(Classifier::default(), review.clone());
    (pipeline, review)
}

/// Review sink that rejects every item.
pub struct FailingReviewSink;

#[async_trait]
impl ReviewSink for FailingReviewSink {
    async fn flag(&self, item: ReviewItem) -> Result<(), AuditError> {
        Err(AuditError::ReviewFailed(format!(
            "cannot accept '{}'",
            item.achievement_name
        )))
    }
}

pub fn failing_pipeline() -> Pipeline {
    Pipeline::new(Classifier::default(), Arc::new(FailingReviewSink))
}

pub fn messages(log: &AuditLog, id: &str) -> Vec<String> {
    log.entries_for(&ProfileId::new(id))
        .unwrap_or_default()
        .iter()
        .map(|e| e.message.clone())
        .collect()
}

pub fn credentials() -> Credentials {
    Credentials::new("admin", "secret")
}

/// Which driver call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Login,
    Page(u32),
    ApplyLabel,
    Close,
}

/// Wraps a [`SnapshotDriver`], failing one call and recording every call.
pub struct FlakyDriver {
    pub inner: SnapshotDriver,
    pub fail_at: Option<FailAt>,
    pub calls: Vec<String>,
}

impl FlakyDriver {
    pub fn new(roster: Roster, fail_at: Option<FailAt>) -> Self {
        Self {
            inner: SnapshotDriver::new(roster),
            fail_at,
            calls: Vec::new(),
        }
    }

    fn fail(&self, at: FailAt) -> Result<(), DriverError> {
        if self.fail_at == Some(at) {
            return Err(DriverError::Other(anyhow::anyhow!("injected failure at {:?}", at)));
        }
        Ok(())
    }
}

#[async_trait]
impl PageDriver for FlakyDriver {
    async fn login(&mut self, credentials: &Credentials) -> Result<(), DriverError> {
        self.calls.push("login".to_string());
        self.fail(FailAt::Login)?;
        self.inner.login(credentials).await
    }

    async fn total_pages(&mut self) -> Result<u32, DriverError> {
        self.calls.push("total_pages".to_string());
        self.inner.total_pages().await
    }

    async fn profile_ids(&mut self, page: u32) -> Result<Vec<ProfileId>, DriverError> {
        self.calls.push(format!("profile_ids:{}", page));
        self.fail(FailAt::Page(page))?;
        self.inner.profile_ids(page).await
    }

    async fn has_achievements(&mut self, profile_id: &ProfileId) -> Result<bool, DriverError> {
        self.calls.push(format!("has_achievements:{}", profile_id));
        self.inner.has_achievements(profile_id).await
    }

    async fn fetch_achievements(
        &mut self,
        profile_id: &ProfileId,
    ) -> Result<Vec<Achievement>, DriverError> {
        self.calls.push(format!("fetch_achievements:{}", profile_id));
        self.inner.fetch_achievements(profile_id).await
    }

    async fn apply_label(
        &mut self,
        target: &AchievementRef,
        new_label: &str,
    ) -> Result<(), DriverError> {
        self.calls.push(format!("apply_label:{}:{}", target, new_label));
        self.fail(FailAt::ApplyLabel)?;
        self.inner.apply_label(target, new_label).await
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.calls.push("close".to_string());
        self.fail(FailAt::Close)?;
        self.inner.close().await
    }
}
