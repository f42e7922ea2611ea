//! Traversal pipeline.
//!
//! Visits roster pages in order, every profile on a page in the order the
//! driver lists it, and every achievement of a profile in display order.
//! Each achievement gets exactly one audit entry.

use crate::driver::{DriverError, PageDriver};
use laurel_audit::{AuditError, AuditLog, ReviewItem, ReviewSink};
use laurel_core::{Achievement, AchievementRef, ClassificationDecision, PagesConfig, ProfileId};
use laurel_policy::Classifier;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid page range: {0}")]
    InvalidRange(String),

    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Inclusive, 1-based range of roster pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Result<Self, PipelineError> {
        if start == 0 {
            return Err(PipelineError::InvalidRange(
                "pages are 1-based, start must be at least 1".to_string(),
            ));
        }
        if end < start {
            return Err(PipelineError::InvalidRange(format!(
                "end page {} is before start page {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from configuration. Without a configured end page the
    /// range runs to the last page the driver reports.
    pub async fn resolve<D: PageDriver + ?Sized>(
        config: &PagesConfig,
        driver: &mut D,
    ) -> Result<Self, PipelineError> {
        let end = match config.end {
            Some(end) => end,
            None => {
                let total = driver.total_pages().await?;
                tracing::info!(total_pages = total, "Roster size reported by driver");
                if total < config.start {
                    return Err(PipelineError::InvalidRange(format!(
                        "start page {} is past the last roster page {}",
                        config.start, total
                    )));
                }
                total
            }
        };
        Self::new(config.start, end)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Counters describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub pages_visited: u32,
    pub profiles_visited: usize,
    /// Profiles without achievements.
    pub profiles_skipped: usize,
    /// Profiles listed again after they were already processed.
    pub profiles_repeated: usize,
    pub exempt: usize,
    pub relabeled: usize,
    pub flagged: usize,
}

impl RunSummary {
    /// Number of achievements processed (one audit entry each).
    pub fn achievements(&self) -> usize {
        self.exempt + self.relabeled + self.flagged
    }
}

pub fn exempt_message(name: &str) -> String {
    format!("achievement '{}' needs no edit", name)
}

pub fn relabel_message(name: &str, new_label: &str) -> String {
    format!(
        "result of achievement '{}' will be changed to '{}'",
        name, new_label
    )
}

pub fn review_message(name: &str) -> String {
    format!(
        "no rule for achievement '{}', flagged for manual review",
        name
    )
}

/// Classifies and relabels achievements across a range of roster pages.
pub struct Pipeline {
    classifier: Classifier,
    review: Arc<dyn ReviewSink>,
}

impl Pipeline {
    pub fn new(classifier: Classifier, review: Arc<dyn ReviewSink>) -> Self {
        Self { classifier, review }
    }

    /// Visit every page in `pages` and record one entry per achievement.
    ///
    /// A profile listed more than once is processed on its first appearance
    /// only. Any driver or review sink error aborts the run; entries recorded
    /// up to that point stay in `log`.
    pub async fn run<D: PageDriver + ?Sized>(
        &self,
        driver: &mut D,
        log: &mut AuditLog,
        pages: PageRange,
    ) -> Result<RunSummary, PipelineError> {
        let run_id = match log.run_id() {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                log.set_run_id(id.clone());
                id
            }
        };

        let span = tracing::info_span!("run", run_id = %run_id);
        self.run_pages(driver, log, pages).instrument(span).await
    }

    async fn run_pages<D: PageDriver + ?Sized>(
        &self,
        driver: &mut D,
        log: &mut AuditLog,
        pages: PageRange,
    ) -> Result<RunSummary, PipelineError> {
        tracing::info!(start = pages.start(), end = pages.end(), "Starting run");

        let mut summary = RunSummary::default();
        let mut visited: HashSet<ProfileId> = HashSet::new();

        for page in pages.pages() {
            let profiles = driver.profile_ids(page).await?;
            tracing::info!(page, profiles = profiles.len(), "Processing roster page");

            for profile_id in profiles {
                if !visited.insert(profile_id.clone()) {
                    tracing::debug!(profile = %profile_id, page, "Profile already processed");
                    summary.profiles_repeated += 1;
                    continue;
                }
                summary.profiles_visited += 1;

                if !driver.has_achievements(&profile_id).await? {
                    tracing::debug!(profile = %profile_id, "No achievements");
                    summary.profiles_skipped += 1;
                    continue;
                }

                let achievements = driver.fetch_achievements(&profile_id).await?;
                self.process_profile(driver, log, &profile_id, &achievements, &mut summary)
                    .await?;
            }

            summary.pages_visited += 1;
        }

        tracing::info!(
            pages = summary.pages_visited,
            profiles = summary.profiles_visited,
            skipped = summary.profiles_skipped,
            exempt = summary.exempt,
            relabeled = summary.relabeled,
            flagged = summary.flagged,
            "Run complete"
        );

        Ok(summary)
    }

    async fn process_profile<D: PageDriver + ?Sized>(
        &self,
        driver: &mut D,
        log: &mut AuditLog,
        profile_id: &ProfileId,
        achievements: &[Achievement],
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        for (index, achievement) in achievements.iter().enumerate() {
            let decision = self.classifier.classify(achievement);
            tracing::debug!(
                profile = %profile_id,
                achievement = %achievement.name,
                decision = decision.kind(),
                "Classified"
            );

            match decision {
                ClassificationDecision::Exempt => {
                    log.record(profile_id, exempt_message(&achievement.name));
                    summary.exempt += 1;
                }
                ClassificationDecision::Relabel(new_label) => {
                    let target = AchievementRef::new(profile_id.clone(), index);
                    driver.apply_label(&target, &new_label).await?;
                    log.record(profile_id, relabel_message(&achievement.name, &new_label));
                    summary.relabeled += 1;
                }
                ClassificationDecision::Unclassifiable => {
                    self.review
                        .flag(ReviewItem::new(profile_id, achievement))
                        .await?;
                    log.record(profile_id, review_message(&achievement.name));
                    summary.flagged += 1;
                }
            }
        }
        Ok(())
    }
}
