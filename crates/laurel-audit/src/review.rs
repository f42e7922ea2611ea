//! Manual review sinks.
//!
//! Achievements that no rule can classify are handed to a [`ReviewSink`] in
//! addition to getting a line in the audit log.

use crate::error::AuditError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use laurel_core::{Achievement, ProfileId, ReviewConfig};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// An achievement waiting for a human decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Unique item ID.
    pub item_id: Uuid,

    /// When the item was flagged.
    pub flagged_at: DateTime<Utc>,

    pub profile_id: ProfileId,
    pub achievement_name: String,
    pub achievement_result: String,
}

impl ReviewItem {
    pub fn new(profile_id: &ProfileId, achievement: &Achievement) -> Self {
        Self {
            item_id: Uuid::new_v4(),
            flagged_at: Utc::now(),
            profile_id: profile_id.clone(),
            achievement_name: achievement.name.clone(),
            achievement_result: achievement.result.clone(),
        }
    }
}

/// Destination for items flagged for manual review.
#[async_trait]
pub trait ReviewSink: Send + Sync {
    /// Hand one item over for manual review.
    async fn flag(&self, item: ReviewItem) -> Result<(), AuditError>;
}

/// Create a sink from configuration: a JSON Lines file when a path is set,
/// console warnings otherwise.
pub fn create_review_sink(config: &ReviewConfig) -> Result<Arc<dyn ReviewSink>, AuditError> {
    match &config.path {
        Some(path) => Ok(Arc::new(FileReviewSink::new(path)?)),
        None => Ok(Arc::new(ConsoleReviewSink)),
    }
}

/// Reports flagged items as warnings.
pub struct ConsoleReviewSink;

#[async_trait]
impl ReviewSink for ConsoleReviewSink {
    async fn flag(&self, item: ReviewItem) -> Result<(), AuditError> {
        tracing::warn!(
            profile = %item.profile_id,
            achievement = %item.achievement_name,
            result = %item.achievement_result,
            "Achievement needs manual review"
        );
        Ok(())
    }
}

/// Appends flagged items to a JSON Lines file.
pub struct FileReviewSink {
    path: PathBuf,
    // Serializes appends from concurrent callers.
    lock: Mutex<()>,
}

impl FileReviewSink {
    /// Create a file sink. The parent directory is created if missing; the
    /// file itself is created on the first flagged item.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReviewSink for FileReviewSink {
    async fn flag(&self, item: ReviewItem) -> Result<(), AuditError> {
        let json = serde_json::to_string(&item)?;

        let _guard = self
            .lock
            .lock()
            .map_err(|e| AuditError::ReviewFailed(format!("Failed to acquire lock: {}", e)))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;

        tracing::debug!(
            profile = %item.profile_id,
            path = %self.path.display(),
            "Review item appended"
        );
        Ok(())
    }
}

/// Keeps flagged items in memory.
#[derive(Default)]
pub struct MemoryReviewSink {
    items: Mutex<Vec<ReviewItem>>,
}

impl MemoryReviewSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the items flagged so far, in flagging order.
    pub fn items(&self) -> Vec<ReviewItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReviewSink for MemoryReviewSink {
    async fn flag(&self, item: ReviewItem) -> Result<(), AuditError> {
        self.items
            .lock()
            .map_err(|e| AuditError::ReviewFailed(format!("Failed to acquire lock: {}", e)))?
            .push(item);
        Ok(())
    }
}

/// Discards flagged items.
pub struct NullReviewSink;

#[async_trait]
impl ReviewSink for NullReviewSink {
    async fn flag(&self, _item: ReviewItem) -> Result<(), AuditError> {
        Ok(())
    }
}
