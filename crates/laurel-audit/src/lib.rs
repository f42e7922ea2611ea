//! # laurel-audit
//!
//! Audit trail for a Laurel run.
//!
//! This crate provides functionality for:
//! - Accumulating one log line per processed achievement, grouped by profile
//! - Serializing the log into an XML report (and reading it back)
//! - Routing achievements no rule can classify to a manual review sink
//!
//! ## Report Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <data run="…">
//!   <profile id="1000001234">
//!     <link>https://…person=1000001234…</link>
//!     <achievement>achievement 'Участник конкурса' needs no edit</achievement>
//!   </profile>
//! </data>
//! ```
//!
//! Profiles appear in the order they were first recorded; messages in the
//! order they were recorded.
//!
//! ## Example Usage
//!
//! ```rust
//! use laurel_audit::{AuditLog, parse_report};
//! use laurel_core::ProfileId;
//!
//! let mut log = AuditLog::new();
//! log.record(&ProfileId::new("42"), "achievement 'Участник конкурса' needs no edit");
//!
//! let xml = log.serialize().unwrap();
//! let report = parse_report(&xml).unwrap();
//! assert_eq!(report.profiles[0].messages.len(), 1);
//! ```

pub mod error;
pub mod log;
pub mod report;
pub mod review;

pub use error::AuditError;
pub use log::{AuditLog, LogEntry, ProfileLog};
pub use report::{ParsedReport, ProfileReport, parse_report};
pub use review::{
    ConsoleReviewSink, FileReviewSink, MemoryReviewSink, NullReviewSink, ReviewItem, ReviewSink,
    create_review_sink,
};
