//! Laurel runtime: the traversal pipeline and the page driver boundary.
//!
//! The [`Pipeline`] walks a range of roster pages through a [`PageDriver`],
//! classifies every achievement it finds and records one audit entry per
//! achievement. [`run_session`] wraps a run in a driver session that is
//! always closed, whatever the outcome.

pub mod driver;
pub mod pipeline;
pub mod session;
pub mod snapshot;

pub use driver::{DriverError, PageDriver};
pub use pipeline::{PageRange, Pipeline, PipelineError, RunSummary};
pub use session::run_session;
pub use snapshot::{AppliedLabel, Roster, RosterPage, RosterProfile, SnapshotDriver};
