//! `laurel report` command implementation.

use anyhow::{Context, Result};
use laurel_audit::{ParsedReport, parse_report};
use std::fs;
use std::path::Path;

/// Per-profile message counts by outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub unchanged: usize,
    pub relabeled: usize,
    pub flagged: usize,
}

impl Tally {
    fn of(messages: &[String]) -> Self {
        let mut tally = Self::default();
        for message in messages {
            if message.starts_with("result of achievement") {
                tally.relabeled += 1;
            } else if message.starts_with("no rule for achievement") {
                tally.flagged += 1;
            } else {
                tally.unchanged += 1;
            }
        }
        tally
    }
}

/// Read and parse a report file.
pub fn load(path: &Path) -> Result<ParsedReport> {
    let xml = fs::read_to_string(path)
        .with_context(|| format!("failed to read report '{}'", path.display()))?;
    parse_report(&xml).with_context(|| format!("'{}' is not a valid report", path.display()))
}

/// Entry point for `laurel report`.
pub fn run(path: &Path) -> Result<()> {
    let report = load(path)?;

    if let Some(run_id) = &report.run_id {
        println!("Run {}", run_id);
    }
    println!(
        "{} profile(s), {} message(s)",
        report.profiles.len(),
        report.message_count()
    );
    println!();

    let mut total = Tally::default();
    for profile in &report.profiles {
        let tally = Tally::of(&profile.messages);
        total.unchanged += tally.unchanged;
        total.relabeled += tally.relabeled;
        total.flagged += tally.flagged;

        println!(
            "{:<12} unchanged {:>3}  relabeled {:>3}  flagged {:>3}",
            profile.profile_id, tally.unchanged, tally.relabeled, tally.flagged
        );
        println!("  {}", profile.link);
    }

    println!();
    println!(
        "Total: {} unchanged, {} relabeled, {} flagged",
        total.unchanged, total.relabeled, total.flagged
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_audit::AuditLog;
    use laurel_core::ProfileId;
    use tempfile::tempdir;

    #[test]
    fn test_tally_by_message_kind() {
        let messages = vec![
            "achievement 'A' needs no edit".to_string(),
            "result of achievement 'B' will be changed to 'Диплом'".to_string(),
            "no rule for achievement 'C', flagged for manual review".to_string(),
            "result of achievement 'D' will be changed to 'Участие'".to_string(),
        ];
        assert_eq!(
            Tally::of(&messages),
            Tally {
                unchanged: 1,
                relabeled: 2,
                flagged: 1,
            }
        );
    }

    #[test]
    fn test_load_written_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("work_log.xml");

        let mut log = AuditLog::new();
        log.set_run_id("run-1");
        log.record(&ProfileId::new("7"), "achievement 'A' needs no edit");
        log.write_report(&path).unwrap();

        let report = load(&path).unwrap();
        assert_eq!(report.run_id.as_deref(), Some("run-1"));
        assert_eq!(report.profiles.len(), 1);
        assert_eq!(report.message_count(), 1);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(&path, "<nope/>").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid report"));
    }
}
