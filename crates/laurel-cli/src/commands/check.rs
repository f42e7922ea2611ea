//! `laurel check` command implementation.
//!
//! Validates the configuration before a run:
//! - the config file parses and its sections are consistent
//! - the credentials file exists and is complete
//! - the rule set loads, with warnings for triggers that can never fire

use anyhow::{Result, bail};
use laurel_core::LaurelConfig;
use laurel_policy::RuleSet;
use std::fmt;
use std::path::Path;

use super::{load_config, load_rules};

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Which part of the setup produced the finding.
    pub category: &'static str,
    pub message: String,
}

impl CheckFinding {
    fn new(severity: Severity, category: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
        }
    }
}

/// Findings collected by [`check`].
#[derive(Debug, Default)]
pub struct CheckReport {
    pub findings: Vec<CheckFinding>,
}

impl CheckReport {
    fn add(&mut self, severity: Severity, category: &'static str, message: impl Into<String>) {
        self.findings
            .push(CheckFinding::new(severity, category, message));
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn print_summary(&self) {
        let mut findings: Vec<&CheckFinding> = self.findings.iter().collect();
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));

        for finding in findings {
            println!(
                "[{}] {}: {}",
                finding.severity, finding.category, finding.message
            );
        }

        println!();
        if self.has_errors() {
            println!(
                "❌ {} error(s), {} warning(s)",
                self.count(Severity::Error),
                self.warning_count()
            );
        } else if self.warning_count() > 0 {
            println!("✔ Configuration OK ({} warning(s))", self.warning_count());
        } else {
            println!("✔ Configuration OK");
        }
    }
}

/// Check configuration, credentials and rules. Never fails itself; problems
/// are returned as findings.
pub fn check(config_path: Option<&Path>, credentials: Option<&Path>) -> CheckReport {
    let mut report = CheckReport::default();

    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            report.add(Severity::Error, "config", format!("{:#}", e));
            return report;
        }
    };
    if let Some(credentials) = credentials {
        config.credentials_file = credentials.to_path_buf();
    }

    check_credentials(&config, &mut report);
    check_pages(&config, &mut report);
    check_outputs(&config, &mut report);

    match load_rules(config.rules_file.as_deref()) {
        Ok(rules) => check_rules(&rules, &mut report),
        Err(e) => report.add(Severity::Error, "rules", format!("{:#}", e)),
    }

    report
}

fn check_credentials(config: &LaurelConfig, report: &mut CheckReport) {
    match config.load_credentials() {
        Ok(credentials) => report.add(
            Severity::Info,
            "credentials",
            format!("logging in as '{}'", credentials.login),
        ),
        Err(e) => report.add(Severity::Error, "credentials", e.to_string()),
    }
}

fn check_pages(config: &LaurelConfig, report: &mut CheckReport) {
    let pages = &config.pages;
    let message = match pages.end {
        Some(end) => format!("pages {}..={}", pages.start, end),
        None => format!("pages {}.. up to the last roster page", pages.start),
    };
    report.add(Severity::Info, "pages", message);
}

fn check_outputs(config: &LaurelConfig, report: &mut CheckReport) {
    report.add(
        Severity::Info,
        "report",
        format!("report written to {}", config.report.path.display()),
    );
    match &config.review.path {
        Some(path) => report.add(
            Severity::Info,
            "review",
            format!("review items appended to {}", path.display()),
        ),
        None => report.add(
            Severity::Warning,
            "review",
            "review.path is not set; flagged achievements only appear in the log output",
        ),
    }
}

fn check_rules(rules: &RuleSet, report: &mut CheckReport) {
    let rules = rules.normalized();
    report.add(
        Severity::Info,
        "rules",
        format!(
            "{} exception keyword(s), {} trigger(s)",
            rules.exceptions.len(),
            rules.triggers.len()
        ),
    );

    // A trigger never fires when an earlier keyword is contained in its own
    for (pos, rule) in rules.triggers.iter().enumerate() {
        if let Some(earlier) = rules.triggers[..pos]
            .iter()
            .find(|earlier| rule.keyword.contains(earlier.keyword.as_str()))
        {
            report.add(
                Severity::Warning,
                "rules",
                format!(
                    "trigger '{}' is shadowed by earlier trigger '{}'",
                    rule.keyword, earlier.keyword
                ),
            );
        }
    }

    if rules.triggers.is_empty() {
        report.add(
            Severity::Warning,
            "rules",
            "no triggers defined; every non-exempt achievement goes to manual review",
        );
    }
}

/// Entry point for `laurel check`.
pub fn run(config: Option<&Path>, credentials: Option<&Path>) -> Result<()> {
    match config {
        Some(path) => println!("Checking {}", path.display()),
        None => println!("Checking default configuration"),
    }
    println!();

    let report = check(config, credentials);
    report.print_summary();

    if report.has_errors() {
        bail!("configuration check failed");
    }
    Ok(())
}
