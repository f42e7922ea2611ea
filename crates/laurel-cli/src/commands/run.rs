//! `laurel run` command implementation.
//!
//! Serves a roster snapshot through [`SnapshotDriver`], runs the relabeling
//! pipeline over the configured pages and writes the audit report.

use anyhow::{Context, Result};
use laurel_audit::{AuditLog, create_review_sink};
use laurel_core::LaurelConfig;
use laurel_policy::Classifier;
use laurel_runtime::{Pipeline, Roster, RunSummary, SnapshotDriver, run_session};
use std::path::PathBuf;

use super::{load_config, load_rules};

/// Arguments of `laurel run`.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub snapshot: PathBuf,
    pub config: Option<PathBuf>,
    pub credentials: Option<PathBuf>,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub all: bool,
    pub output: Option<PathBuf>,
    pub review: Option<PathBuf>,
    pub write_back: bool,
}

impl RunArgs {
    /// Fold command-line overrides into the loaded configuration.
    fn apply_to(&self, config: &mut LaurelConfig) {
        if let Some(credentials) = &self.credentials {
            config.credentials_file = credentials.clone();
        }
        if let Some(from) = self.from {
            config.pages.start = from;
        }
        if self.all {
            config.pages.end = None;
        } else if let Some(to) = self.to {
            config.pages.end = Some(to);
        }
        if let Some(output) = &self.output {
            config.report.path = output.clone();
        }
        if let Some(review) = &self.review {
            config.review.path = Some(review.clone());
        }
    }
}

/// Run the pipeline and return its summary.
pub async fn execute(args: &RunArgs) -> Result<RunSummary> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    // Nothing touches the portal without credentials
    let credentials = config.load_credentials().with_context(|| {
        format!(
            "failed to load credentials from '{}'",
            config.credentials_file.display()
        )
    })?;

    let rules = load_rules(config.rules_file.as_deref())?;
    let review = create_review_sink(&config.review).context("failed to open review output")?;
    let pipeline = Pipeline::new(Classifier::new(&rules), review);

    let roster = Roster::from_file(&args.snapshot)?;
    tracing::info!(
        snapshot = %args.snapshot.display(),
        pages = roster.pages.len(),
        profiles = roster.profile_count(),
        "Loaded roster snapshot"
    );
    let mut driver = SnapshotDriver::new(roster);
    let mut log = AuditLog::with_link_template(config.report.profile_link_template.clone());

    let summary = run_session(&mut driver, &credentials, &pipeline, &mut log, &config.pages)
        .await
        .context("run aborted")?;

    log.write_report(&config.report.path).with_context(|| {
        format!(
            "failed to write report '{}'",
            config.report.path.display()
        )
    })?;

    if args.write_back {
        driver
            .into_roster()
            .write_to(&args.snapshot)
            .context("failed to write roster back")?;
        tracing::info!(snapshot = %args.snapshot.display(), "Saved relabeled roster");
    }

    Ok(summary)
}

/// Entry point for `laurel run`.
pub async fn run(args: RunArgs) -> Result<()> {
    let summary = execute(&args).await?;

    println!("✔ Run complete");
    println!("  Pages visited:     {}", summary.pages_visited);
    println!(
        "  Profiles visited:  {} ({} without achievements, {} repeated)",
        summary.profiles_visited, summary.profiles_skipped, summary.profiles_repeated
    );
    println!("  Achievements:      {}", summary.achievements());
    println!("    needing no edit: {}", summary.exempt);
    println!("    relabeled:       {}", summary.relabeled);
    println!("    flagged:         {}", summary.flagged);

    if summary.flagged > 0 {
        println!();
        println!("⚠️  {} achievement(s) need manual review.", summary.flagged);
    }

    Ok(())
}
