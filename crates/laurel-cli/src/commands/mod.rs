//! CLI command implementations for Laurel.

pub mod check;
pub mod classify;
pub mod report;
pub mod run;

use anyhow::{Context, Result};
use laurel_core::LaurelConfig;
use laurel_policy::RuleSet;
use std::path::Path;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "laurel.yaml";

/// Load configuration from `path`, or from `./laurel.yaml` when present, or
/// fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<LaurelConfig> {
    match path {
        Some(path) => LaurelConfig::load_with_context(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                LaurelConfig::load_with_context(default_path)
                    .with_context(|| format!("failed to load config '{}'", DEFAULT_CONFIG_FILE))
            } else {
                Ok(LaurelConfig::default())
            }
        }
    }
}

/// Load the rule set from `path`, or the built-in rules when `None`.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => RuleSet::from_file(path)
            .with_context(|| format!("failed to load rules '{}'", path.display())),
        None => Ok(RuleSet::default()),
    }
}
