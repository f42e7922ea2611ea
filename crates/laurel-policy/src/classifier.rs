//! The achievement classifier.

use crate::rules::RuleSet;
use laurel_core::{Achievement, ClassificationDecision};

/// Stateless classifier over a fixed rule set.
///
/// Build one per run and share it by reference; `classify` only reads.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Rules with lower-cased keywords.
    rules: RuleSet,
}

impl Classifier {
    /// Create a classifier. Keywords are lower-cased once here.
    pub fn new(rules: &RuleSet) -> Self {
        tracing::debug!(
            exceptions = rules.exceptions.len(),
            triggers = rules.triggers.len(),
            "Classifier rules loaded"
        );
        Self {
            rules: rules.normalized(),
        }
    }

    /// The (normalized) rules this classifier applies.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Decide the fate of one achievement.
    ///
    /// Exemption is checked against `result` first and wins even when `name`
    /// also contains a trigger word.
    pub fn classify(&self, achievement: &Achievement) -> ClassificationDecision {
        if self.is_exempt(&achievement.result) {
            return ClassificationDecision::Exempt;
        }

        match self.relabel_for(&achievement.name) {
            Some(label) => ClassificationDecision::Relabel(label.to_string()),
            None => ClassificationDecision::Unclassifiable,
        }
    }

    /// Whether a result label contains any exception keyword.
    pub fn is_exempt(&self, result: &str) -> bool {
        let result = result.to_lowercase();
        self.rules
            .exceptions
            .iter()
            .any(|keyword| result.contains(keyword.as_str()))
    }

    /// Label of the first trigger word found in `name`, by priority.
    pub fn relabel_for(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.rules
            .triggers
            .iter()
            .find(|rule| name.contains(rule.keyword.as_str()))
            .map(|rule| rule.label.as_str())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&RuleSet::default())
    }
}
