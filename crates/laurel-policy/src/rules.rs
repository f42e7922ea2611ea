//! Rule set definitions.
//!
//! A rule set has two parts:
//! - **exceptions**: keywords searched in an achievement's `result`
//! - **triggers**: ordered `(keyword, label)` pairs searched in its `name`
//!
//! Trigger priority is list order. It is kept as a `Vec` so a YAML file
//! reproduces the same priority on every load.
//!
//! ```yaml
//! exceptions: [диплом, грамота]
//! triggers:
//!   - keyword: участник
//!     label: Участие
//!   - keyword: победитель
//!     label: Диплом
//! ```

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Result keywords that exempt an achievement from relabeling.
const DEFAULT_EXCEPTIONS: &[&str] = &[
    "диплом",
    "аттестат",
    "лист",
    "сертификат",
    "дипломант",
    "благодарность",
    "грамота",
];

/// Name trigger words and their labels, highest priority first.
const DEFAULT_TRIGGERS: &[(&str, &str)] = &[
    ("участник", "Участие"),
    ("благодарность", "Благодарность"),
    ("призер", "Диплом"),
    ("призёр", "Диплом"),
    ("победитель", "Диплом"),
];

/// One trigger word and the label it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    pub keyword: String,
    pub label: String,
}

impl TriggerRule {
    pub fn new(keyword: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            label: label.into(),
        }
    }
}

/// Complete set of normalization rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Substrings of `result` that exempt an achievement.
    #[serde(default = "default_exceptions")]
    pub exceptions: Vec<String>,

    /// Substrings of `name` mapped to labels, highest priority first.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<TriggerRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            exceptions: default_exceptions(),
            triggers: default_triggers(),
        }
    }
}

fn default_exceptions() -> Vec<String> {
    DEFAULT_EXCEPTIONS.iter().map(|k| k.to_string()).collect()
}

fn default_triggers() -> Vec<TriggerRule> {
    DEFAULT_TRIGGERS
        .iter()
        .map(|(keyword, label)| TriggerRule::new(*keyword, *label))
        .collect()
}

impl RuleSet {
    /// Load a rule set from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a rule set from YAML content. Missing sections keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, PolicyError> {
        let rules: Self = serde_yaml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject empty keywords and labels.
    ///
    /// An empty keyword would match every achievement.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if let Some(pos) = self.exceptions.iter().position(|k| k.trim().is_empty()) {
            return Err(PolicyError::InvalidRule(format!(
                "exception keyword #{} is empty",
                pos + 1
            )));
        }
        for (pos, rule) in self.triggers.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                return Err(PolicyError::InvalidRule(format!(
                    "trigger #{} has an empty keyword",
                    pos + 1
                )));
            }
            if rule.label.trim().is_empty() {
                return Err(PolicyError::InvalidRule(format!(
                    "trigger '{}' has an empty label",
                    rule.keyword
                )));
            }
        }
        Ok(())
    }

    /// Copy of this rule set with every keyword lower-cased. Labels are kept
    /// as written.
    pub fn normalized(&self) -> Self {
        Self {
            exceptions: self.exceptions.iter().map(|k| k.to_lowercase()).collect(),
            triggers: self
                .triggers
                .iter()
                .map(|rule| TriggerRule::new(rule.keyword.to_lowercase(), rule.label.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trigger_order_is_fixed() {
        let rules = RuleSet::default();
        let keywords: Vec<&str> = rules.triggers.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(
            keywords,
            vec!["участник", "благодарность", "призер", "призёр", "победитель"]
        );
        assert_eq!(rules.exceptions.len(), 7);
    }

    #[test]
    fn yaml_preserves_trigger_order() {
        let yaml = r#"
triggers:
  - keyword: победитель
    label: Диплом
  - keyword: участник
    label: Участие
"#;
        let rules = RuleSet::from_yaml(yaml).unwrap();
        assert_eq!(rules.triggers[0].keyword, "победитель");
        assert_eq!(rules.triggers[1].keyword, "участник");
        // Missing section keeps the defaults
        assert_eq!(rules.exceptions, RuleSet::default().exceptions);
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let yaml = "exceptions: [\"диплом\", \"\"]\n";
        let err = RuleSet::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidRule(_)));
    }

    #[test]
    fn empty_label_is_rejected() {
        let yaml = "triggers:\n  - keyword: лауреат\n    label: \"\"\n";
        let err = RuleSet::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("лауреат"));
    }

    #[test]
    fn normalized_lowercases_keywords_only() {
        let rules = RuleSet {
            exceptions: vec!["ГРАМОТА".to_string()],
            triggers: vec![TriggerRule::new("Лауреат", "Диплом")],
        };
        let normalized = rules.normalized();
        assert_eq!(normalized.exceptions, vec!["грамота".to_string()]);
        assert_eq!(normalized.triggers[0].keyword, "лауреат");
        assert_eq!(normalized.triggers[0].label, "Диплом");
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        fs::write(&path, "exceptions: [аттестат]\n").unwrap();

        let rules = RuleSet::from_file(&path).unwrap();
        assert_eq!(rules.exceptions, vec!["аттестат".to_string()]);
        assert_eq!(rules.triggers.len(), 5);
    }
}
