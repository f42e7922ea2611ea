//! `laurel classify` command implementation.
//!
//! Runs the classifier on one achievement so rule sets can be tried out
//! without a roster.

use anyhow::Result;
use laurel_core::{Achievement, ClassificationDecision};
use laurel_policy::Classifier;
use serde::Serialize;
use std::path::Path;

use super::load_rules;

#[derive(Debug, Serialize)]
struct Classified<'a> {
    name: &'a str,
    result: &'a str,
    decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

impl<'a> Classified<'a> {
    fn new(name: &'a str, result: &'a str, decision: &'a ClassificationDecision) -> Self {
        let label = match decision {
            ClassificationDecision::Relabel(label) => Some(label.as_str()),
            _ => None,
        };
        Self {
            name,
            result,
            decision: decision.kind(),
            label,
        }
    }
}

/// Classify one achievement with the built-in rules or those in `rules`.
pub fn classify(name: &str, result: &str, rules: Option<&Path>) -> Result<ClassificationDecision> {
    let rules = load_rules(rules)?;
    let classifier = Classifier::new(&rules);
    Ok(classifier.classify(&Achievement::new(name, result)))
}

/// Entry point for `laurel classify`.
pub fn run(name: &str, result: &str, rules: Option<&Path>, json: bool) -> Result<()> {
    let decision = classify(name, result, rules)?;

    if json {
        let out = Classified::new(name, result, &decision);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match &decision {
        ClassificationDecision::Exempt => {
            println!("✔ '{}' needs no edit (result '{}' is exempt)", name, result)
        }
        ClassificationDecision::Relabel(label) => {
            println!("✔ '{}' result '{}' becomes '{}'", name, result, label)
        }
        ClassificationDecision::Unclassifiable => {
            println!("⚠️  No rule for '{}', needs manual review", name)
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_classify_with_builtin_rules() {
        let decision = classify("Призёр региональной олимпиады", "Отзыв", None).unwrap();
        assert_eq!(decision, ClassificationDecision::Relabel("Диплом".into()));

        let decision = classify("Участник", "Сертификат участника", None).unwrap();
        assert_eq!(decision, ClassificationDecision::Exempt);
    }

    #[test]
    fn test_classify_with_rules_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        fs::write(
            &path,
            r#"
exceptions: []
triggers:
  - keyword: стипендиат
    label: Стипендия
"#,
        )
        .unwrap();

        let decision = classify("Стипендиат года", "Отзыв", Some(path.as_path())).unwrap();
        assert_eq!(decision, ClassificationDecision::Relabel("Стипендия".into()));

        // Built-in triggers are replaced, not merged
        let decision = classify("Победитель", "Отзыв", Some(path.as_path())).unwrap();
        assert_eq!(decision, ClassificationDecision::Unclassifiable);
    }

    #[test]
    fn test_classify_missing_rules_file() {
        let dir = tempdir().unwrap();
        let err = classify("x", "y", Some(dir.path().join("nope.yaml").as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to load rules"));
    }

    #[test]
    fn test_json_output_shape() {
        let decision = ClassificationDecision::Relabel("Диплом".into());
        let value = serde_json::to_value(Classified::new("Призер", "Отзыв", &decision)).unwrap();
        assert_eq!(value["decision"], "relabel");
        assert_eq!(value["label"], "Диплом");
        assert_eq!(value["name"], "Призер");

        let decision = ClassificationDecision::Unclassifiable;
        let value = serde_json::to_value(Classified::new("x", "y", &decision)).unwrap();
        assert_eq!(value["decision"], "unclassifiable");
        assert!(value.get("label").is_none());
    }
}
