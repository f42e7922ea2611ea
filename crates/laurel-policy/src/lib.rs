//! Laurel normalization policy.
//!
//! Decides, for one achievement, whether its displayed result label is left
//! alone, rewritten to a normalized label, or handed over for manual review.
//!
//! The decision is made in two stages, always in this order:
//!
//! 1. **Exemption** - the lower-cased `result` is searched for any exception
//!    keyword. A hit exempts the achievement regardless of its name.
//! 2. **Relabeling** - the lower-cased `name` is searched for trigger words in
//!    priority order. The first hit decides the new label.
//!
//! When neither stage matches, the achievement is [`ClassificationDecision::Unclassifiable`].
//!
//! ```rust
//! use laurel_core::{Achievement, ClassificationDecision};
//! use laurel_policy::Classifier;
//!
//! let classifier = Classifier::default();
//! let decision = classifier.classify(&Achievement::new("Призер олимпиады", "Похвальный отзыв"));
//! assert_eq!(decision, ClassificationDecision::Relabel("Диплом".to_string()));
//! ```

pub mod classifier;
pub mod error;
pub mod rules;

pub use classifier::Classifier;
pub use error::PolicyError;
pub use rules::{RuleSet, TriggerRule};

pub use laurel_core::ClassificationDecision;
