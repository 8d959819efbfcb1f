//! tally-finance: transaction categorization — deterministic keyword rules
//! with an optional zero-shot classifier fallback.

pub mod assigner;
pub mod category_rules;
pub mod classifier;

pub use assigner::CategoryAssigner;
pub use category_rules::{CANDIDATE_LABELS, MISCELLANEOUS, rule_category};
pub use classifier::{HfZeroShot, ScoredLabel, ZeroShotClassifier};
