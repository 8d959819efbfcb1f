//! Hybrid category assignment: keyword rules first, zero-shot fallback for
//! whatever the rules cannot place.

use crate::category_rules::{CANDIDATE_LABELS, MISCELLANEOUS, rule_category};
use crate::classifier::ZeroShotClassifier;

/// Outcome of one fallback classification attempt. Low confidence and
/// transport/decode failures are the same non-answer.
#[derive(Debug, Clone, PartialEq)]
enum Fallback {
    Confident(String),
    Degraded,
}

/// Assigns a category to every description. Total: anything the rules and
/// the optional classifier cannot place becomes `Miscellaneous`.
pub struct CategoryAssigner<'a> {
    classifier: Option<&'a dyn ZeroShotClassifier>,
    confidence_threshold: f64,
}

impl<'a> CategoryAssigner<'a> {
    /// Rules only; ambiguous descriptions stay `Miscellaneous`.
    pub fn rules_only() -> Self {
        Self {
            classifier: None,
            confidence_threshold: 0.0,
        }
    }

    /// Rules plus a zero-shot fallback. The classifier handle is built once
    /// by the caller and shared across the batch.
    pub fn with_classifier(classifier: &'a dyn ZeroShotClassifier, confidence_threshold: f64) -> Self {
        Self {
            classifier: Some(classifier),
            confidence_threshold,
        }
    }

    /// Categorize one description. Never fails: categorization must not be
    /// able to abort the pipeline.
    pub fn assign(&self, description: &str) -> String {
        if let Some(category) = rule_category(description) {
            return category.to_string();
        }

        let Some(classifier) = self.classifier else {
            return MISCELLANEOUS.to_string();
        };

        match self.run_fallback(classifier, description) {
            Fallback::Confident(label) => label,
            Fallback::Degraded => MISCELLANEOUS.to_string(),
        }
    }

    fn run_fallback(&self, classifier: &dyn ZeroShotClassifier, description: &str) -> Fallback {
        let ranked = match classifier.classify(description, &CANDIDATE_LABELS) {
            Ok(ranked) => ranked,
            Err(e) => {
                eprintln!("warning: classifier failed for '{}': {e:#}", description);
                return Fallback::Degraded;
            }
        };

        match ranked.first() {
            Some(top) if top.score >= self.confidence_threshold => {
                Fallback::Confident(top.label.clone())
            }
            Some(top) => {
                eprintln!(
                    "warning: low confidence ({:.2}) for '{}', keeping {}",
                    top.score, description, MISCELLANEOUS
                );
                Fallback::Degraded
            }
            None => Fallback::Degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ScoredLabel;
    use anyhow::{Result, bail};

    struct FixedClassifier {
        ranked: Vec<ScoredLabel>,
    }

    impl ZeroShotClassifier for FixedClassifier {
        fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<ScoredLabel>> {
            Ok(self.ranked.clone())
        }
    }

    struct FailingClassifier;

    impl ZeroShotClassifier for FailingClassifier {
        fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<ScoredLabel>> {
            bail!("model endpoint unreachable")
        }
    }

    fn scored(label: &str, score: f64) -> ScoredLabel {
        ScoredLabel {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_rule_hit_never_consults_classifier() {
        // FailingClassifier would warn if it were called; the rule pass
        // must settle "UBER TRIP" on its own.
        let assigner = CategoryAssigner::with_classifier(&FailingClassifier, 0.7);
        assert_eq!(assigner.assign("UBER TRIP 12.34"), "Transportation");
    }

    #[test]
    fn test_rules_only_defaults_to_miscellaneous() {
        let assigner = CategoryAssigner::rules_only();
        assert_eq!(assigner.assign("ZZYZX HOLDINGS 41"), MISCELLANEOUS);
    }

    #[test]
    fn test_confident_fallback_is_accepted() {
        let fixed = FixedClassifier {
            ranked: vec![scored("Entertainment", 0.91), scored("Shopping", 0.05)],
        };
        let assigner = CategoryAssigner::with_classifier(&fixed, 0.7);
        assert_eq!(assigner.assign("ZZYZX HOLDINGS 41"), "Entertainment");
    }

    #[test]
    fn test_low_confidence_degrades_to_miscellaneous() {
        let fixed = FixedClassifier {
            ranked: vec![scored("Entertainment", 0.42)],
        };
        let assigner = CategoryAssigner::with_classifier(&fixed, 0.7);
        assert_eq!(assigner.assign("ZZYZX HOLDINGS 41"), MISCELLANEOUS);
    }

    #[test]
    fn test_classifier_error_degrades_to_miscellaneous() {
        let assigner = CategoryAssigner::with_classifier(&FailingClassifier, 0.7);
        assert_eq!(assigner.assign("ZZYZX HOLDINGS 41"), MISCELLANEOUS);
    }

    #[test]
    fn test_empty_ranking_degrades() {
        let fixed = FixedClassifier { ranked: vec![] };
        let assigner = CategoryAssigner::with_classifier(&fixed, 0.7);
        assert_eq!(assigner.assign("ZZYZX HOLDINGS 41"), MISCELLANEOUS);
    }
}
