//! Run summary aggregation.

use crate::types::Classification;
use serde::Serialize;
use std::collections::BTreeSet;

/// A declared name flagged as a likely typo, with the trusted names it
/// is close to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TypoAlert {
    pub name: String,
    pub suggestions: Vec<String>,
}

/// Accumulates classification outcomes across the run.
///
/// Typo alerts keep manifest order; risk names collapse into a set so
/// the same risky candidate surfaced by two different declared names
/// is reported once.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    typo_alerts: Vec<TypoAlert>,
    risk_names: BTreeSet<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the running collections.
    pub fn record(&mut self, name: &str, outcome: &Classification) {
        match outcome {
            Classification::Allowed | Classification::Clean => {}
            Classification::LikelyTypo { suggestions } => {
                self.typo_alerts.push(TypoAlert {
                    name: name.to_string(),
                    suggestions: suggestions.clone(),
                });
            }
            Classification::ConfusionRisk => {
                self.risk_names.insert(name.to_string());
            }
            Classification::TyposquatRisk { suggestions } => {
                for suggestion in suggestions {
                    self.risk_names.insert(suggestion.clone());
                }
            }
        }
    }

    pub fn typo_alerts(&self) -> &[TypoAlert] {
        &self.typo_alerts
    }

    pub fn risk_names(&self) -> &BTreeSet<String> {
        &self.risk_names
    }

    pub fn has_findings(&self) -> bool {
        !self.typo_alerts.is_empty() || !self.risk_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_and_clean_leave_no_trace() {
        let mut summary = RunSummary::new();
        summary.record("requests", &Classification::Allowed);
        summary.record("safe-pkg", &Classification::Clean);
        assert!(!summary.has_findings());
    }

    #[test]
    fn confusion_risk_records_the_declared_name() {
        let mut summary = RunSummary::new();
        summary.record("internal-tool", &Classification::ConfusionRisk);
        assert!(summary.risk_names().contains("internal-tool"));
    }

    #[test]
    fn typosquat_risk_records_the_suggestions() {
        let mut summary = RunSummary::new();
        summary.record(
            "my-intern-lib",
            &Classification::TyposquatRisk {
                suggestions: vec!["my-internal-lib".to_string()],
            },
        );
        assert!(summary.risk_names().contains("my-internal-lib"));
        assert!(!summary.risk_names().contains("my-intern-lib"));
    }

    #[test]
    fn risk_names_deduplicate() {
        let mut summary = RunSummary::new();
        let outcome = Classification::TyposquatRisk {
            suggestions: vec!["popular-lib".to_string()],
        };
        // Two distinct declared names surface the same risky candidate.
        summary.record("popular-lyb", &outcome);
        summary.record("popular-libb", &outcome);
        assert_eq!(summary.risk_names().len(), 1);
    }

    #[test]
    fn typo_alerts_keep_manifest_order() {
        let mut summary = RunSummary::new();
        summary.record(
            "reqeusts",
            &Classification::LikelyTypo {
                suggestions: vec!["requests".to_string()],
            },
        );
        summary.record(
            "flaskk",
            &Classification::LikelyTypo {
                suggestions: vec!["flask".to_string()],
            },
        );

        let names: Vec<&str> = summary.typo_alerts().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["reqeusts", "flaskk"]);
    }
}
