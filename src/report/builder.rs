//! Comparison report assembly.

use crate::analysis::risk::check_percentage;
use crate::analysis::{
    bias_comparison, find_common_patterns, find_significant_differences, rank,
    rank_by_emotional_intensity, technique_profiles, validate_threshold,
    DEFAULT_SIGNIFICANCE_THRESHOLD,
};
use crate::error::{CompareError, Result};
use crate::models::{AnalysisRecord, ComparisonReport, RiskEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options recognized by [`build`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Score delta above which consecutive texts are flagged.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }
}

fn default_significance_threshold() -> f64 {
    DEFAULT_SIGNIFICANCE_THRESHOLD
}

/// Build the comparison report for a batch.
///
/// Either the whole report is produced or an `InvalidInput` error is
/// returned; the input is never modified.
pub fn build(records: &[AnalysisRecord], options: &CompareOptions) -> Result<ComparisonReport> {
    validate_threshold(options.significance_threshold)?;
    validate_records(records)?;

    let risk_comparison = rank(records)?.into_iter().map(RiskEntry::from).collect();
    let key_differences = find_significant_differences(records, options.significance_threshold)?;
    let common_patterns = find_common_patterns(records);

    debug!(
        texts = records.len(),
        differences = key_differences.len(),
        shared_techniques = common_patterns.len(),
        "Built comparison report"
    );

    Ok(ComparisonReport {
        risk_comparison,
        key_differences,
        common_patterns,
        emotional_intensity_comparison: rank_by_emotional_intensity(records),
        technique_comparison: technique_profiles(records),
        bias_comparison: bias_comparison(records),
    })
}

/// Reject malformed records before any insight is computed.
fn validate_records(records: &[AnalysisRecord]) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        if record.label.trim().is_empty() {
            return Err(CompareError::invalid_input(format!(
                "record {} has an empty label",
                i + 1
            )));
        }
        check_percentage(
            &record.label,
            "emotional_intensity",
            record.analysis.emotional_intensity,
        )?;
        check_percentage(&record.label, "urgency_score", record.analysis.urgency_score)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropagandaTechnique, RiskLevel};

    fn record(label: &str, score: f64, intensity: f64, techniques: &[&str]) -> AnalysisRecord {
        let mut record = AnalysisRecord::new(label, score, RiskLevel::Medium);
        record.analysis.emotional_intensity = intensity;
        record.analysis.propaganda_techniques = techniques
            .iter()
            .map(|t| PropagandaTechnique::new(*t, 0.7))
            .collect();
        record
    }

    fn sample_batch() -> Vec<AnalysisRecord> {
        vec![
            record("A", 80.0, 30.0, &["Fear Mongering"]),
            record("B", 55.0, 70.0, &["Fear Mongering", "Bandwagon"]),
            record("C", 50.0, 45.0, &[]),
        ]
    }

    #[test]
    fn test_build_full_report() {
        let report = build(&sample_batch(), &CompareOptions::default()).unwrap();

        let ranked: Vec<_> = report
            .risk_comparison
            .iter()
            .map(|e| (e.label.as_str(), e.overall_score))
            .collect();
        assert_eq!(ranked, vec![("A", 80.0), ("B", 55.0), ("C", 50.0)]);

        assert_eq!(report.key_differences.len(), 1);
        assert_eq!(report.key_differences[0].label_a, "A");
        assert_eq!(report.key_differences[0].label_b, "B");
        assert_eq!(report.key_differences[0].difference, 25.0);

        assert_eq!(report.common_patterns.len(), 1);
        assert_eq!(report.common_patterns[0].technique, "Fear Mongering");
        assert_eq!(report.common_patterns[0].labels, vec!["A", "B"]);

        let emotional: Vec<_> = report
            .emotional_intensity_comparison
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(emotional, vec!["B", "C", "A"]);

        assert_eq!(report.technique_comparison.len(), 3);
        assert_eq!(report.bias_comparison.len(), 3);
    }

    #[test]
    fn test_build_is_idempotent() {
        let batch = sample_batch();
        let options = CompareOptions::default();

        let first = serde_json::to_string(&build(&batch, &options).unwrap()).unwrap();
        let second = serde_json::to_string(&build(&batch, &options).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_threshold() {
        let options = CompareOptions {
            significance_threshold: 4.0,
        };
        let report = build(&sample_batch(), &options).unwrap();
        assert_eq!(report.key_differences.len(), 2);
    }

    #[test]
    fn test_single_record_is_rejected() {
        let err = build(&sample_batch()[..1], &CompareOptions::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_six_records_are_accepted() {
        let batch: Vec<_> = (0..6)
            .map(|i| record(&format!("Text {}", i + 1), 10.0 * i as f64, 5.0, &[]))
            .collect();
        let report = build(&batch, &CompareOptions::default()).unwrap();
        assert_eq!(report.risk_comparison.len(), 6);
    }

    #[test]
    fn test_malformed_records_are_rejected() {
        let mut batch = sample_batch();
        batch[1].label = "  ".to_string();
        assert!(build(&batch, &CompareOptions::default()).is_err());

        let mut batch = sample_batch();
        batch[2].analysis.emotional_intensity = 120.0;
        assert!(build(&batch, &CompareOptions::default()).is_err());

        let mut batch = sample_batch();
        batch[0].overall_score = 101.0;
        assert!(build(&batch, &CompareOptions::default()).is_err());
    }

    #[test]
    fn test_options_deserialize_with_default() {
        let options: CompareOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.significance_threshold, 20.0);
    }
}
