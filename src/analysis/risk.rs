//! Risk ranking and significant-difference detection.

use crate::error::{CompareError, Result};
use crate::models::{AnalysisRecord, DifferenceKind, KeyDifference};

/// Default delta, in score points, above which two texts differ significantly.
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 20.0;

/// Smallest batch that can be compared.
pub const MIN_BATCH_SIZE: usize = 2;

/// Check that a score lies in the closed range [0, 100].
pub(crate) fn check_percentage(label: &str, field: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CompareError::invalid_input(format!(
            "{} of '{}' must be between 0 and 100, got {}",
            field, label, value
        )))
    }
}

/// Validate batch size and overall scores.
pub fn validate_scores(records: &[AnalysisRecord]) -> Result<()> {
    if records.len() < MIN_BATCH_SIZE {
        return Err(CompareError::invalid_input(format!(
            "at least {} records required for comparison, got {}",
            MIN_BATCH_SIZE,
            records.len()
        )));
    }

    for record in records {
        check_percentage(&record.label, "overall_score", record.overall_score)?;
    }

    Ok(())
}

/// Rank records by overall score, highest first.
///
/// The sort is stable: records with equal scores keep their input order.
pub fn rank(records: &[AnalysisRecord]) -> Result<Vec<&AnalysisRecord>> {
    validate_scores(records)?;

    let mut ranked: Vec<&AnalysisRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));

    Ok(ranked)
}

/// Find consecutive pairs (in input order) whose score delta exceeds
/// `threshold_points`.
pub fn find_significant_differences(
    records: &[AnalysisRecord],
    threshold_points: f64,
) -> Result<Vec<KeyDifference>> {
    validate_scores(records)?;
    validate_threshold(threshold_points)?;

    let differences = records
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let difference = (a.overall_score - b.overall_score).abs();
            (difference > threshold_points).then(|| KeyDifference {
                kind: DifferenceKind::SignificantRiskDifference,
                label_a: a.label.clone(),
                label_b: b.label.clone(),
                difference,
                description: describe_difference(a, b, difference),
            })
        })
        .collect();

    Ok(differences)
}

/// Validate a significance threshold.
pub fn validate_threshold(threshold_points: f64) -> Result<()> {
    if threshold_points.is_finite() && threshold_points >= 0.0 {
        Ok(())
    } else {
        Err(CompareError::invalid_input(format!(
            "significance threshold must be a non-negative number, got {}",
            threshold_points
        )))
    }
}

fn describe_difference(a: &AnalysisRecord, b: &AnalysisRecord, difference: f64) -> String {
    let (higher, lower) = if a.overall_score >= b.overall_score {
        (a, b)
    } else {
        (b, a)
    };

    format!(
        "{} shows {:.1} points higher risk than {}",
        higher.label, difference, lower.label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    fn record(label: &str, score: f64) -> AnalysisRecord {
        AnalysisRecord::new(label, score, RiskLevel::Medium)
    }

    fn labels<'a>(ranked: &[&'a AnalysisRecord]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_rank_descending() {
        let records = vec![record("C", 50.0), record("A", 80.0), record("B", 55.0)];
        let ranked = rank(&records).unwrap();
        assert_eq!(labels(&ranked), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let records = vec![
            record("first", 40.0),
            record("top", 90.0),
            record("second", 40.0),
            record("third", 40.0),
        ];
        let ranked = rank(&records).unwrap();
        assert_eq!(labels(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_is_permutation_with_non_increasing_scores() {
        let records = vec![
            record("A", 12.0),
            record("B", 99.5),
            record("C", 0.0),
            record("D", 100.0),
            record("E", 12.0),
        ];
        let ranked = rank(&records).unwrap();

        assert_eq!(ranked.len(), records.len());
        for r in &records {
            assert!(ranked.iter().any(|x| std::ptr::eq(*x, r)));
        }
        assert!(ranked
            .windows(2)
            .all(|w| w[0].overall_score >= w[1].overall_score));
    }

    #[test]
    fn test_rank_rejects_single_record() {
        let err = rank(&[record("A", 10.0)]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rank_rejects_out_of_range_score() {
        assert!(rank(&[record("A", 10.0), record("B", 100.5)]).is_err());
        assert!(rank(&[record("A", -1.0), record("B", 10.0)]).is_err());
        assert!(rank(&[record("A", f64::NAN), record("B", 10.0)]).is_err());
    }

    #[test]
    fn test_rank_accepts_six_records() {
        let records: Vec<_> = (0..6)
            .map(|i| record(&format!("T{}", i), i as f64 * 10.0))
            .collect();
        let ranked = rank(&records).unwrap();
        assert_eq!(ranked[0].label, "T5");
        assert_eq!(ranked[5].label, "T0");
    }

    #[test]
    fn test_significant_differences_scenario() {
        let records = vec![record("A", 80.0), record("B", 55.0), record("C", 50.0)];
        let diffs = find_significant_differences(&records, 20.0).unwrap();

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].label_a, "A");
        assert_eq!(diffs[0].label_b, "B");
        assert_eq!(diffs[0].difference, 25.0);
        assert_eq!(
            diffs[0].description,
            "A shows 25.0 points higher risk than B"
        );
    }

    #[test]
    fn test_significant_differences_use_input_order() {
        // Ranked order would pair A/B; input order pairs A/C then C/B.
        let records = vec![record("A", 90.0), record("C", 10.0), record("B", 85.0)];
        let diffs = find_significant_differences(&records, 20.0).unwrap();

        assert_eq!(diffs.len(), 2);
        assert_eq!((diffs[0].label_a.as_str(), diffs[0].label_b.as_str()), ("A", "C"));
        assert_eq!((diffs[1].label_a.as_str(), diffs[1].label_b.as_str()), ("C", "B"));
        assert_eq!(
            diffs[1].description,
            "B shows 75.0 points higher risk than C"
        );
    }

    #[test]
    fn test_delta_equal_to_threshold_is_excluded() {
        let records = vec![record("A", 70.0), record("B", 50.0)];
        assert!(find_significant_differences(&records, 20.0)
            .unwrap()
            .is_empty());
        assert_eq!(
            find_significant_differences(&records, 19.9).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_every_returned_pair_exceeds_threshold() {
        let records = vec![
            record("A", 5.0),
            record("B", 40.0),
            record("C", 45.0),
            record("D", 95.0),
            record("E", 60.0),
        ];
        let threshold = 30.0;
        let diffs = find_significant_differences(&records, threshold).unwrap();

        assert!(diffs.iter().all(|d| d.difference > threshold));
        let flagged: Vec<_> = diffs
            .iter()
            .map(|d| (d.label_a.as_str(), d.label_b.as_str()))
            .collect();
        assert_eq!(flagged, vec![("A", "B"), ("C", "D"), ("D", "E")]);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let records = vec![record("A", 70.0), record("B", 50.0)];
        assert!(find_significant_differences(&records, -1.0).is_err());
        assert!(find_significant_differences(&records, f64::INFINITY).is_err());
    }
}
