//! Emotional intensity ranking and bias listing.

use crate::models::{AnalysisRecord, BiasEntry, EmotionalEntry};

/// Rank records by emotional intensity, highest first.
///
/// Stable: equal intensities keep their input order.
pub fn rank_by_emotional_intensity(records: &[AnalysisRecord]) -> Vec<EmotionalEntry> {
    let mut ranked: Vec<EmotionalEntry> = records.iter().map(EmotionalEntry::from).collect();
    ranked.sort_by(|a, b| b.emotional_intensity.total_cmp(&a.emotional_intensity));
    ranked
}

/// Ideological bias per record, in input order.
pub fn bias_comparison(records: &[AnalysisRecord]) -> Vec<BiasEntry> {
    records
        .iter()
        .map(|r| BiasEntry {
            label: r.label.clone(),
            ideological_bias: r.analysis.ideological_bias,
        })
        .collect()
}
