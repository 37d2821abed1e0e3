//! Propaganda technique aggregation across texts.

use crate::models::{AnalysisRecord, CommonPattern, TechniqueProfile};
use std::collections::HashMap;

/// Find techniques exhibited by two or more distinct labels.
///
/// Matching is exact and case-sensitive on the technique name. Confidence is
/// ignored: any detection counts. Entries come out in first-seen technique
/// order and labels in input order.
pub fn find_common_patterns(records: &[AnalysisRecord]) -> Vec<CommonPattern> {
    let mut seen: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        for name in record.technique_names() {
            let slot = *index.entry(name).or_insert_with(|| {
                seen.push((name, Vec::new()));
                seen.len() - 1
            });

            let labels = &mut seen[slot].1;
            if !labels.contains(&record.label.as_str()) {
                labels.push(record.label.as_str());
            }
        }
    }

    seen.into_iter()
        .filter(|(_, labels)| labels.len() >= 2)
        .map(|(technique, labels)| CommonPattern {
            technique: technique.to_string(),
            labels: labels.into_iter().map(String::from).collect(),
        })
        .collect()
}

/// Per-text technique breakdown in input order.
pub fn technique_profiles(records: &[AnalysisRecord]) -> Vec<TechniqueProfile> {
    records
        .iter()
        .map(|record| {
            let mut unique_techniques: Vec<String> = Vec::new();
            for name in record.technique_names() {
                if !unique_techniques.iter().any(|t| t == name) {
                    unique_techniques.push(name.to_string());
                }
            }

            TechniqueProfile {
                label: record.label.clone(),
                technique_count: record.analysis.propaganda_techniques.len(),
                unique_techniques,
            }
        })
        .collect()
}
