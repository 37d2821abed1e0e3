//! Risk-level derivation from overall scores.
//!
//! The upstream analyzer assigns `risk_level` against its own thresholds.
//! Callers that want custom thresholds re-derive the levels here before
//! building a comparison, so every record in a batch is judged alike.

use crate::error::{CompareError, Result};
use crate::models::{AnalysisRecord, RiskLevel};
use serde::{Deserialize, Serialize};

/// Score boundaries between risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Scores below this are low risk.
    pub low: f64,
    /// Scores below this (and at or above `low`) are medium risk.
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 34.0,
            medium: 67.0,
        }
    }
}

impl RiskThresholds {
    /// Creates validated thresholds.
    pub fn new(low: f64, medium: f64) -> Result<Self> {
        let thresholds = Self { low, medium };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Requires `0 <= low <= medium <= 100`.
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if in_range(self.low) && in_range(self.medium) && self.low <= self.medium {
            Ok(())
        } else {
            Err(CompareError::invalid_input(format!(
                "risk thresholds must satisfy 0 <= low <= medium <= 100, got low={} medium={}",
                self.low, self.medium
            )))
        }
    }

    /// Map a score to its risk level.
    pub fn level_for(&self, score: f64) -> RiskLevel {
        if score < self.low {
            RiskLevel::Low
        } else if score < self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Re-derive every record's risk level from its overall score.
pub fn reclassify(records: &mut [AnalysisRecord], thresholds: &RiskThresholds) -> Result<()> {
    thresholds.validate()?;

    for record in records.iter_mut() {
        record.risk_level = thresholds.level_for(record.overall_score);
    }

    Ok(())
}
