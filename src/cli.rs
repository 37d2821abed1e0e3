//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::RiskLevel;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PropCompare - compare propaganda risk across several analyzed texts
///
/// Reads per-text analysis records (JSON produced by the text analyzer)
/// and reports risk ranking, sharp score jumps between consecutive texts,
/// shared propaganda techniques and emotional intensity.
///
/// Examples:
///   propcompare op_ed.json wire.json
///   propcompare records/ --format json -o comparison.json
///   propcompare a.json b.json c.json --threshold 15 --fail-on high
///   propcompare --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Record files or directories of record files
    ///
    /// Each file holds one record, an array of records, or an analyzer
    /// response with `individual_results`. Directories are searched for
    /// *.json files.
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    pub inputs: Vec<PathBuf>,

    /// Score delta (points) above which consecutive texts are flagged
    #[arg(short, long, value_name = "POINTS", env = "PROPCOMPARE_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .propcompare.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of texts per comparison
    #[arg(long, value_name = "COUNT")]
    pub max_texts: Option<usize>,

    /// Re-derive risk levels: scores below this are low risk
    #[arg(long, value_name = "SCORE")]
    pub low_threshold: Option<f64>,

    /// Re-derive risk levels: scores below this are medium risk
    #[arg(long, value_name = "SCORE")]
    pub medium_threshold: Option<f64>,

    /// Fail if any text is at or above this risk level
    ///
    /// Useful for CI pipelines. Exit code 2 when the level is reached.
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOnLevel>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .propcompare.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Risk level for --fail-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum FailOnLevel {
    Low,
    Medium,
    High,
}

impl From<FailOnLevel> for RiskLevel {
    fn from(level: FailOnLevel) -> Self {
        match level {
            FailOnLevel::Low => RiskLevel::Low,
            FailOnLevel::Medium => RiskLevel::Medium,
            FailOnLevel::High => RiskLevel::High,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err("Threshold must be a non-negative number".to_string());
            }
        }

        if let Some(max_texts) = self.max_texts {
            if max_texts < 2 {
                return Err("Max texts must be at least 2".to_string());
            }
        }

        for score in [self.low_threshold, self.medium_threshold].into_iter().flatten() {
            if !(0.0..=100.0).contains(&score) {
                return Err("Risk thresholds must be between 0 and 100".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            inputs: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
            threshold: None,
            output: None,
            format: None,
            config: None,
            max_texts: None,
            low_threshold: None,
            medium_threshold: None,
            fail_on: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_inputs_and_flags() {
        let args = Args::parse_from([
            "propcompare",
            "records/",
            "extra.json",
            "-t",
            "12.5",
            "--format",
            "json",
            "--fail-on",
            "medium",
        ]);
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.threshold, Some(12.5));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.fail_on, Some(FailOnLevel::Medium));
    }

    #[test]
    fn test_init_config_needs_no_inputs() {
        let args = Args::parse_from(["propcompare", "--init-config"]);
        assert!(args.init_config);
        assert!(args.inputs.is_empty());
        assert!(Args::try_parse_from(["propcompare"]).is_err());
    }

    #[test]
    fn test_validation_negative_threshold() {
        let mut args = make_args();
        args.threshold = Some(-3.0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_risk_thresholds() {
        let mut args = make_args();
        args.medium_threshold = Some(120.0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_fail_on_maps_to_risk_level() {
        assert_eq!(RiskLevel::from(FailOnLevel::High), RiskLevel::High);
        assert!(RiskLevel::from(FailOnLevel::Low) < RiskLevel::from(FailOnLevel::Medium));
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
