//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.propcompare.toml` files. Configuration is always an explicit value
//! handed to the engine, never global state.

use crate::cli::{Args, OutputFormat};
use crate::report::{CompareOptions, MarkdownSections};
use crate::scoring::RiskThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".propcompare.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Comparison settings.
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Risk level settings.
    #[serde(default)]
    pub risk: RiskConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "comparison_report.md".to_string()
}

/// Comparison settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Score delta, in points, above which consecutive texts are flagged.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    /// Maximum texts per comparison.
    #[serde(default = "default_max_texts")]
    pub max_texts: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            max_texts: default_max_texts(),
        }
    }
}

fn default_significance_threshold() -> f64 {
    20.0
}

fn default_max_texts() -> usize {
    5
}

/// Risk level derivation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Scores below this are low risk.
    #[serde(default = "default_low")]
    pub low: f64,

    /// Scores below this are medium risk.
    #[serde(default = "default_medium")]
    pub medium: f64,

    /// Re-derive risk levels instead of trusting the analyzer's.
    #[serde(default)]
    pub reclassify: bool,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            reclassify: false,
        }
    }
}

fn default_low() -> f64 {
    34.0
}

fn default_medium() -> f64 {
    67.0
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Include the per-text technique breakdown.
    #[serde(default = "default_true")]
    pub include_technique_breakdown: bool,

    /// Include the ideological bias table.
    #[serde(default = "default_true")]
    pub include_bias: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_technique_breakdown: true,
            include_bias: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(threshold) = args.threshold {
            self.comparison.significance_threshold = threshold;
        }
        if let Some(max_texts) = args.max_texts {
            self.comparison.max_texts = max_texts;
        }

        // Explicit thresholds imply reclassification
        if let Some(low) = args.low_threshold {
            self.risk.low = low;
            self.risk.reclassify = true;
        }
        if let Some(medium) = args.medium_threshold {
            self.risk.medium = medium;
            self.risk.reclassify = true;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Options for the comparison engine.
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            significance_threshold: self.comparison.significance_threshold,
        }
    }

    /// Thresholds for risk level derivation.
    pub fn risk_thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            low: self.risk.low,
            medium: self.risk.medium,
        }
    }

    /// Optional Markdown sections to render.
    pub fn markdown_sections(&self) -> MarkdownSections {
        MarkdownSections {
            technique_breakdown: self.report.include_technique_breakdown,
            bias: self.report.include_bias,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
