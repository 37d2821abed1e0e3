//! Markdown and JSON report generation.
//!
//! This module renders a comparison document for the presentation layer.
//! Rendering never recomputes insights; it only formats what the builder
//! produced.

use crate::models::{
    BiasEntry, CommonPattern, ComparisonDocument, ComparisonReport, EmotionalEntry,
    KeyDifference, ReportMetadata, RiskEntry, RiskLevel, TechniqueProfile,
};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Optional sections of the Markdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownSections {
    pub technique_breakdown: bool,
    pub bias: bool,
}

impl Default for MarkdownSections {
    fn default() -> Self {
        Self {
            technique_breakdown: true,
            bias: true,
        }
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(document: &ComparisonDocument, sections: MarkdownSections) -> String {
    let report = &document.report;
    let mut output = String::new();

    output.push_str("# Comparative Propaganda Analysis\n\n");
    output.push_str(&generate_metadata_section(&document.metadata));
    output.push_str(&generate_summary_section(report));
    output.push_str(&generate_risk_section(&report.risk_comparison));
    output.push_str(&generate_differences_section(
        &report.key_differences,
        document.metadata.significance_threshold,
    ));
    output.push_str(&generate_patterns_section(&report.common_patterns));
    output.push_str(&generate_emotional_section(&report.emotional_intensity_comparison));

    if sections.technique_breakdown {
        output.push_str(&generate_technique_section(&report.technique_comparison));
    }
    if sections.bias {
        output.push_str(&generate_bias_section(&report.bias_comparison));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Texts Compared:** {}\n", metadata.texts_compared));
    section.push_str(&format!(
        "- **Significance Threshold:** {:.1} points\n",
        metadata.significance_threshold
    ));
    if !metadata.sources.is_empty() {
        section.push_str("- **Sources:**\n");
        for source in &metadata.sources {
            section.push_str(&format!("  - `{}`\n", source));
        }
    }
    section.push('\n');

    section
}

/// Generate the summary section.
fn generate_summary_section(report: &ComparisonReport) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");

    let count = |level: RiskLevel| {
        report
            .risk_comparison
            .iter()
            .filter(|e| e.risk_level == level)
            .count()
    };

    section.push_str(&format!(
        "| {} High | {} Medium | {} Low | **Total** |\n",
        RiskLevel::High.emoji(),
        RiskLevel::Medium.emoji(),
        RiskLevel::Low.emoji(),
    ));
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** |\n\n",
        count(RiskLevel::High),
        count(RiskLevel::Medium),
        count(RiskLevel::Low),
        report.risk_comparison.len()
    ));

    if let (Some(highest), Some(lowest)) =
        (report.risk_comparison.first(), report.risk_comparison.last())
    {
        section.push_str(&format!(
            "Highest risk: **{}** ({:.1}). Lowest risk: **{}** ({:.1}).\n\n",
            highest.label, highest.overall_score, lowest.label, lowest.overall_score
        ));
    }

    section
}

/// Generate the risk ranking table.
fn generate_risk_section(entries: &[RiskEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Risk Ranking\n\n");
    section.push_str("| Rank | Text | Score | Risk Level |\n");
    section.push_str("|:---:|:---|:---:|:---|\n");

    for (i, entry) in entries.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {:.1} | {} {} |\n",
            i + 1,
            entry.label,
            entry.overall_score,
            entry.risk_level.emoji(),
            entry.risk_level
        ));
    }
    section.push('\n');

    section
}

/// Generate the key differences section.
fn generate_differences_section(differences: &[KeyDifference], threshold: f64) -> String {
    let mut section = String::new();

    section.push_str("## Key Differences\n\n");

    if differences.is_empty() {
        section.push_str(&format!(
            "No consecutive texts differ by more than {:.1} points.\n\n",
            threshold
        ));
        return section;
    }

    for difference in differences {
        section.push_str(&format!(
            "- **{} vs {}** ({:.1} points): {}\n",
            difference.label_a, difference.label_b, difference.difference, difference.description
        ));
    }
    section.push('\n');

    section
}

/// Generate the shared techniques section.
fn generate_patterns_section(patterns: &[CommonPattern]) -> String {
    let mut section = String::new();

    section.push_str("## Shared Techniques\n\n");

    if patterns.is_empty() {
        section.push_str("No propaganda technique appears in more than one text.\n\n");
        return section;
    }

    section.push_str("| Technique | Texts |\n");
    section.push_str("|:---|:---|\n");
    for pattern in patterns {
        section.push_str(&format!(
            "| {} | {} |\n",
            pattern.technique,
            pattern.labels.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the emotional intensity table.
fn generate_emotional_section(entries: &[EmotionalEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Emotional Intensity\n\n");
    section.push_str("| Text | Emotional Intensity | Urgency |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for entry in entries {
        section.push_str(&format!(
            "| {} | {:.1} | {:.1} |\n",
            entry.label, entry.emotional_intensity, entry.urgency_score
        ));
    }
    section.push('\n');

    section
}

/// Generate the per-text technique breakdown.
fn generate_technique_section(profiles: &[TechniqueProfile]) -> String {
    let mut section = String::new();

    section.push_str("## Technique Breakdown\n\n");
    section.push_str("| Text | Detections | Techniques |\n");
    section.push_str("|:---|:---:|:---|\n");

    for profile in profiles {
        let techniques = if profile.unique_techniques.is_empty() {
            "-".to_string()
        } else {
            profile.unique_techniques.join(", ")
        };
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            profile.label, profile.technique_count, techniques
        ));
    }
    section.push('\n');

    section
}

/// Generate the bias table, skipped when no text reports a bias.
fn generate_bias_section(entries: &[BiasEntry]) -> String {
    if entries.iter().all(|e| e.ideological_bias.is_none()) {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Ideological Bias\n\n");
    section.push_str("| Text | Bias |\n");
    section.push_str("|:---|:---:|\n");

    for entry in entries {
        let bias = entry
            .ideological_bias
            .map(|b| format!("{:+.1}", b))
            .unwrap_or_else(|| "n/a".to_string());
        section.push_str(&format!("| {} | {} |\n", entry.label, bias));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by PropCompare v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(document: &ComparisonDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(Into::into)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
