//! PropCompare - comparative propaganda-risk analysis CLI
//!
//! Loads per-text analysis records and writes a comparison report.
//!
//! Exit codes:
//!   0 - Success (no text at or above --fail-on, or no --fail-on set)
//!   1 - Runtime error (unreadable input, invalid batch, bad config, etc.)
//!   2 - A text reached the --fail-on risk level

use anyhow::{bail, Context, Result};
use chrono::Utc;
use propcompare::cli::{Args, OutputFormat};
use propcompare::config::{Config, CONFIG_FILE_NAME};
use propcompare::models::{ComparisonDocument, ReportMetadata, RiskLevel};
use propcompare::{analysis, loader, report, scoring};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("PropCompare v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_comparison(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Comparison failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .propcompare.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize thresholds, text limits, and report sections.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete comparison workflow. Returns exit code (0 or 2).
async fn run_comparison(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the per-text analyses
    let files = loader::resolve_inputs(&args.inputs)?;
    println!("📥 Loading analyses from {} file(s)...", files.len());
    let mut batch = loader::load_records(&files).await?;

    // Step 2: Enforce batch bounds (the engine itself accepts any N >= 2)
    let count = batch.records.len();
    if count < analysis::MIN_BATCH_SIZE {
        bail!(
            "At least {} texts required for comparison, found {}",
            analysis::MIN_BATCH_SIZE,
            count
        );
    }
    if count > config.comparison.max_texts {
        bail!(
            "Maximum {} texts allowed for comparison, found {}",
            config.comparison.max_texts,
            count
        );
    }

    if config.risk.reclassify {
        let thresholds = config.risk_thresholds();
        info!(
            "Re-deriving risk levels (low < {}, medium < {})",
            thresholds.low, thresholds.medium
        );
        scoring::reclassify(&mut batch.records, &thresholds)?;
    }

    // Step 3: Build the comparison
    println!("🔬 Comparing {} texts...", count);
    let options = config.compare_options();
    let comparison = report::build(&batch.records, &options)?;

    if comparison.key_differences.is_empty() {
        debug!("No significant differences above {} points", options.significance_threshold);
    }

    // Step 4: Render and save
    let document = ComparisonDocument {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            texts_compared: count,
            significance_threshold: options.significance_threshold,
            sources: batch.sources.clone(),
        },
        report: comparison,
    };

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&document)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&document, config.markdown_sections())
        }
    };

    let output_path = PathBuf::from(&config.general.output);
    report::write_report(&output, &output_path)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    print_summary(&document);
    println!(
        "\n✅ Comparison complete! Report saved to: {}",
        output_path.display()
    );

    // Check --fail-on threshold
    if let Some(fail_level) = args.fail_on {
        let threshold: RiskLevel = fail_level.into();
        let reached = document
            .report
            .risk_comparison
            .iter()
            .any(|e| e.risk_level >= threshold);

        if reached {
            eprintln!(
                "\n⛔ Texts found at or above {} risk. Failing (exit code 2).",
                threshold
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Print a short console summary of the comparison.
fn print_summary(document: &ComparisonDocument) {
    let report = &document.report;

    println!("\n📊 Comparison Summary:");
    for (i, entry) in report.risk_comparison.iter().enumerate() {
        println!(
            "   {}. {} {} ({:.1})",
            i + 1,
            entry.risk_level.emoji(),
            entry.label,
            entry.overall_score
        );
    }
    println!("   Key differences: {}", report.key_differences.len());
    println!("   Shared techniques: {}", report.common_patterns.len());
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
