//! Quantitative risk assessment tool.
//!
//! Loads a project (site, substances, equipment), generates every accident
//! scenario and writes the scenario list plus the facility risk summary as
//! JSON. Supports:
//! - CLI arguments and TOML config file
//! - Replacement reference tables
//! - Structured logging with tracing

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use hazard_qra::{
    init_logging, AssessmentConfig, FacilitySummary, LogConfig, LogFormat, ParetoMetric, Project,
    ReferenceTables, RiskAggregator, ScenarioGenerator, ScenarioRecord, ScenarioSet,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "qra")]
#[command(version, about = "Quantitative risk assessment of hazardous equipment", long_about = None)]
struct Cli {
    /// Path to assessment config file (defaults apply if missing)
    #[arg(short, long, default_value = "assessment.toml")]
    config: PathBuf,

    /// Reference tables replacing the built-in event trees and failure rates
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,

    /// Directory for daily-rotated run and diagnostic logs
    #[arg(long, conflicts_with = "log_file")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scenarios and aggregate risk for a project
    Run {
        /// Project file (TOML)
        project: PathBuf,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Metric ranked by the Pareto series
        #[arg(long, default_value = "casualty-risk")]
        pareto_metric: ParetoMetric,
    },
    /// Generate a sample config file
    GenerateConfig {
        /// Output file path
        #[arg(short, long, default_value = "assessment.toml")]
        output: PathBuf,
    },
    /// Validate a project against the config and reference tables
    Validate {
        /// Project file (TOML)
        project: PathBuf,
    },
}

// ============================================================================
// Report
// ============================================================================

#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    version: &'static str,
    scenarios: &'a [ScenarioRecord],
    summary: &'a FacilitySummary,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::GenerateConfig { output } = &cli.command {
        return generate_sample_config(output);
    }

    let _guards = setup_logging(&cli)?;
    let config = AssessmentConfig::load(&cli.config)?;
    let tables = load_tables(cli.tables.as_deref())?;

    match &cli.command {
        Commands::Run {
            project,
            output,
            pareto_metric,
        } => run(&config, &tables, project, output.as_deref(), *pareto_metric),
        Commands::Validate { project } => validate(&config, &tables, project),
        Commands::GenerateConfig { .. } => Ok(()),
    }
}

fn log_config(cli: &Cli) -> Result<LogConfig, String> {
    let mut log_config = match &cli.log_file {
        Some(path) => LogConfig::with_log_file(path.clone()),
        None => LogConfig::development(),
    };
    if let Some(dir) = &cli.log_dir {
        log_config = log_config.with_log_dir(dir.clone());
    }
    if let Some(format) = &cli.log_format {
        log_config = log_config.with_format(format.parse::<LogFormat>()?);
    }
    Ok(log_config)
}

fn setup_logging(
    cli: &Cli,
) -> Result<Vec<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    let log_config = log_config(cli)?;
    init_logging(&log_config, cli.log_level.as_deref())
        .map_err(|e| e as Box<dyn std::error::Error>)
}

fn load_tables(path: Option<&Path>) -> Result<ReferenceTables, Box<dyn std::error::Error>> {
    let tables = match path {
        Some(path) => ReferenceTables::from_path(path)?,
        None => ReferenceTables::builtin(),
    };
    Ok(tables)
}

fn generate(
    config: &AssessmentConfig,
    tables: &ReferenceTables,
    project: &Project,
) -> Result<ScenarioSet, Box<dyn std::error::Error>> {
    let generator = ScenarioGenerator::new(tables, config);
    #[cfg(feature = "parallel")]
    let set = generator.generate_project_parallel(project)?;
    #[cfg(not(feature = "parallel"))]
    let set = generator.generate_project(project)?;
    Ok(set)
}

fn run(
    config: &AssessmentConfig,
    tables: &ReferenceTables,
    project_path: &Path,
    output: Option<&Path>,
    metric: ParetoMetric,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::from_path(project_path)?;
    info!(
        project = %project_path.display(),
        object = %project.object.name,
        equipment = project.equipment.len(),
        "Starting assessment"
    );

    let set = generate(config, tables, &project)?;
    let summary = RiskAggregator::new(&config.aggregation).summarize(&set, &project.object, metric);
    if set.is_empty() {
        warn!("Project produced no scenarios");
    }

    let report = Report {
        generated_at: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        scenarios: set.records(),
        summary: &summary,
    };
    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(output = %path.display(), scenarios = set.len(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn validate(
    config: &AssessmentConfig,
    tables: &ReferenceTables,
    project_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    tables.validate()?;
    let project = Project::from_path(project_path)?;
    let set = generate(config, tables, &project)?;
    println!(
        "Project is valid: {} substances, {} equipment, {} scenarios",
        project.substances.len(),
        project.equipment.len(),
        set.len()
    );
    Ok(())
}

fn generate_sample_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = AssessmentConfig::default().to_toml_string()?;

    let with_comments = format!(
        r#"# Hazard QRA Assessment Configuration
# See: qra --help
#
# Every value below is a default; delete what you do not override.

{content}"#
    );

    std::fs::write(path, with_comments)?;
    println!("Sample config written to: {}", path.display());
    Ok(())
}
