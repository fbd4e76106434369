//! Structured logging setup.
//!
//! The library only emits `tracing` events; binaries install a subscriber
//! through [`init_logging`]. Options:
//! - stdout in pretty, json or compact form
//! - a single log file
//! - daily-rotated run and diagnostic files via tracing-appender
//!
//! # Component Targets
//!
//! | Target | Description |
//! |--------|-------------|
//! | `hazard_qra::reference` | Reference table loading and validation |
//! | `hazard_qra::inventory` | Inventory and released mass |
//! | `hazard_qra::physics` | Physical effect zones |
//! | `hazard_qra::scenario` | Scenario generation per equipment |
//! | `hazard_qra::risk` | Risk aggregation |
//!
//! ```bash
//! # Trace every generated scenario, keep the rest at warn
//! RUST_LOG=warn,hazard_qra::scenario=debug qra run project.toml
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON format (best for log aggregation)
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{other}' (pretty|json|compact)")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Directory for rotated log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Write daily-rotated run and diagnostic files into `log_dir`
    #[serde(default)]
    pub enable_rotation: bool,

    /// Level for the run log (INFO+ by default)
    #[serde(default = "default_run_level")]
    pub run_level: String,

    /// Enable stdout logging (default: true)
    #[serde(default = "default_enable_stdout")]
    pub enable_stdout: bool,

    /// Format for stdout logging
    #[serde(default)]
    pub stdout_format: LogFormat,

    /// Optional single log file path
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_run_level() -> String {
    "info".to_string()
}

fn default_enable_stdout() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            enable_rotation: false,
            run_level: default_run_level(),
            enable_stdout: default_enable_stdout(),
            stdout_format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Pretty stdout, no files.
    pub fn development() -> Self {
        Self::default()
    }

    /// JSON stdout plus rotated files under `log_dir`.
    pub fn batch(log_dir: PathBuf) -> Self {
        Self {
            log_dir,
            enable_rotation: true,
            stdout_format: LogFormat::Json,
            ..Default::default()
        }
    }

    /// Log to a single file.
    pub fn with_log_file(log_file: String) -> Self {
        Self {
            log_file: Some(log_file),
            ..Default::default()
        }
    }

    /// Add daily-rotated run and diagnostic files under `log_dir`.
    pub fn with_log_dir(mut self, log_dir: PathBuf) -> Self {
        self.log_dir = log_dir;
        self.enable_rotation = true;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.stdout_format = format;
        self
    }
}

/// Initialize logging based on configuration.
///
/// Returns the `WorkerGuard`s of the non-blocking writers; keep them alive
/// until the program exits so buffered events are flushed.
///
/// ```ignore
/// let _guards = init_logging(&LogConfig::development(), Some("debug"))?;
/// ```
pub fn init_logging(
    config: &LogConfig,
    env_filter_override: Option<&str>,
) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let mut guards = Vec::new();

    let base_filter = match env_filter_override {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // Console events go to stderr so stdout stays clean for JSON results
    if config.enable_rotation {
        std::fs::create_dir_all(&config.log_dir)?;

        // Run log (INFO+, all components)
        let run_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "qra-run.log");
        let (run_writer, guard1) = tracing_appender::non_blocking(run_appender);
        guards.push(guard1);

        let run_layer = fmt::layer()
            .with_writer(run_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new(&config.run_level));

        // Diagnostic log (DEBUG+, physics and scenario generation)
        let diagnostic_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "qra-diagnostic.log");
        let (diagnostic_writer, guard2) = tracing_appender::non_blocking(diagnostic_appender);
        guards.push(guard2);

        let diagnostic_filter = EnvFilter::new(format!(
            "{}=debug,{}=debug,{}=debug",
            targets::INVENTORY,
            targets::PHYSICS,
            targets::SCENARIO
        ));

        let diagnostic_layer = fmt::layer()
            .with_writer(diagnostic_writer)
            .with_ansi(false)
            .json()
            .with_filter(diagnostic_filter);

        if config.enable_stdout {
            match config.stdout_format {
                LogFormat::Json => {
                    tracing_subscriber::registry()
                        .with(run_layer)
                        .with(diagnostic_layer)
                        .with(
                            fmt::layer()
                                .with_writer(std::io::stderr)
                                .json()
                                .with_filter(base_filter),
                        )
                        .try_init()?;
                }
                LogFormat::Compact => {
                    tracing_subscriber::registry()
                        .with(run_layer)
                        .with(diagnostic_layer)
                        .with(
                            fmt::layer()
                                .with_writer(std::io::stderr)
                                .compact()
                                .with_filter(base_filter),
                        )
                        .try_init()?;
                }
                LogFormat::Pretty => {
                    tracing_subscriber::registry()
                        .with(run_layer)
                        .with(diagnostic_layer)
                        .with(
                            fmt::layer()
                                .with_writer(std::io::stderr)
                                .with_target(false)
                                .with_filter(base_filter),
                        )
                        .try_init()?;
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(run_layer)
                .with(diagnostic_layer)
                .try_init()?;
        }

        eprintln!("Rotated logging enabled: {}", config.log_dir.display());
    } else if let Some(ref log_file) = config.log_file {
        // JSON on both layers keeps the layer types identical
        let file = std::fs::File::create(log_file)?;
        let file = std::sync::Mutex::new(file);

        let file_layer = fmt::layer().with_writer(file).with_ansi(false).json();
        let stdout_layer = fmt::layer().with_writer(std::io::stderr).json();

        tracing_subscriber::registry()
            .with(base_filter)
            .with(stdout_layer)
            .with(file_layer)
            .try_init()?;

        eprintln!("Logging to file: {log_file}");
    } else {
        match config.stdout_format {
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .with_env_filter(base_filter)
                    .with_writer(std::io::stderr)
                    .json()
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::fmt()
                    .with_env_filter(base_filter)
                    .with_writer(std::io::stderr)
                    .compact()
                    .try_init()?;
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .with_env_filter(base_filter)
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .try_init()?;
            }
        }
    }

    Ok(guards)
}

/// Log target constants for component-specific logging.
///
/// ```ignore
/// tracing::debug!(target: targets::PHYSICS, r_1_4 = %zones.r_1_4, "Pool fire zones");
/// ```
pub mod targets {
    /// Reference table loading and validation
    pub const REFERENCE: &str = "hazard_qra::reference";
    /// Inventory and released mass
    pub const INVENTORY: &str = "hazard_qra::inventory";
    /// Physical effect zones
    pub const PHYSICS: &str = "hazard_qra::physics";
    /// Scenario generation
    pub const SCENARIO: &str = "hazard_qra::scenario";
    /// Risk aggregation
    pub const RISK: &str = "hazard_qra::risk";
}
