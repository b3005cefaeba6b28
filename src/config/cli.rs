use crate::config::settings::{ReportKind, ReportSettings, SourceSettings};
use crate::config::toml_config::ReportConfig;
use crate::core::FailurePolicy;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "hours-report")]
#[command(about = "Employee work-hours reports: pie chart (PNG) and summary table (HTML)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch time entries and render a pie chart of hours per record
    Chart(ChartArgs),
    /// Aggregate work logs per employee and write an HTML table
    Table(TableArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the report is written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// File name of the report
    #[arg(long)]
    pub output_file: Option<String>,

    /// What to do when the data source fails
    #[arg(long, value_enum)]
    pub on_failure: Option<FailurePolicy>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Report title
    #[arg(long)]
    pub title: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    /// Exit with a non-zero code chosen by error severity
    #[arg(long)]
    pub strict_exit: bool,

    /// Show the resolved settings without fetching or writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Time-entry API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API key sent as the `code` query parameter
    #[arg(long, env = "TIME_ENTRIES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Skip the API and chart the built-in sample data
    #[arg(long, conflicts_with = "endpoint")]
    pub sample: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON file with work logs (replaces the embedded payload)
    #[arg(long, conflicts_with = "endpoint")]
    pub input: Option<String>,

    /// Read work logs from an HTTP endpoint instead
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, env = "TIME_ENTRIES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Rows below this many hours are highlighted
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Chart(args) => &args.common,
            Command::Table(args) => &args.common,
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            Command::Chart(_) => ReportKind::Chart,
            Command::Table(_) => ReportKind::Table,
        }
    }

    /// 合併順序：預設值 < TOML < 命令列
    pub fn resolve(&self) -> Result<ReportSettings> {
        let common = self.common();
        let mut settings = ReportSettings::defaults_for(self.kind());

        if let Some(path) = &common.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = ReportConfig::from_file(path)?;
            settings.apply_config(&config)?;
        }

        match self {
            Command::Chart(args) => {
                if args.sample {
                    settings.source = SourceSettings::Sample;
                }
                if let Some(endpoint) = &args.endpoint {
                    settings.set_endpoint(endpoint.clone());
                }
                if let Some(key) = &args.api_key {
                    settings.set_api_key(key.clone());
                }
            }
            Command::Table(args) => {
                if let Some(input) = &args.input {
                    settings.source = SourceSettings::Inline {
                        path: Some(input.clone()),
                    };
                }
                if let Some(endpoint) = &args.endpoint {
                    settings.set_endpoint(endpoint.clone());
                }
                if let Some(key) = &args.api_key {
                    settings.set_api_key(key.clone());
                }
                if let Some(threshold) = args.threshold {
                    settings.low_hours_threshold = threshold;
                }
            }
        }

        if let Some(timeout) = common.timeout_seconds {
            settings.set_timeout_seconds(timeout);
        }
        if let Some(policy) = common.on_failure {
            settings.failure_policy = policy;
        }
        if let Some(dir) = &common.output_dir {
            settings.output_path = dir.clone();
        }
        if let Some(file) = &common.output_file {
            settings.output_file_name = file.clone();
        }
        if let Some(title) = &common.title {
            settings.title = title.clone();
        }

        Ok(settings)
    }
}
