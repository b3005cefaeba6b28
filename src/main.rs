use clap::Parser;
use hours_report::config::cli::LogFormat;
use hours_report::utils::error::{ErrorSeverity, ReportError};
use hours_report::utils::{logger, validation::Validate};
use hours_report::{
    ChartPipeline, Cli, LocalStorage, ReportEngine, ReportKind, ReportSettings, TablePipeline,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let common = cli.command.common().clone();

    // 初始化日誌
    match common.log_format {
        LogFormat::Compact => logger::init_cli_logger(common.verbose),
        LogFormat::Json => logger::init_json_logger(common.verbose),
    }

    tracing::info!("Starting hours-report ({:?})", cli.command.kind());

    let outcome = match resolve_settings(&cli) {
        Ok(settings) if common.dry_run => {
            display_settings(&settings);
            tracing::info!("🔍 DRY RUN MODE - nothing fetched or written");
            return;
        }
        Ok(settings) => run(settings).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(output_path) => {
            tracing::info!("✅ Report generated successfully!");
            println!("✅ Report generated: {}", output_path);
        }
        Err(e) => {
            // 預設只印出錯誤，結束碼為 0
            let exit_code = report_failure(&e);
            if common.strict_exit && exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn resolve_settings(cli: &Cli) -> Result<ReportSettings, ReportError> {
    let settings = cli.command.resolve()?;
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }
    tracing::debug!("Resolved settings: {:?}", settings.summary());
    Ok(settings)
}

async fn run(settings: ReportSettings) -> Result<String, ReportError> {
    let storage = LocalStorage::new(settings.output_path.clone());
    let source = settings.build_source();
    let kind = settings.kind;

    match kind {
        ReportKind::Chart => {
            let pipeline = ChartPipeline::new(storage, settings, source);
            ReportEngine::new(pipeline).run().await
        }
        ReportKind::Table => {
            let pipeline = TablePipeline::new(storage, settings, source);
            ReportEngine::new(pipeline).run().await
        }
    }
}

fn display_settings(settings: &ReportSettings) {
    println!("📋 Report settings:");
    for (key, value) in settings.summary() {
        println!("   {:<20} {}", key, value);
    }
}

/// 記錄錯誤並回傳對應的結束碼
fn report_failure(e: &ReportError) -> i32 {
    let severity = e.severity();

    if severity == ErrorSeverity::Low {
        tracing::warn!("{}", e);
    } else {
        tracing::error!(
            "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            severity
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    }

    eprintln!("❌ {}", e.user_friendly_message());
    if severity != ErrorSeverity::Low {
        eprintln!("💡 {}", e.recovery_suggestion());
    }

    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
