use clap::Parser;
use realty_report::core::ConfigProvider;
use realty_report::utils::error::ErrorSeverity;
use realty_report::utils::{logger, validation::Validate};
use realty_report::{CliConfig, LocalStorage, ReportEngine, ReportPipeline, TomlConfig};
use std::fmt::Debug;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    // 指定 TOML 時以檔案設定為主
    let toml = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                return ExitCode::from(1);
            }
        },
        None => None,
    };

    let verbose = cli.verbose || toml.as_ref().is_some_and(TomlConfig::verbose);
    let json_logs = cli.json_logs || toml.as_ref().is_some_and(TomlConfig::json_logs);
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| toml.as_ref().and_then(|t| t.log_file().map(str::to_string)));

    if let Err(e) = logger::init_cli_logger(verbose, json_logs, log_file.as_deref()) {
        eprintln!("❌ Failed to initialise logging: {}", e);
        return ExitCode::from(1);
    }

    tracing::info!("Starting realty-report");

    match toml {
        Some(config) => run(config).await,
        None => run(cli).await,
    }
}

async fn run<C: ConfigProvider + Validate + Debug>(config: C) -> ExitCode {
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return ExitCode::from(1);
    }

    let discount = config.discount();
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ReportPipeline::new(storage, config);
    let engine = ReportEngine::new(pipeline).with_discount(discount);

    match engine.run().await {
        Ok(summary) => {
            if summary.rejected_lines > 0 {
                println!("⚠️ {} malformed line(s) skipped", summary.rejected_lines);
            }
            match summary.output_path {
                Some(path) => println!("✅ Results written to {}", path),
                None => println!("⚠️ No data loaded!"),
            }
            if summary.source_unavailable {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Report run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            // 依錯誤嚴重程度決定退出碼
            match e.severity() {
                ErrorSeverity::Low => ExitCode::SUCCESS,
                ErrorSeverity::Medium => ExitCode::from(2),
                ErrorSeverity::High => ExitCode::from(1),
                ErrorSeverity::Critical => ExitCode::from(3),
            }
        }
    }
}
