use ampt_monitor_zeek::domain::ports::ConfigProvider;
use ampt_monitor_zeek::utils::error::ErrorSeverity;
use ampt_monitor_zeek::utils::{logger, validation::Validate};
use ampt_monitor_zeek::{CliConfig, FileTailer, HttpEventSink, MonitorEngine};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ampt-monitor-zeek");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let tailer = FileTailer::new(config.log_path(), config.interval());
    let sink = HttpEventSink::new(config.manager_url());
    let engine = MonitorEngine::new(tailer, sink, &config);

    tracing::info!(
        "📡 Watching {} for signature '{}'",
        config.log_path(),
        config.sig_name()
    );
    tracing::info!("📨 Reporting events to {}", config.manager_url());

    tokio::select! {
        result = engine.run() => {
            if let Err(e) = result {
                tracing::error!(
                    "❌ Monitor loop failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());

                let exit_code = match e.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("👋 Received ctrl-c, shutting down");
        }
    }

    Ok(())
}
