use ampt_monitor_zeek::config::toml_config::TomlConfig;
use ampt_monitor_zeek::domain::ports::ConfigProvider;
use ampt_monitor_zeek::utils::{logger, validation::Validate};
use ampt_monitor_zeek::{FileTailer, HttpEventSink, MonitorEngine};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-monitor")]
#[command(about = "AMPT Zeek monitor driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ampt-monitor.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override poll interval from config (seconds)
    #[arg(long)]
    interval: Option<u64>,

    /// Override monitor id from config
    #[arg(long)]
    monitor_id: Option<u32>,

    /// Dry run - validate the configuration and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(args.verbose || config.verbose());

    tracing::info!("🚀 Starting TOML-driven AMPT Zeek monitor");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(interval) = args.interval {
        config.source.interval = interval;
        tracing::info!("🔧 Poll interval overridden to: {}s", interval);
    }
    if let Some(monitor_id) = args.monitor_id {
        config.monitor.id = monitor_id;
        tracing::info!("🔧 Monitor id overridden to: {}", monitor_id);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if args.dry_run {
        println!("✅ Configuration is valid");
        println!(
            "📡 Would watch {} for signature '{}'",
            config.log_path(),
            config.sig_name()
        );
        println!("📨 Would report events to {}", config.manager_url());
        return Ok(());
    }

    let tailer = FileTailer::new(config.log_path(), config.interval());
    let sink = HttpEventSink::new(config.manager_url());
    let engine = MonitorEngine::new(tailer, sink, &config);

    tracing::info!(
        "📡 Watching {} for signature '{}'",
        config.log_path(),
        config.sig_name()
    );

    tokio::select! {
        result = engine.run() => {
            if let Err(e) = result {
                tracing::error!("❌ Monitor loop failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("👋 Received ctrl-c, shutting down");
        }
    }

    Ok(())
}
