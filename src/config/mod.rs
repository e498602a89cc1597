pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ampt-monitor-zeek")]
#[command(about = "Read AMPT healthcheck alerts from Zeek signature logs")]
pub struct CliConfig {
    /// Path to the Zeek signatures.log
    #[arg(long)]
    pub path: String,

    /// Signature name marking healthcheck probe hits
    #[arg(long)]
    pub sig_name: String,

    /// Poll period between log reads, in seconds
    #[arg(long, default_value = "3")]
    pub interval: u64,

    /// Event submission endpoint of the AMPT manager
    #[arg(long)]
    pub manager_url: String,

    /// Monitor id registered with the AMPT manager
    #[arg(long)]
    pub monitor_id: u32,

    /// IP protocol to report, since Zeek signature logs do not carry one
    #[arg(long)]
    pub protocol: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn log_path(&self) -> &str {
        &self.path
    }

    fn sig_name(&self) -> &str {
        &self.sig_name
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    fn manager_url(&self) -> &str {
        &self.manager_url
    }

    fn monitor_id(&self) -> u32 {
        self.monitor_id
    }

    fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("path", &self.path)?;
        validation::validate_non_empty_string("sig_name", &self.sig_name)?;
        validation::validate_range("interval", self.interval, 1, 3600)?;
        validation::validate_url("manager_url", &self.manager_url)?;
        Ok(())
    }
}
