use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MonitorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File-based configuration, mirroring the monitor section the AMPT
/// manager hands its plugins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub monitor: MonitorSection,
    pub source: SourceSection,
    pub reporting: ReportingSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSection {
    /// Monitor id registered with the AMPT manager
    pub id: u32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Path to the Zeek signatures.log
    pub path: String,
    /// Signature name marking healthcheck probe hits
    pub sig_name: String,
    /// Poll period between log reads, in seconds
    #[serde(default = "default_interval")]
    pub interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingSection {
    /// Event submission endpoint of the AMPT manager
    pub manager_url: String,
    /// IP protocol to report, since Zeek signature logs do not carry one
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
}

fn default_interval() -> u64 {
    3
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MonitorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MonitorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute environment variables written as ${VAR_NAME}
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_non_empty_string("source.sig_name", &self.source.sig_name)?;
        validation::validate_range("source.interval", self.source.interval, 1, 3600)?;
        validation::validate_url("reporting.manager_url", &self.reporting.manager_url)?;

        if let Some(protocol) = &self.reporting.protocol {
            validation::validate_non_empty_string("reporting.protocol", protocol)?;
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn log_path(&self) -> &str {
        &self.source.path
    }

    fn sig_name(&self) -> &str {
        &self.source.sig_name
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(self.source.interval)
    }

    fn manager_url(&self) -> &str {
        &self.reporting.manager_url
    }

    fn monitor_id(&self) -> u32 {
        self.monitor.id
    }

    fn protocol(&self) -> Option<&str> {
        self.reporting.protocol.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
