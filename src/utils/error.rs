use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Event delivery failed: {0}")]
    DeliveryError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Manager rejected event: HTTP {status}")]
    ManagerRejectedError { status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Could not parse signature log line: {reason} (input: {line})")]
    LogParseError { line: String, reason: String },

    #[error("Event channel closed, receiver dropped")]
    ChannelClosedError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    Configuration,
    Parsing,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Skippable, the monitor loop keeps running
    Low,
    /// Transient, likely to succeed on retry
    Medium,
    /// The current operation cannot proceed
    High,
    /// The process cannot continue at all
    Critical,
}

impl MonitorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MonitorError::IoError(_) => ErrorCategory::Io,
            MonitorError::DeliveryError(_) | MonitorError::ManagerRejectedError { .. } => {
                ErrorCategory::Network
            }
            MonitorError::ConfigError { .. }
            | MonitorError::ConfigValidationError { .. }
            | MonitorError::InvalidConfigValueError { .. }
            | MonitorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MonitorError::LogParseError { .. } | MonitorError::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            MonitorError::ChannelClosedError => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MonitorError::LogParseError { .. } => ErrorSeverity::Low,
            MonitorError::DeliveryError(_) | MonitorError::ManagerRejectedError { .. } => {
                ErrorSeverity::Medium
            }
            MonitorError::IoError(_) | MonitorError::SerializationError(_) => ErrorSeverity::High,
            MonitorError::ConfigError { .. }
            | MonitorError::ConfigValidationError { .. }
            | MonitorError::InvalidConfigValueError { .. }
            | MonitorError::MissingConfigError { .. }
            | MonitorError::ChannelClosedError => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MonitorError::IoError(_) => {
                "Check that the Zeek signature log exists and is readable".to_string()
            }
            MonitorError::DeliveryError(_) => {
                "Check that the AMPT manager is reachable at the configured URL".to_string()
            }
            MonitorError::ManagerRejectedError { .. } => {
                "Check the monitor id and event format expected by the AMPT manager".to_string()
            }
            MonitorError::SerializationError(_) => {
                "This indicates a bug in event construction, please report it".to_string()
            }
            MonitorError::ConfigError { .. }
            | MonitorError::ConfigValidationError { .. }
            | MonitorError::InvalidConfigValueError { .. }
            | MonitorError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            MonitorError::LogParseError { .. } => {
                "Verify the log is a Zeek signatures.log and the sig_name matches".to_string()
            }
            MonitorError::ChannelClosedError => {
                "The consuming side of the event channel has shut down".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Log file problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the AMPT manager: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Parsing => format!("Log data problem: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
