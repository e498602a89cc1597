pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::core::engine::MonitorEngine;
pub use crate::core::parser::SignatureLogParser;
pub use crate::core::reporter::{ChannelSink, HttpEventSink};
pub use crate::core::tailer::FileTailer;
pub use crate::domain::model::HealthcheckEvent;
pub use crate::utils::error::{MonitorError, Result};
