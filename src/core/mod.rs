pub mod engine;
pub mod parser;
pub mod reporter;
pub mod tailer;

pub use crate::domain::model::HealthcheckEvent;
pub use crate::domain::ports::{ConfigProvider, EventSink, LogSource};
pub use crate::utils::error::Result;
