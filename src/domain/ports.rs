use crate::domain::model::HealthcheckEvent;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Source of candidate log lines. A poll may legitimately return an empty
/// batch when nothing new was appended; implementations are expected to
/// sleep their configured interval before returning in that case.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn next_lines(&mut self) -> Result<Vec<String>>;
}

/// Hand-off seam to the event-reporting process. The AMPT manager owns the
/// other side of this contract.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, event: &HealthcheckEvent) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn log_path(&self) -> &str;
    fn sig_name(&self) -> &str;
    fn interval(&self) -> Duration;
    fn manager_url(&self) -> &str;
    fn monitor_id(&self) -> u32;
    fn protocol(&self) -> Option<&str>;
}
