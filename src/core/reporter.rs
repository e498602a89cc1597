use crate::domain::model::HealthcheckEvent;
use crate::domain::ports::EventSink;
use crate::utils::error::{MonitorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;

/// Relays healthcheck events to the AMPT manager's event-reporting
/// endpoint as JSON over HTTP.
pub struct HttpEventSink {
    client: Client,
    manager_url: String,
}

impl HttpEventSink {
    pub fn new(manager_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            manager_url: manager_url.into(),
        }
    }
}

#[async_trait]
impl EventSink for HttpEventSink {
    async fn deliver(&self, event: &HealthcheckEvent) -> Result<()> {
        tracing::debug!("submitting event to manager at {}", self.manager_url);
        let response = self
            .client
            .post(&self.manager_url)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("manager response status: {}", status);
        if !status.is_success() {
            return Err(MonitorError::ManagerRejectedError {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Hands events to an in-process consumer over a channel. This is the seam
/// for embedding the monitor in a larger host process instead of posting
/// straight to the manager.
pub struct ChannelSink {
    tx: UnboundedSender<HealthcheckEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<HealthcheckEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn deliver(&self, event: &HealthcheckEvent) -> Result<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| MonitorError::ChannelClosedError)
    }
}
