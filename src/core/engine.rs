use crate::core::parser::SignatureLogParser;
use crate::domain::ports::{ConfigProvider, EventSink, LogSource};
use crate::utils::error::{ErrorSeverity, Result};

/// Main monitor loop: poll the log source, pre-filter on the healthcheck
/// signature name, parse matches and deliver them to the sink.
pub struct MonitorEngine<S: LogSource, K: EventSink> {
    source: S,
    sink: K,
    parser: SignatureLogParser,
    sig_name: String,
}

impl<S: LogSource, K: EventSink> MonitorEngine<S, K> {
    pub fn new<C: ConfigProvider>(source: S, sink: K, config: &C) -> Self {
        Self {
            source,
            sink,
            parser: SignatureLogParser::new(
                config.monitor_id(),
                config.protocol().map(str::to_string),
            ),
            sig_name: config.sig_name().to_string(),
        }
    }

    /// Runs until the log source fails or the sink reports a critical
    /// error. Parse failures and transient delivery failures are logged
    /// and skipped; a monitor must survive a briefly unreachable manager.
    pub async fn run(mut self) -> Result<()> {
        tracing::debug!("executing monitor run loop");
        loop {
            let lines = self.source.next_lines().await?;
            for line in lines {
                if !line.contains(self.sig_name.as_str()) {
                    continue;
                }
                tracing::debug!("log contains target sig_name {}: {}", self.sig_name, line);

                let event = match self.parser.parse(&line) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        continue;
                    }
                };

                tracing::info!("extracted new healthcheck log message");
                tracing::debug!("parsed log event for manager: {:?}", event);

                if let Err(e) = self.sink.deliver(&event).await {
                    if e.severity() == ErrorSeverity::Critical {
                        return Err(e);
                    }
                    tracing::error!("event delivery failed, dropping event: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reporter::ChannelSink;
    use crate::domain::ports::LogSource;
    use crate::utils::error::MonitorError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Duration;

    struct ScriptedSource {
        batches: VecDeque<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(batches: Vec<Vec<&str>>) -> Self {
            Self {
                batches: batches
                    .into_iter()
                    .map(|b| b.into_iter().map(str::to_string).collect())
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl LogSource for ScriptedSource {
        async fn next_lines(&mut self) -> crate::utils::error::Result<Vec<String>> {
            self.batches.pop_front().ok_or_else(|| {
                MonitorError::IoError(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "script exhausted",
                ))
            })
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn log_path(&self) -> &str {
            "/var/log/zeek/signatures.log"
        }
        fn sig_name(&self) -> &str {
            "ampt-probe"
        }
        fn interval(&self) -> Duration {
            Duration::from_secs(3)
        }
        fn manager_url(&self) -> &str {
            "http://localhost:8000/event"
        }
        fn monitor_id(&self) -> u32 {
            5
        }
        fn protocol(&self) -> Option<&str> {
            Some("udp")
        }
    }

    const MATCHING_LINE: &str = "1586895067.0\tuid1\t198.51.100.15\t49152\t203.0.113.10\t80\tSignatures::Sensitive_Signature\tampt-probe\tmsg\tpayload\t1\t1";
    const OTHER_SIG_LINE: &str = "1586895067.0\tuid2\t192.0.2.1\t1234\t203.0.113.10\t22\tSignatures::Sensitive_Signature\tssh-bruteforce\tmsg\tpayload\t1\t1";
    const MALFORMED_MATCHING_LINE: &str = "garbage line mentioning ampt-probe";

    #[tokio::test]
    async fn test_engine_filters_parses_and_delivers() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let source = ScriptedSource::new(vec![
            vec![MATCHING_LINE, OTHER_SIG_LINE],
            vec![],
            vec![MALFORMED_MATCHING_LINE, MATCHING_LINE],
        ]);
        let engine = MonitorEngine::new(source, ChannelSink::new(tx), &TestConfig);

        // Loop ends when the scripted source is exhausted
        assert!(engine.run().await.is_err());

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].monitor, 5);
        assert_eq!(events[0].protocol.as_deref(), Some("udp"));
        assert_eq!(events[0].dest_port, 80);
    }

    #[tokio::test]
    async fn test_engine_stops_on_closed_channel() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let source = ScriptedSource::new(vec![vec![MATCHING_LINE], vec![MATCHING_LINE]]);
        let engine = MonitorEngine::new(source, ChannelSink::new(tx), &TestConfig);

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, MonitorError::ChannelClosedError));
    }
}
