use crate::domain::model::HealthcheckEvent;
use crate::utils::error::{MonitorError, Result};
use chrono::DateTime;
use regex::Regex;
use std::net::IpAddr;

/// Field layout of Zeek signature log lines. Only the connection 5-tuple
/// head of the line is captured; the skipped field is the connection uid.
const SIG_LOG_PATTERN: &str = r"(?x)
    ^(?P<ts>\d+\.\d+)\s+
    \S+\s+
    (?P<src_addr>\S+)\s+
    (?P<src_port>\d{1,5})\s+
    (?P<dst_addr>\S+)\s+
    (?P<dst_port>\d{1,5})";

/// Turns pre-filtered Zeek signature log lines into healthcheck events.
pub struct SignatureLogParser {
    regex: Regex,
    monitor_id: u32,
    protocol: Option<String>,
}

impl SignatureLogParser {
    pub fn new(monitor_id: u32, protocol: Option<String>) -> Self {
        Self {
            regex: Regex::new(SIG_LOG_PATTERN).unwrap(),
            monitor_id,
            protocol,
        }
    }

    pub fn parse(&self, line: &str) -> Result<HealthcheckEvent> {
        let caps = self
            .regex
            .captures(line)
            .ok_or_else(|| parse_error(line, "line does not match signature log layout"))?;

        let ts: f64 = caps["ts"]
            .parse()
            .map_err(|_| parse_error(line, "invalid timestamp"))?;
        let alert_time = format_alert_time(ts)
            .ok_or_else(|| parse_error(line, "timestamp out of range"))?;

        let src_addr: IpAddr = caps["src_addr"]
            .parse()
            .map_err(|_| parse_error(line, "invalid source address"))?;
        let dest_addr: IpAddr = caps["dst_addr"]
            .parse()
            .map_err(|_| parse_error(line, "invalid destination address"))?;

        // The regex allows up to five digits, so 65536-99999 still needs
        // rejecting here.
        let src_port: u16 = caps["src_port"]
            .parse()
            .map_err(|_| parse_error(line, "source port out of range"))?;
        let dest_port: u16 = caps["dst_port"]
            .parse()
            .map_err(|_| parse_error(line, "destination port out of range"))?;

        Ok(HealthcheckEvent {
            monitor: self.monitor_id,
            alert_time,
            src_addr,
            src_port,
            dest_addr,
            dest_port,
            protocol: self.protocol.clone(),
        })
    }
}

/// Zeek timestamps are epoch seconds with a fractional part; the manager
/// wants ISO 8601 UTC with seconds precision.
fn format_alert_time(epoch: f64) -> Option<String> {
    if !epoch.is_finite() || epoch < 0.0 {
        return None;
    }
    let secs = epoch.trunc() as i64;
    let nanos = (epoch.fract() * 1e9) as u32;
    let ts = DateTime::from_timestamp(secs, nanos)?;
    Some(ts.format("%Y-%m-%dT%H:%M:%S").to_string())
}

fn parse_error(line: &str, reason: &str) -> MonitorError {
    MonitorError::LogParseError {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LINE: &str = "1586895067.123456\tCHhAvVGS1DHFjwGM9\t198.51.100.15\t49152\t203.0.113.10\t80\tSignatures::Sensitive_Signature\tampt-probe\t198.51.100.15: ampt-probe\tpayload\t1\t1";

    #[test]
    fn test_parse_signature_log_line() {
        let parser = SignatureLogParser::new(3, None);
        let event = parser.parse(SAMPLE_LINE).unwrap();

        assert_eq!(event.monitor, 3);
        assert_eq!(event.alert_time, "2020-04-14T20:11:07");
        assert_eq!(event.src_addr, "198.51.100.15".parse::<IpAddr>().unwrap());
        assert_eq!(event.src_port, 49152);
        assert_eq!(event.dest_addr, "203.0.113.10".parse::<IpAddr>().unwrap());
        assert_eq!(event.dest_port, 80);
        assert_eq!(event.protocol, None);
    }

    #[test]
    fn test_configured_protocol_is_attached() {
        let parser = SignatureLogParser::new(1, Some("udp".to_string()));
        let event = parser.parse(SAMPLE_LINE).unwrap();
        assert_eq!(event.protocol.as_deref(), Some("udp"));
    }

    #[test]
    fn test_parse_ipv6_addresses() {
        let line = "1586895067.0\tuid1\t2001:db8::1\t5000\t2001:db8::2\t80\tnote\tampt-probe";
        let parser = SignatureLogParser::new(1, None);
        let event = parser.parse(line).unwrap();
        assert_eq!(event.src_addr, "2001:db8::1".parse::<IpAddr>().unwrap());
        assert_eq!(event.dest_addr, "2001:db8::2".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_malformed_line_is_rejected() {
        let parser = SignatureLogParser::new(1, None);
        assert!(parser.parse("this is not a signature log line").is_err());
        assert!(parser.parse("").is_err());
    }

    #[test]
    fn test_port_above_u16_range_is_rejected() {
        let line = "1586895067.0\tuid1\t198.51.100.15\t99999\t203.0.113.10\t80";
        let parser = SignatureLogParser::new(1, None);
        let err = parser.parse(line).unwrap_err();
        assert!(matches!(err, MonitorError::LogParseError { .. }));
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let line = "1586895067.0\tuid1\tnot-an-address\t5000\t203.0.113.10\t80";
        let parser = SignatureLogParser::new(1, None);
        assert!(parser.parse(line).is_err());
    }

    #[test]
    fn test_event_serializes_with_manager_field_names() {
        let parser = SignatureLogParser::new(7, Some("udp".to_string()));
        let event = parser.parse(SAMPLE_LINE).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["monitor"], 7);
        assert_eq!(json["alert_time"], "2020-04-14T20:11:07");
        assert_eq!(json["src_addr"], "198.51.100.15");
        assert_eq!(json["src_port"], 49152);
        assert_eq!(json["dest_addr"], "203.0.113.10");
        assert_eq!(json["dest_port"], 80);
        assert_eq!(json["protocol"], "udp");
    }

    #[test]
    fn test_protocol_field_omitted_when_unset() {
        let parser = SignatureLogParser::new(7, None);
        let event = parser.parse(SAMPLE_LINE).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("protocol").is_none());
    }
}
