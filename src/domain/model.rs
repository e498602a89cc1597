use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A healthcheck alert extracted from the Zeek signature log, in the shape
/// the AMPT manager accepts. `protocol` is optional because default Zeek
/// signature logs do not record the IP protocol; the configured value is
/// attached when one is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthcheckEvent {
    pub monitor: u32,
    /// ISO 8601 UTC timestamp with seconds precision
    pub alert_time: String,
    pub src_addr: IpAddr,
    pub src_port: u16,
    pub dest_addr: IpAddr,
    pub dest_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}
