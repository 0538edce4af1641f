use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum_macros::{Display as StrumDisplay, EnumString};
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    StrumDisplay,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum TransportProtocol {
    #[default]
    Tcp,
    Udp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PortConfig {
    pub number: u16,
    pub protocol: TransportProtocol,
}

/// Well-known ports get a named variant so clients can render them without a
/// lookup table; everything else travels as `Custom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type")]
pub enum PortType {
    Ssh,
    Http,
    Https,
    Custom(PortConfig),
}

impl PortType {
    pub fn new_tcp(number: u16) -> Self {
        match number {
            22 => PortType::Ssh,
            80 => PortType::Http,
            443 => PortType::Https,
            _ => PortType::Custom(PortConfig {
                number,
                protocol: TransportProtocol::Tcp,
            }),
        }
    }

    pub fn new_udp(number: u16) -> Self {
        PortType::Custom(PortConfig {
            number,
            protocol: TransportProtocol::Udp,
        })
    }

    pub fn number(&self) -> u16 {
        match self {
            PortType::Ssh => 22,
            PortType::Http => 80,
            PortType::Https => 443,
            PortType::Custom(config) => config.number,
        }
    }

    pub fn protocol(&self) -> TransportProtocol {
        match self {
            PortType::Ssh | PortType::Http | PortType::Https => TransportProtocol::Tcp,
            PortType::Custom(config) => config.protocol,
        }
    }
}

impl Display for PortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.number(), self.protocol())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct PortBase {
    pub network_id: Uuid,
    pub host_id: Uuid,
    pub port_type: PortType,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct Port {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub base: PortBase,
}

impl Port {
    pub fn new(base: PortBase) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            base,
        }
    }

    /// Port discovered before its host exists; host_id and network_id are
    /// filled in when the owning host is persisted.
    pub fn new_hostless(port_type: PortType) -> Self {
        Self::new(PortBase {
            network_id: Uuid::nil(),
            host_id: Uuid::nil(),
            port_type,
        })
    }
}

impl Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Port {}: {}", self.base.port_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_tcp_ports_get_named_variants() {
        assert_eq!(PortType::new_tcp(22), PortType::Ssh);
        assert_eq!(PortType::new_tcp(443), PortType::Https);
        assert_eq!(PortType::new_tcp(22).number(), 22);
        assert_eq!(PortType::new_tcp(22).protocol(), TransportProtocol::Tcp);
    }

    #[test]
    fn test_unknown_ports_are_custom() {
        let port = PortType::new_tcp(8006);
        assert_eq!(
            port,
            PortType::Custom(PortConfig {
                number: 8006,
                protocol: TransportProtocol::Tcp,
            })
        );
        assert_eq!(port.number(), 8006);
    }

    #[test]
    fn test_udp_is_always_custom() {
        let port = PortType::new_udp(53);
        assert_eq!(port.protocol(), TransportProtocol::Udp);
        assert_eq!(port.number(), 53);
    }

    #[test]
    fn test_protocol_parses_case_insensitively() {
        use std::str::FromStr;
        assert_eq!(
            TransportProtocol::from_str("udp").unwrap(),
            TransportProtocol::Udp
        );
        assert_eq!(
            TransportProtocol::from_str("Tcp").unwrap(),
            TransportProtocol::Tcp
        );
    }
}
