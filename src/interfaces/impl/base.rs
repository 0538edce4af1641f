use crate::shared::position::Positioned;
use chrono::{DateTime, Utc};
use mac_address::MacAddress;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr};
use uuid::Uuid;
use validator::Validate;

/// Wildcard address a port binding reports when it listens on every interface.
pub const ALL_INTERFACES_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0));

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Validate)]
pub struct InterfaceBase {
    pub network_id: Uuid,
    pub host_id: Uuid,
    pub subnet_id: Uuid,
    pub ip_address: IpAddr,
    pub mac_address: Option<MacAddress>,
    pub name: Option<String>,
    /// Position of this interface in the host's interface list (for ordering)
    #[serde(default)]
    pub position: i32,
}

impl Default for InterfaceBase {
    fn default() -> Self {
        Self {
            network_id: Uuid::nil(),
            host_id: Uuid::nil(),
            subnet_id: Uuid::nil(),
            ip_address: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            mac_address: None,
            name: None,
            position: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, Default, Validate)]
pub struct Interface {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    #[validate(nested)]
    pub base: InterfaceBase,
}

impl Interface {
    pub fn new(base: InterfaceBase) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            base,
        }
    }
}

// Two interfaces are the same endpoint if they share ip+subnet, a concrete
// MAC address, or an id. Hash only covers the fields equality can rely on.
impl PartialEq for Interface {
    fn eq(&self, other: &Self) -> bool {
        (self.base.ip_address == other.base.ip_address
            && self.base.subnet_id == other.base.subnet_id)
            || (self.base.mac_address == other.base.mac_address
                && self.base.mac_address.is_some()
                && other.base.mac_address.is_some())
            || (self.id == other.id)
    }
}

impl Hash for Interface {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.base.ip_address.hash(state);
        self.base.subnet_id.hash(state);
        self.base.mac_address.hash(state);
    }
}

impl Display for Interface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Interface {}: {} on subnet {}",
            self.id, self.base.ip_address, self.base.subnet_id
        )
    }
}

impl Positioned for Interface {
    fn position(&self) -> i32 {
        self.base.position
    }

    fn set_position(&mut self, position: i32) {
        self.base.position = position;
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn entity_name() -> &'static str {
        "interface"
    }
}
