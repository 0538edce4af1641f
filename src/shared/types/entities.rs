use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, IntoStaticStr};
use uuid::Uuid;

/// Provenance of an entity: who created it and how.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, EnumDiscriminants)]
#[strum_discriminants(derive(Hash))]
#[serde(tag = "type")]
pub enum EntitySource {
    Manual,
    System,
    Discovery { metadata: Vec<DiscoveryMetadata> },
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct DiscoveryMetadata {
    #[serde(flatten)]
    pub discovery_type: DiscoveryType,
    pub daemon_id: Uuid,
    pub date: DateTime<Utc>,
}

impl DiscoveryMetadata {
    pub fn new(discovery_type: DiscoveryType, daemon_id: Uuid) -> Self {
        Self {
            discovery_type,
            daemon_id,
            date: Utc::now(),
        }
    }
}

impl Default for DiscoveryMetadata {
    fn default() -> Self {
        Self {
            discovery_type: DiscoveryType::Network { subnet_ids: None },
            daemon_id: Uuid::new_v4(),
            date: Utc::now(),
        }
    }
}

/// How a discovery run found the entity.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    Eq,
    PartialEq,
    Hash,
    Display,
    IntoStaticStr,
    EnumDiscriminants,
)]
#[serde(tag = "type")]
pub enum DiscoveryType {
    SelfReport {
        host_id: Uuid,
    },
    // None = all interfaced subnets
    Network {
        subnet_ids: Option<Vec<Uuid>>,
    },
    Docker {
        host_id: Uuid,
    },
}
