use crate::bindings::r#impl::base::Binding;
use crate::services::r#impl::virtualization::ServiceVirtualization;
use crate::shared::position::Positioned;
use crate::shared::types::entities::EntitySource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use uuid::Uuid;
use validator::Validate;

/// Wire identifier of a service definition ("Proxmox VE", "Pi-hole", ...).
/// The definition catalog itself lives server-side; clients only pass the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ServiceDefinitionId(String);

impl ServiceDefinitionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ServiceDefinitionId {
    fn default() -> Self {
        Self("Web Service".to_string())
    }
}

impl Display for ServiceDefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Validate, Deserialize, PartialEq, Eq, Hash)]
pub struct ServiceBase {
    pub host_id: Uuid,
    pub network_id: Uuid,
    pub service_definition: ServiceDefinitionId,
    #[validate(length(min = 0, max = 100))]
    pub name: String,
    pub bindings: Vec<Binding>,
    pub virtualization: Option<ServiceVirtualization>,
    /// Will be automatically set to Manual for creation through API
    pub source: EntitySource,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    /// Position of this service in the host's service list (for ordering)
    #[serde(default)]
    pub position: i32,
}

impl Default for ServiceBase {
    fn default() -> Self {
        Self {
            host_id: Uuid::nil(),
            network_id: Uuid::nil(),
            service_definition: ServiceDefinitionId::default(),
            name: String::new(),
            bindings: Vec::new(),
            virtualization: None,
            source: EntitySource::Unknown,
            tags: Vec::new(),
            position: 0,
        }
    }
}

#[derive(Debug, Clone, Validate, Serialize, Deserialize, Eq, Default)]
pub struct Service {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    #[validate(nested)]
    pub base: ServiceBase,
}

impl Service {
    pub fn new(base: ServiceBase) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            base,
        }
    }

    pub fn get_binding(&self, id: Uuid) -> Option<&Binding> {
        self.base.bindings.iter().find(|b| b.id == id)
    }

    /// Interface scope of each binding; None entries listen on all interfaces.
    pub fn to_bound_interface_ids(&self) -> Vec<Option<Uuid>> {
        self.base
            .bindings
            .iter()
            .map(|b| b.interface_id())
            .collect()
    }

    pub fn to_bound_port_ids(&self) -> Vec<Uuid> {
        self.base
            .bindings
            .iter()
            .filter_map(|b| b.port_id())
            .collect()
    }
}

// Same id is the fast path. Otherwise two records describe the same service
// when they share host, network, and definition, and their port bindings
// overlap (the same port cannot belong to two different services).
impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        if self.id == other.id {
            return true;
        }

        if self.base.host_id != other.base.host_id
            || self.base.network_id != other.base.network_id
            || self.base.service_definition != other.base.service_definition
        {
            return false;
        }

        let self_port_ids: HashSet<_> = self.to_bound_port_ids().into_iter().collect();
        let other_port_ids: HashSet<_> = other.to_bound_port_ids().into_iter().collect();

        !self_port_ids.is_empty()
            && !other_port_ids.is_empty()
            && !self_port_ids.is_disjoint(&other_port_ids)
    }
}

impl Hash for Service {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.base.service_definition.hash(state);
        self.base.name.hash(state);
        self.base.host_id.hash(state);
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {:?}", self.base.name, self.id)
    }
}

impl Positioned for Service {
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
        "service"
    }
}
