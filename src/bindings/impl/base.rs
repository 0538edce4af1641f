use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a service binding points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(tag = "type")]
pub enum BindingType {
    /// Service is present at this interface without a specific port
    Interface {
        interface_id: Uuid,
    },
    Port {
        port_id: Uuid,
        /// None = bound on all interfaces
        #[serde(skip_serializing_if = "Option::is_none")]
        interface_id: Option<Uuid>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct BindingBase {
    pub service_id: Uuid,
    pub network_id: Uuid,
    #[serde(flatten)]
    pub binding_type: BindingType,
}

impl BindingBase {
    pub fn new(service_id: Uuid, network_id: Uuid, binding_type: BindingType) -> Self {
        Self {
            service_id,
            network_id,
            binding_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct Binding {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub base: BindingBase,
}

impl Binding {
    pub fn new(base: BindingBase) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            base,
        }
    }

    /// Port binding built before the owning service exists; service_id and
    /// network_id are filled in when the service is persisted.
    pub fn new_port_serviceless(port_id: Uuid, interface_id: Option<Uuid>) -> Self {
        Self::new(BindingBase::new(
            Uuid::nil(),
            Uuid::nil(),
            BindingType::Port {
                port_id,
                interface_id,
            },
        ))
    }

    /// Interface binding built before the owning service exists.
    pub fn new_interface_serviceless(interface_id: Uuid) -> Self {
        Self::new(BindingBase::new(
            Uuid::nil(),
            Uuid::nil(),
            BindingType::Interface { interface_id },
        ))
    }

    /// Interface the binding is scoped to; None means all interfaces.
    pub fn interface_id(&self) -> Option<Uuid> {
        match self.base.binding_type {
            BindingType::Interface { interface_id } => Some(interface_id),
            BindingType::Port { interface_id, .. } => interface_id,
        }
    }

    pub fn port_id(&self) -> Option<Uuid> {
        match self.base.binding_type {
            BindingType::Interface { .. } => None,
            BindingType::Port { port_id, .. } => Some(port_id),
        }
    }
}
