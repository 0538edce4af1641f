use chrono::{DateTime, Utc};
use mac_address::MacAddress;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;
use validator::Validate;

use crate::{
    bindings::r#impl::base::{Binding, BindingBase, BindingType},
    hosts::r#impl::{
        base::{Host, HostBase},
        virtualization::HostVirtualization,
    },
    interfaces::r#impl::base::{Interface, InterfaceBase},
    ports::r#impl::base::{Port, PortBase, PortConfig, PortType, TransportProtocol},
    services::r#impl::{
        base::{Service, ServiceBase, ServiceDefinitionId},
        virtualization::ServiceVirtualization,
    },
    shared::position::PositionedInput,
    shared::types::entities::EntitySource,
};

// =============================================================================
// INTERNAL API (daemon discovery)
// =============================================================================

/// Request type for daemon discovery - accepts full entities with IDs.
/// Used internally by daemons for host creation/upsert, NOT the external API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryHostRequest {
    pub host: Host,
    pub interfaces: Vec<Interface>,
    pub ports: Vec<Port>,
    pub services: Vec<Service>,
}

// =============================================================================
// EXTERNAL API - CONSOLIDATED INPUT TYPES
// =============================================================================

/// Input for creating or updating an interface.
/// Used in both CreateHostRequest and UpdateHostRequest.
/// Client must provide a UUID for the interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceInput {
    /// Client-provided UUID for this interface
    pub id: Uuid,
    pub subnet_id: Uuid,
    pub ip_address: IpAddr,
    pub mac_address: Option<MacAddress>,
    pub name: Option<String>,
    /// Position in the host's interface list.
    /// Omitted on create: appends to end of list.
    /// Omitted on update: existing interfaces keep their positions; new ones append.
    /// Must be all specified or all omitted across the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl InterfaceInput {
    /// Convert to an Interface entity with the given host_id and network_id.
    /// Position must be resolved first (via `resolve_and_validate_input_positions`).
    pub fn into_interface(self, host_id: Uuid, network_id: Uuid) -> Interface {
        let now = chrono::Utc::now();
        Interface {
            id: self.id,
            created_at: now,
            updated_at: now,
            base: InterfaceBase {
                network_id,
                host_id,
                subnet_id: self.subnet_id,
                ip_address: self.ip_address,
                mac_address: self.mac_address,
                name: self.name,
                position: self.position.unwrap_or(0),
            },
        }
    }
}

impl From<Interface> for InterfaceInput {
    fn from(interface: Interface) -> Self {
        Self {
            id: interface.id,
            subnet_id: interface.base.subnet_id,
            ip_address: interface.base.ip_address,
            mac_address: interface.base.mac_address,
            name: interface.base.name,
            position: Some(interface.base.position),
        }
    }
}

impl PositionedInput for InterfaceInput {
    fn position(&self) -> Option<i32> {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = Some(position);
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Input for creating or updating a port.
/// Client must provide a UUID for the port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortInput {
    /// Client-provided UUID for this port
    pub id: Uuid,
    /// Port number (1-65535)
    pub number: u16,
    /// Transport protocol (Tcp or Udp)
    pub protocol: TransportProtocol,
}

impl PortInput {
    pub fn into_port(self, host_id: Uuid, network_id: Uuid) -> Port {
        let now = chrono::Utc::now();
        Port {
            id: self.id,
            created_at: now,
            updated_at: now,
            base: PortBase {
                host_id,
                network_id,
                port_type: PortType::Custom(PortConfig {
                    number: self.number,
                    protocol: self.protocol,
                }),
            },
        }
    }
}

impl From<Port> for PortInput {
    fn from(port: Port) -> Self {
        Self {
            id: port.id,
            number: port.base.port_type.number(),
            protocol: port.base.port_type.protocol(),
        }
    }
}

/// Input for creating or updating a service.
/// Client must provide a UUID for the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceInput {
    /// Client-provided UUID for this service
    pub id: Uuid,
    /// Service definition ID (e.g., "Nginx", "PostgreSQL")
    pub service_definition: ServiceDefinitionId,
    /// Display name for this service
    pub name: String,
    /// Bindings that associate this service with ports/interfaces
    #[serde(default)]
    pub bindings: Vec<BindingInput>,
    /// Container/VM virtualization info if applicable
    pub virtualization: Option<ServiceVirtualization>,
    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<Uuid>,
    /// Position in the host's service list; same rules as InterfaceInput.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl ServiceInput {
    /// Convert to a Service entity with the given host_id, network_id, and source.
    /// Position must be resolved first (via `resolve_and_validate_input_positions`).
    pub fn into_service(self, host_id: Uuid, network_id: Uuid, source: EntitySource) -> Service {
        let now = chrono::Utc::now();
        let service_id = self.id;

        let bindings: Vec<Binding> = self
            .bindings
            .into_iter()
            .map(|b| b.into_binding(service_id, network_id))
            .collect();

        Service {
            id: self.id,
            created_at: now,
            updated_at: now,
            base: ServiceBase {
                host_id,
                network_id,
                service_definition: self.service_definition,
                name: self.name,
                bindings,
                virtualization: self.virtualization,
                source,
                tags: self.tags,
                position: self.position.unwrap_or(0),
            },
        }
    }
}

impl From<Service> for ServiceInput {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            service_definition: service.base.service_definition,
            name: service.base.name,
            bindings: service
                .base
                .bindings
                .into_iter()
                .map(BindingInput::from)
                .collect(),
            virtualization: service.base.virtualization,
            tags: service.base.tags,
            position: Some(service.base.position),
        }
    }
}

impl PositionedInput for ServiceInput {
    fn position(&self) -> Option<i32> {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = Some(position);
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Input for creating or updating a binding within a service.
/// Client must provide a UUID for the binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BindingInput {
    /// Bind to an interface (service is present without a specific port)
    Interface {
        /// Client-provided UUID for this binding
        id: Uuid,
        interface_id: Uuid,
    },
    /// Bind to a port (optionally on a specific interface)
    Port {
        /// Client-provided UUID for this binding
        id: Uuid,
        port_id: Uuid,
        /// null = bind to all interfaces
        #[serde(skip_serializing_if = "Option::is_none")]
        interface_id: Option<Uuid>,
    },
}

impl BindingInput {
    pub fn id(&self) -> Uuid {
        match self {
            BindingInput::Interface { id, .. } => *id,
            BindingInput::Port { id, .. } => *id,
        }
    }

    /// Convert to a full Binding with the given service_id and network_id.
    pub fn into_binding(self, service_id: Uuid, network_id: Uuid) -> Binding {
        let (id, binding_type) = match self {
            BindingInput::Interface { id, interface_id } => {
                (id, BindingType::Interface { interface_id })
            }
            BindingInput::Port {
                id,
                port_id,
                interface_id,
            } => (
                id,
                BindingType::Port {
                    port_id,
                    interface_id,
                },
            ),
        };

        Binding {
            id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            base: BindingBase::new(service_id, network_id, binding_type),
        }
    }
}

impl From<Binding> for BindingInput {
    fn from(binding: Binding) -> Self {
        match binding.base.binding_type {
            BindingType::Interface { interface_id } => BindingInput::Interface {
                id: binding.id,
                interface_id,
            },
            BindingType::Port {
                port_id,
                interface_id,
            } => BindingInput::Port {
                id: binding.id,
                port_id,
                interface_id,
            },
        }
    }
}

// =============================================================================
// EXTERNAL API - CREATE REQUEST
// =============================================================================

/// Request type for creating a host with its associated interfaces, ports,
/// and services. Server assigns `host_id`, `network_id`, and `source` to all
/// children. Client supplies UUIDs for all entities, so services can
/// reference interfaces/ports by ID within the same request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHostRequest {
    // Host fields
    #[validate(length(max = 100, message = "Name must be 100 characters or less"))]
    pub name: String,
    pub network_id: Uuid,
    pub hostname: Option<String>,
    #[validate(length(max = 500, message = "Description must be 500 characters or less"))]
    pub description: Option<String>,
    pub virtualization: Option<HostVirtualization>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub tags: Vec<Uuid>,

    /// Interfaces to create with this host (client provides UUIDs)
    #[serde(default)]
    pub interfaces: Vec<InterfaceInput>,
    /// Ports to create with this host (client provides UUIDs)
    #[serde(default)]
    pub ports: Vec<PortInput>,
    /// Services to create with this host (can reference interfaces/ports by UUID)
    #[serde(default)]
    pub services: Vec<ServiceInput>,
}

// =============================================================================
// EXTERNAL API - UPDATE REQUEST
// =============================================================================

/// Request type for updating a host with its children.
/// Uses the same input types as CreateHostRequest.
/// Server will sync children (create new, update existing, delete removed).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateHostRequest {
    pub id: Uuid,
    #[validate(length(max = 100, message = "Name must be 100 characters or less"))]
    pub name: String,
    pub hostname: Option<String>,
    #[validate(length(max = 500, message = "Description must be 500 characters or less"))]
    pub description: Option<String>,
    pub virtualization: Option<HostVirtualization>,
    pub hidden: bool,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    /// Optional: expected updated_at timestamp for optimistic locking.
    #[serde(default)]
    pub expected_updated_at: Option<DateTime<Utc>>,

    /// Interfaces to sync with this host.
    /// Server will create/update/delete to match this list.
    #[serde(default)]
    pub interfaces: Vec<InterfaceInput>,

    /// Ports to sync with this host.
    /// Server will create/update/delete to match this list.
    #[serde(default)]
    pub ports: Vec<PortInput>,

    /// Services to sync with this host.
    /// Server will create/update/delete to match this list.
    #[serde(default)]
    pub services: Vec<ServiceInput>,
}

// =============================================================================
// RESPONSE TYPE
// =============================================================================

/// Response type for host endpoints.
/// Includes hydrated children (interfaces, ports, services).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostResponse {
    // Host identity
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Host fields
    pub name: String,
    pub network_id: Uuid,
    pub hostname: Option<String>,
    pub description: Option<String>,
    pub source: EntitySource,
    pub virtualization: Option<HostVirtualization>,
    pub hidden: bool,
    pub tags: Vec<Uuid>,

    // Hydrated children (fetched by the service layer)
    pub interfaces: Vec<Interface>,
    pub ports: Vec<Port>,
    pub services: Vec<Service>,
}

impl HostResponse {
    /// Convert back to a Host entity (without children).
    /// Exhaustive destructuring: adding a field to HostResponse breaks this
    /// at compile time instead of silently dropping data.
    pub fn to_host(&self) -> Host {
        let HostResponse {
            id,
            created_at,
            updated_at,
            name,
            network_id,
            hostname,
            description,
            source,
            virtualization,
            hidden,
            tags,
            interfaces: _,
            ports: _,
            services: _,
        } = self;

        Host {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            base: HostBase {
                name: name.clone(),
                network_id: *network_id,
                hostname: hostname.clone(),
                description: description.clone(),
                source: source.clone(),
                virtualization: virtualization.clone(),
                hidden: *hidden,
                tags: tags.clone(),
            },
        }
    }

    /// Build a HostResponse from a Host and its hydrated children.
    /// Exhaustive destructuring of Host and HostBase, for the same reason.
    pub fn from_host_with_children(
        host: Host,
        interfaces: Vec<Interface>,
        ports: Vec<Port>,
        services: Vec<Service>,
    ) -> Self {
        let Host {
            id,
            created_at,
            updated_at,
            base,
        } = host;

        let HostBase {
            name,
            network_id,
            hostname,
            description,
            source,
            virtualization,
            hidden,
            tags,
        } = base;

        Self {
            id,
            created_at,
            updated_at,
            name,
            network_id,
            hostname,
            description,
            source,
            virtualization,
            hidden,
            tags,
            interfaces,
            ports,
            services,
        }
    }
}
