//! Wire compatibility with the previous host format.
//!
//! Older daemons send hosts with `interfaces`, `ports`, and `services`
//! embedded directly on the host object, and expect the same nested shape
//! back. This module accepts that format and converts it to the current
//! flat request model so one endpoint can serve both generations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mac_address::MacAddress;
use std::net::IpAddr;

use crate::{
    bindings::r#impl::base::{Binding, BindingBase, BindingType},
    hosts::r#impl::{
        api::{CreateHostRequest, DiscoveryHostRequest, HostResponse},
        base::{Host, HostBase},
    },
    interfaces::r#impl::base::{Interface, InterfaceBase},
    ports::r#impl::base::{Port, PortBase, PortType},
    services::r#impl::base::{Service, ServiceBase, ServiceDefinitionId},
    shared::types::entities::EntitySource,
};

/// Nested host request sent by old daemons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyHostWithServicesRequest {
    pub host: LegacyHost,
    pub services: Vec<LegacyService>,
}

/// Old host object: children embedded, service references as raw values,
/// plus fields the current model no longer carries. Unknown shapes are
/// accepted and ignored rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyHost {
    pub id: Uuid,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_timestamp")]
    pub updated_at: DateTime<Utc>,

    pub name: String,
    pub network_id: Uuid,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub tags: Vec<Uuid>,

    #[serde(default)]
    pub interfaces: Vec<LegacyInterface>,
    #[serde(default)]
    pub ports: Vec<LegacyPort>,
    /// Old format referenced services by id here
    #[serde(default)]
    pub services: Vec<serde_json::Value>,

    // Accepted for backwards compat, ignored
    #[serde(default)]
    pub target: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<serde_json::Value>,
    #[serde(default)]
    pub virtualization: Option<serde_json::Value>,
}

/// Old interface shape (no network_id, host_id, or position).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyInterface {
    pub id: Uuid,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub subnet_id: Uuid,
    pub ip_address: IpAddr,
    #[serde(default)]
    pub mac_address: Option<MacAddress>,
    #[serde(default)]
    pub name: Option<String>,
}

impl LegacyInterface {
    pub fn into_interface(self, network_id: Uuid, host_id: Uuid) -> Interface {
        Interface {
            id: self.id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
            base: InterfaceBase {
                network_id,
                host_id,
                subnet_id: self.subnet_id,
                ip_address: self.ip_address,
                mac_address: self.mac_address,
                name: self.name,
                position: 0,
            },
        }
    }
}

/// Old port shape: number plus free-form protocol string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyPort {
    pub id: Uuid,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub number: u16,
    #[serde(default)]
    pub protocol: Option<String>,
}

impl LegacyPort {
    pub fn into_port(self, network_id: Uuid, host_id: Uuid) -> Port {
        let protocol = self.protocol.as_deref().unwrap_or("Tcp");
        let port_type = if protocol.eq_ignore_ascii_case("udp") {
            PortType::new_udp(self.number)
        } else {
            PortType::new_tcp(self.number)
        };

        Port {
            id: self.id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
            base: PortBase {
                network_id,
                host_id,
                port_type,
            },
        }
    }
}

/// Old binding shape (no service_id or network_id); the type enum itself
/// is unchanged between generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyBinding {
    pub id: Uuid,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub binding_type: BindingType,
}

impl LegacyBinding {
    pub fn into_binding(self, service_id: Uuid, network_id: Uuid) -> Binding {
        Binding {
            id: self.id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
            base: BindingBase::new(service_id, network_id, self.binding_type),
        }
    }
}

/// Old service shape: definition as a bare string id, legacy bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyService {
    pub id: Uuid,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub host_id: Uuid,
    pub network_id: Uuid,
    pub service_definition: String,
    pub name: String,
    #[serde(default)]
    pub bindings: Vec<LegacyBinding>,
    #[serde(default)]
    pub virtualization: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

impl LegacyService {
    pub fn into_service(self) -> Service {
        let service_id = self.id;
        let network_id = self.network_id;

        let bindings: Vec<Binding> = self
            .bindings
            .into_iter()
            .map(|b| b.into_binding(service_id, network_id))
            .collect();

        Service {
            id: self.id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
            base: ServiceBase {
                host_id: self.host_id,
                network_id: self.network_id,
                service_definition: ServiceDefinitionId::new(self.service_definition),
                name: self.name,
                bindings,
                virtualization: None, // Old virtualization format ignored
                source: EntitySource::Discovery { metadata: vec![] },
                tags: self.tags,
                position: 0,
            },
        }
    }
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl LegacyHostWithServicesRequest {
    /// Flatten the nested legacy payload into the current discovery request.
    pub fn into_discovery_request(self) -> DiscoveryHostRequest {
        let LegacyHostWithServicesRequest { host, services } = self;

        let network_id = host.network_id;
        let host_id = host.id;

        let interfaces: Vec<Interface> = host
            .interfaces
            .into_iter()
            .map(|i| i.into_interface(network_id, host_id))
            .collect();

        let ports: Vec<Port> = host
            .ports
            .into_iter()
            .map(|p| p.into_port(network_id, host_id))
            .collect();

        let services: Vec<Service> = services.into_iter().map(|s| s.into_service()).collect();

        let new_host = Host {
            id: host.id,
            created_at: host.created_at,
            updated_at: host.updated_at,
            base: HostBase {
                name: host.name,
                network_id: host.network_id,
                hostname: host.hostname,
                description: host.description,
                source: EntitySource::Discovery { metadata: vec![] },
                virtualization: None,
                hidden: host.hidden,
                tags: host.tags,
            },
        };

        DiscoveryHostRequest {
            host: new_host,
            interfaces,
            ports,
            services,
        }
    }
}

/// Nested response shape old daemons expect back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyHostWithServicesResponse {
    pub host: LegacyHostResponse,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyHostResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub network_id: Uuid,
    pub hostname: Option<String>,
    pub description: Option<String>,
    pub hidden: bool,
    pub tags: Vec<Uuid>,

    pub interfaces: Vec<Interface>,
    pub ports: Vec<Port>,
    /// Old format expected bare service ids on the host
    pub services: Vec<Uuid>,

    // Fields old daemons require to be present
    pub target: LegacyTarget,
    pub source: serde_json::Value,
}

/// Old `target` field; always "None" in responses from the current server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LegacyTarget {
    #[serde(rename = "type")]
    pub target_type: String,
}

impl LegacyHostWithServicesResponse {
    pub fn from_host_response(response: HostResponse) -> Self {
        let service_ids: Vec<Uuid> = response.services.iter().map(|s| s.id).collect();

        LegacyHostWithServicesResponse {
            host: LegacyHostResponse {
                id: response.id,
                created_at: response.created_at,
                updated_at: response.updated_at,
                name: response.name,
                network_id: response.network_id,
                hostname: response.hostname,
                description: response.description,
                hidden: response.hidden,
                tags: response.tags,
                interfaces: response.interfaces,
                ports: response.ports,
                services: service_ids,
                target: LegacyTarget {
                    target_type: "None".to_string(),
                },
                source: serde_json::json!({"type": "Discovery", "metadata": []}),
            },
            services: response.services,
        }
    }
}

/// Request body accepting both wire generations on the same endpoint.
/// Tries the current format first, then falls back to legacy.
#[derive(Debug, Clone)]
pub enum HostCreateRequestBody {
    New(CreateHostRequest),
    Legacy(LegacyHostWithServicesRequest),
}

impl<'de> Deserialize<'de> for HostCreateRequestBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        match serde_json::from_value::<CreateHostRequest>(value.clone()) {
            Ok(new) => return Ok(Self::New(new)),
            Err(e) => tracing::debug!("Not new format: {}", e),
        }

        match serde_json::from_value::<LegacyHostWithServicesRequest>(value.clone()) {
            Ok(legacy) => return Ok(Self::Legacy(legacy)),
            Err(e) => tracing::warn!("Legacy format parse error: {}", e),
        }

        tracing::warn!(payload = %value, "Invalid host create request format");
        Err(serde::de::Error::custom(
            "Invalid request format: could not parse as CreateHostRequest or legacy HostWithServicesRequest",
        ))
    }
}

/// Response serialized in whichever format matches the request generation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HostCreateResponse {
    New(HostResponse),
    Legacy(LegacyHostWithServicesResponse),
}
