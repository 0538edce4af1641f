use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    bindings::r#impl::base::Binding,
    hosts::r#impl::{
        api::{CreateHostRequest, HostResponse, UpdateHostRequest},
        base::{Host, HostBase},
        virtualization::HostVirtualization,
    },
    interfaces::r#impl::base::Interface,
    ports::r#impl::base::Port,
    services::r#impl::base::Service,
    shared::types::api::ChildSync,
    shared::types::entities::EntitySource,
};

/// Working copy of a host while it is being edited in a form.
///
/// Unlike HostResponse this is writable: children are plain vectors the form
/// mutates freely before anything is submitted. `id` is always populated -
/// a fresh UUID for unsaved hosts - so forms have a stable key either way.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct HostFormData {
    // Host primitive fields
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[validate(length(max = 100, message = "Name must be 100 characters or less"))]
    pub name: String,
    pub network_id: Uuid,
    pub hostname: Option<String>,
    #[validate(length(max = 500, message = "Description must be 500 characters or less"))]
    pub description: Option<String>,
    pub source: EntitySource,
    pub virtualization: Option<HostVirtualization>,
    pub hidden: bool,
    pub tags: Vec<Uuid>,
    // Children for form editing (managed separately from the host in stores)
    pub interfaces: Vec<Interface>,
    pub ports: Vec<Port>,
    pub services: Vec<Service>,
}

impl HostFormData {
    /// Blank form for a host that does not exist yet. The id is a client-side
    /// placeholder; the server keeps it on create.
    pub fn new(network_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: String::new(),
            network_id,
            hostname: None,
            description: None,
            source: EntitySource::Manual,
            virtualization: None,
            hidden: false,
            tags: Vec::new(),
            interfaces: Vec::new(),
            ports: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Seed a form from a hydrated response. Children are sorted by position
    /// so the form shows them in their saved order regardless of response
    /// ordering.
    pub fn from_response(response: HostResponse) -> Self {
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
            interfaces,
            ports,
            services,
        } = response;

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
            interfaces: interfaces
                .into_iter()
                .sorted_by_key(|i| i.base.position)
                .collect(),
            ports,
            services: services
                .into_iter()
                .sorted_by_key(|s| s.base.position)
                .collect(),
        }
    }

    pub fn to_host(&self) -> Host {
        Host {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            base: HostBase {
                name: self.name.clone(),
                network_id: self.network_id,
                hostname: self.hostname.clone(),
                description: self.description.clone(),
                source: self.source.clone(),
                virtualization: self.virtualization.clone(),
                hidden: self.hidden,
                tags: self.tags.clone(),
            },
        }
    }

    /// Serialize the form into the external create request. Children become
    /// consolidated inputs carrying the client-side UUIDs.
    pub fn into_create_request(self) -> CreateHostRequest {
        CreateHostRequest {
            name: self.name,
            network_id: self.network_id,
            hostname: self.hostname,
            description: self.description,
            virtualization: self.virtualization,
            hidden: self.hidden,
            tags: self.tags,
            interfaces: self.interfaces.into_iter().map(Into::into).collect(),
            ports: self.ports.into_iter().map(Into::into).collect(),
            services: self.services.into_iter().map(Into::into).collect(),
        }
    }

    /// Serialize the form into the external update request. All three child
    /// collections are re-supplied in full; the server reconciles each to
    /// exactly the given set.
    pub fn into_update_request(self) -> UpdateHostRequest {
        UpdateHostRequest {
            id: self.id,
            name: self.name,
            hostname: self.hostname,
            description: self.description,
            virtualization: self.virtualization,
            hidden: self.hidden,
            tags: self.tags,
            expected_updated_at: Some(self.updated_at),
            interfaces: self.interfaces.into_iter().map(Into::into).collect(),
            ports: self.ports.into_iter().map(Into::into).collect(),
            services: self.services.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create a host together with its initial services.
/// `services: None` = create the host with no services at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHostWithServicesRequest {
    pub host: HostFormData,
    #[serde(default)]
    pub services: Option<Vec<Service>>,
}

/// Update a host and any subset of its child collections.
///
/// Each child field is independent: `Unchanged` leaves that collection
/// alone, `ReplaceWith` reconciles it to exactly the given set (empty =
/// delete all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHostWithServicesRequest {
    pub host: Host,
    /// Interfaces to sync - if provided, server will create/update/delete to match
    #[serde(default)]
    pub interfaces: ChildSync<Interface>,
    /// Ports to sync - if provided, server will create/update/delete to match
    #[serde(default)]
    pub ports: ChildSync<Port>,
    /// Services to sync - if provided, server will create/update/delete to match
    #[serde(default)]
    pub services: ChildSync<Service>,
}

impl UpdateHostWithServicesRequest {
    /// Update host fields only, leaving every child collection untouched.
    pub fn host_only(host: Host) -> Self {
        Self {
            host,
            interfaces: ChildSync::Unchanged,
            ports: ChildSync::Unchanged,
            services: ChildSync::Unchanged,
        }
    }
}

// =============================================================================
// UI FILTER SENTINEL
// =============================================================================

/// Dropdown entry representing "no interface filter". Never persisted and
/// never sent to the API; `InterfaceFilter` strips it out before any request
/// is built.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AllInterfaces {
    pub id: Option<Uuid>,
    pub name: &'static str,
}

pub const ALL_INTERFACES: AllInterfaces = AllInterfaces {
    id: None,
    name: "All Interfaces",
};

/// Interface selection state of list/filter views, resolved from the
/// dropdown before any query or request shape is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterfaceFilter {
    #[default]
    All,
    Interface(Uuid),
}

impl InterfaceFilter {
    /// Translate a dropdown selection. `None` is the `ALL_INTERFACES`
    /// sentinel and means no filtering.
    pub fn from_selection(selected: Option<Uuid>) -> Self {
        match selected {
            None => InterfaceFilter::All,
            Some(id) => InterfaceFilter::Interface(id),
        }
    }

    /// Interface id to filter queries by; `None` = do not filter at all.
    pub fn interface_id(&self) -> Option<Uuid> {
        match self {
            InterfaceFilter::All => None,
            InterfaceFilter::Interface(id) => Some(*id),
        }
    }

    /// A binding scoped to no particular interface listens everywhere, so it
    /// matches any selection.
    pub fn matches_binding(&self, binding: &Binding) -> bool {
        match self {
            InterfaceFilter::All => true,
            InterfaceFilter::Interface(id) => match binding.interface_id() {
                None => true,
                Some(bound) => bound == *id,
            },
        }
    }

    pub fn matches_service(&self, service: &Service) -> bool {
        match self {
            InterfaceFilter::All => true,
            _ => service
                .base
                .bindings
                .iter()
                .any(|binding| self.matches_binding(binding)),
        }
    }
}
