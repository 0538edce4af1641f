use serde::{Deserialize, Serialize};

/// Virtualization platform a host runs on. Proxmox guests carry enough
/// detail to link back to the hypervisor; anything else is `Generic`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(tag = "type")]
pub enum HostVirtualization {
    Generic(GenericVirtualization),
    Proxmox(ProxmoxVirtualization),
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
pub struct GenericVirtualization {
    /// Free-form platform name ("kvm", "esxi", "hyper-v")
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
pub struct ProxmoxVirtualization {
    /// Proxmox node the guest resides on
    pub node: Option<String>,
    pub vmid: Option<u32>,
    pub vm_name: Option<String>,
}
