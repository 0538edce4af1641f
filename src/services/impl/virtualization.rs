use serde::{Deserialize, Serialize};

/// Container/VM context a service runs in.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(tag = "type")]
pub enum ServiceVirtualization {
    Docker(DockerVirtualization),
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
pub struct DockerVirtualization {
    pub container_id: Option<String>,
    pub container_name: Option<String>,
}
