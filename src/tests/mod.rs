use crate::{
    bindings::r#impl::base::Binding,
    hosts::r#impl::{
        api::HostResponse,
        base::{Host, HostBase},
    },
    interfaces::r#impl::base::{Interface, InterfaceBase},
    ports::r#impl::base::{Port, PortBase, PortType},
    services::r#impl::base::{Service, ServiceBase, ServiceDefinitionId},
    shared::types::entities::EntitySource,
};
use mac_address::MacAddress;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use uuid::Uuid;

pub fn host(network_id: &Uuid) -> Host {
    Host::new(HostBase {
        name: "Test Host".to_string(),
        hostname: Some("test.local".to_string()),
        network_id: *network_id,
        description: None,
        source: EntitySource::System,
        virtualization: None,
        hidden: false,
        tags: Vec::new(),
    })
}

pub fn interface(network_id: &Uuid, subnet_id: &Uuid) -> Interface {
    let random_mac: [u8; 6] = std::array::from_fn(|_| fastrand::u8(1..=255));
    Interface::new(InterfaceBase {
        network_id: *network_id,
        subnet_id: *subnet_id,
        ip_address: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)),
        mac_address: Some(MacAddress::new(random_mac)),
        position: 0,
        name: Some("eth0".to_string()),
        host_id: Uuid::nil(), // Placeholder - tests will set correct host_id
    })
}

pub fn port(network_id: &Uuid, host_id: &Uuid) -> Port {
    Port::new(PortBase {
        port_type: PortType::new_tcp(53),
        host_id: *host_id,
        network_id: *network_id,
    })
}

pub fn service(network_id: &Uuid, host_id: &Uuid) -> Service {
    Service::new(ServiceBase {
        name: "Test Service".to_string(),
        host_id: *host_id,
        bindings: vec![],
        network_id: *network_id,
        service_definition: ServiceDefinitionId::new("Dns Server"),
        virtualization: None,
        source: EntitySource::System,
        tags: Vec::new(),
        position: 0,
    })
}

pub fn service_with_port_binding(
    network_id: &Uuid,
    host_id: &Uuid,
    port_id: Uuid,
    interface_id: Option<Uuid>,
) -> Service {
    let mut svc = service(network_id, host_id);
    svc.base.bindings = vec![Binding::new_port_serviceless(port_id, interface_id)];
    svc
}

pub fn host_response(network_id: &Uuid) -> HostResponse {
    let host = host(network_id);
    let subnet_id = Uuid::new_v4();

    let mut iface = interface(network_id, &subnet_id);
    iface.base.host_id = host.id;

    let port = port(network_id, &host.id);
    let service = service_with_port_binding(network_id, &host.id, port.id, Some(iface.id));

    HostResponse::from_host_with_children(host, vec![iface], vec![port], vec![service])
}
