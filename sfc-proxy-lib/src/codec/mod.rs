//! Header codecs for the stacked chain this proxy strips and replays:
//! outer Ethernet, IPv4, UDP, VXLAN-GPE, inner Ethernet, NSH, inner Ethernet,
//! inner IPv4, TCP.
//!
//! Each header type exposes `parse(bytes) -> Option<(Header, Bytes)>` and
//! `pack(&self) -> Bytes`. All multi-byte integers are big-endian.

pub mod checksum;
pub mod ethernet;
pub mod ipv4;
pub mod nsh;
pub mod tcp;
pub mod udp;
pub mod vxlan_gpe;

pub use checksum::internet_checksum;
pub use ethernet::{
    EthernetHeader, ETHERNET_HEADER_LEN, ETHERTYPE_IPV4, ETHERTYPE_IPV6, ETHERTYPE_NSH,
};
pub use ipv4::{Ipv4Header, IP_PROTO_TCP, IP_PROTO_UDP, IPV4_BASE_HEADER_LEN};
pub use nsh::{NshHeader, NSH_HEADER_LEN};
pub use tcp::{PseudoHeader, TcpHeader, TCP_BASE_HEADER_LEN};
pub use udp::{UdpHeader, UDP_HEADER_LEN, VXLAN_GPE_PORT};
pub use vxlan_gpe::{VxlanGpeHeader, VXLAN_GPE_HEADER_LEN};
