use crate::codec::{EthernetHeader, Ipv4Header, TcpHeader};

/// The inner 7-tuple identifying a single service-function session:
/// `(eth_dst, eth_src, eth_type, ip_dst, ip_src, tcp_dst_port, tcp_src_port)`.
///
/// Equality is exact byte equality on addresses and exact integer equality
/// on ports/type, which `#[derive(PartialEq, Eq, Hash)]` gives for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowKey {
    pub eth_dst: [u8; 6],
    pub eth_src: [u8; 6],
    pub eth_type: u16,
    pub ip_dst: [u8; 4],
    pub ip_src: [u8; 4],
    pub tcp_dst_port: u16,
    pub tcp_src_port: u16,
}

impl FlowKey {
    /// Derives the key from a de-encapsulated packet's inner headers.
    pub fn from_headers(eth: &EthernetHeader, ip: &Ipv4Header, tcp: &TcpHeader) -> Self {
        FlowKey {
            eth_dst: eth.dst,
            eth_src: eth.src,
            eth_type: eth.eth_type,
            ip_dst: ip.dst,
            ip_src: ip.src,
            tcp_dst_port: tcp.dst_port,
            tcp_src_port: tcp.src_port,
        }
    }

    /// The same 7-tuple with `eth_src<->eth_dst`, `ip_src<->ip_dst`, and
    /// `tcp_src_port<->tcp_dst_port` exchanged. `eth_type` is unchanged.
    pub fn swap(&self) -> Self {
        FlowKey {
            eth_dst: self.eth_src,
            eth_src: self.eth_dst,
            eth_type: self.eth_type,
            ip_dst: self.ip_src,
            ip_src: self.ip_dst,
            tcp_dst_port: self.tcp_src_port,
            tcp_src_port: self.tcp_dst_port,
        }
    }
}
