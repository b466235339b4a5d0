use bytes::Bytes;

use crate::bundle::HeaderBundle;
use crate::codec::{
    EthernetHeader, Ipv4Header, TcpHeader, UdpHeader, VxlanGpeHeader, ETHERTYPE_IPV4,
    ETHERTYPE_NSH, IP_PROTO_TCP, IP_PROTO_UDP, VXLAN_GPE_PORT,
};
use crate::flow::FlowKey;

/// The result of descending the full stacked header chain on the *encap*
/// interface: the preserved outer slices plus the inner flow key and the
/// inner frame (inner Ethernet through TCP payload) to hand to the service
/// function.
pub struct DecapFrame {
    pub bundle: HeaderBundle,
    pub key: FlowKey,
    pub inner_frame: Bytes,
}

/// Descends Ethernet -> IPv4 -> UDP -> VXLAN-GPE -> inner Ethernet -> NSH ->
/// inner Ethernet -> inner IPv4 -> inner TCP, per the fixed chain this proxy
/// understands. Returns `None` the moment any precondition fails; the
/// caller treats that as "drop the frame, no state change."
pub fn parse_encapsulated(frame: &Bytes) -> Option<DecapFrame> {
    let (outer_eth_hdr, rest) = EthernetHeader::parse(frame)?;
    if outer_eth_hdr.eth_type != ETHERTYPE_IPV4 {
        return None;
    }
    let outer_eth = frame.slice(0..frame.len() - rest.len());

    let (outer_ip_hdr, rest2) = Ipv4Header::parse(&rest)?;
    if outer_ip_hdr.protocol != IP_PROTO_UDP {
        return None;
    }
    let outer_ip = rest.slice(0..rest.len() - rest2.len());

    let (udp_hdr, rest3) = UdpHeader::parse(&rest2)?;
    if udp_hdr.dst_port != VXLAN_GPE_PORT {
        return None;
    }
    let udp = rest2.slice(0..rest2.len() - rest3.len());

    let (_vxlan_hdr, rest4) = VxlanGpeHeader::parse(&rest3)?;
    let vxlan = rest3.slice(0..rest3.len() - rest4.len());

    let (nsh_eth_hdr, rest5) = EthernetHeader::parse(&rest4)?;
    if nsh_eth_hdr.eth_type != ETHERTYPE_NSH {
        return None;
    }
    let nsh_eth = rest4.slice(0..rest4.len() - rest5.len());

    let (_nsh_hdr, rest6) = crate::codec::NshHeader::parse(&rest5)?;
    let nsh = rest5.slice(0..rest5.len() - rest6.len());

    // rest6 is the inner frame: inner Ethernet through TCP payload.
    let inner_frame = rest6.clone();
    let (inner_eth_hdr, rest7) = EthernetHeader::parse(&rest6)?;
    let (inner_ip_hdr, rest8) = Ipv4Header::parse(&rest7)?;
    if inner_ip_hdr.protocol != IP_PROTO_TCP {
        return None;
    }
    let (inner_tcp_hdr, _rest9) = TcpHeader::parse(&rest8)?;

    let key = FlowKey::from_headers(&inner_eth_hdr, &inner_ip_hdr, &inner_tcp_hdr);

    Some(DecapFrame {
        bundle: HeaderBundle {
            outer_eth,
            outer_ip,
            udp,
            vxlan,
            nsh_eth,
            nsh,
        },
        key,
        inner_frame,
    })
}

/// The result of parsing a bare (no outer stack) frame observed on
/// `unencap-in` or `unencap-out`: just enough to build the flow key.
pub struct BareFrame {
    pub key: FlowKey,
}

/// Parses Ethernet/IPv4/TCP only, requiring IPv4 and TCP, as both the Encap
/// and Reverse-encap pipelines do against the service function's output.
pub fn parse_bare(frame: &Bytes) -> Option<BareFrame> {
    let (eth_hdr, rest) = EthernetHeader::parse(frame)?;
    if eth_hdr.eth_type != ETHERTYPE_IPV4 {
        return None;
    }
    let (ip_hdr, rest2) = Ipv4Header::parse(&rest)?;
    if ip_hdr.protocol != IP_PROTO_TCP {
        return None;
    }
    let (tcp_hdr, _rest3) = TcpHeader::parse(&rest2)?;

    Some(BareFrame {
        key: FlowKey::from_headers(&eth_hdr, &ip_hdr, &tcp_hdr),
    })
}
