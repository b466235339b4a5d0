//! Shared frame-building helpers for the scenario tests in this directory.

use bytes::Bytes;
use sfc_proxy_lib::codec::{
    EthernetHeader, Ipv4Header, NshHeader, TcpHeader, UdpHeader, VxlanGpeHeader, ETHERTYPE_IPV4,
    ETHERTYPE_NSH, IP_PROTO_TCP, IP_PROTO_UDP, VXLAN_GPE_PORT,
};

#[allow(clippy::too_many_arguments)]
pub fn build_encapsulated(
    outer_eth_type: u16,
    outer_proto: u8,
    udp_dst_port: u16,
    inner_ip_proto: u8,
    inner_src_port: u16,
    inner_dst_port: u16,
    spi: u32,
    si: u8,
    inner_payload: &[u8],
) -> Bytes {
    let mut buf = Vec::new();

    buf.extend_from_slice(
        &EthernetHeader {
            dst: [0xAA; 6],
            src: [0xBB; 6],
            eth_type: outer_eth_type,
        }
        .pack(),
    );

    let inner_eth = EthernetHeader {
        dst: [1, 2, 3, 4, 5, 6],
        src: [6, 5, 4, 3, 2, 1],
        eth_type: ETHERTYPE_IPV4,
    }
    .pack();
    let inner_ip = Ipv4Header {
        ver_ihl_tos: 0x4500,
        total_length: (20 + 20 + inner_payload.len()) as u16,
        id: 0,
        flags_frag: 0,
        ttl: 64,
        protocol: inner_ip_proto,
        checksum: 0,
        src: [10, 0, 0, 1],
        dst: [10, 0, 0, 2],
    }
    .pack();
    let inner_tcp = TcpHeader {
        src_port: inner_src_port,
        dst_port: inner_dst_port,
        seq: 1,
        ack: 0,
        offset_reserved_flags: 5 << 12,
        window: 0,
        checksum: 0,
        urgent_ptr: 0,
    }
    .pack();

    let mut inner_frame = Vec::new();
    inner_frame.extend_from_slice(&inner_eth);
    inner_frame.extend_from_slice(&inner_ip);
    inner_frame.extend_from_slice(&inner_tcp);
    inner_frame.extend_from_slice(inner_payload);

    let vxlan = VxlanGpeHeader {
        flags: 0x0C,
        reserved1: 0,
        next_proto: 0x04,
        vni: [0, 0, 0x64],
        reserved2: 0,
    }
    .pack();
    let nsh_eth = EthernetHeader {
        dst: [7, 7, 7, 7, 7, 7],
        src: [8, 8, 8, 8, 8, 8],
        eth_type: ETHERTYPE_NSH,
    }
    .pack();
    let nsh = NshHeader {
        flags_length: (0x02 << 8) | 6,
        md_type: 1,
        next_proto: 3,
        service_path_header: (spi << 8) | u32::from(si),
        ctx: [0, 0, 0, 0],
    }
    .pack();
    let udp = UdpHeader {
        src_port: 54321,
        dst_port: udp_dst_port,
        length: (8 + vxlan.len() + nsh_eth.len() + nsh.len() + inner_frame.len()) as u16,
        checksum: 0,
    }
    .pack();
    let outer_ip = Ipv4Header {
        ver_ihl_tos: 0x4500,
        total_length: (20 + udp.len() + vxlan.len() + nsh_eth.len() + nsh.len() + inner_frame.len())
            as u16,
        id: 0,
        flags_frag: 0,
        ttl: 64,
        protocol: outer_proto,
        checksum: 0,
        src: [192, 168, 1, 1],
        dst: [192, 168, 1, 2],
    }
    .pack();

    buf.extend_from_slice(&outer_ip);
    buf.extend_from_slice(&udp);
    buf.extend_from_slice(&vxlan);
    buf.extend_from_slice(&nsh_eth);
    buf.extend_from_slice(&nsh);
    buf.extend_from_slice(&inner_frame);
    Bytes::from(buf)
}

pub fn build_encapsulated_default(
    inner_src_port: u16,
    inner_dst_port: u16,
    spi: u32,
    si: u8,
    inner_payload: &[u8],
) -> Bytes {
    build_encapsulated(
        ETHERTYPE_IPV4,
        IP_PROTO_UDP,
        VXLAN_GPE_PORT,
        IP_PROTO_TCP,
        inner_src_port,
        inner_dst_port,
        spi,
        si,
        inner_payload,
    )
}

pub fn build_bare_frame(src_port: u16, dst_port: u16) -> Bytes {
    let eth = EthernetHeader {
        dst: [1, 2, 3, 4, 5, 6],
        src: [6, 5, 4, 3, 2, 1],
        eth_type: ETHERTYPE_IPV4,
    }
    .pack();
    let ip = Ipv4Header {
        ver_ihl_tos: 0x4500,
        total_length: 40,
        id: 0,
        flags_frag: 0,
        ttl: 64,
        protocol: IP_PROTO_TCP,
        checksum: 0,
        src: [10, 0, 0, 1],
        dst: [10, 0, 0, 2],
    }
    .pack();
    let tcp = TcpHeader {
        src_port,
        dst_port,
        seq: 1,
        ack: 0,
        offset_reserved_flags: 5 << 12,
        window: 0,
        checksum: 0,
        urgent_ptr: 0,
    }
    .pack();
    let mut buf = Vec::new();
    buf.extend_from_slice(&eth);
    buf.extend_from_slice(&ip);
    buf.extend_from_slice(&tcp);
    Bytes::from(buf)
}
