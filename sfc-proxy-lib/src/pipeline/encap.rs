use bytes::Bytes;
use tracing::trace;

use crate::bundle::rebuild_outer_prefix;
use crate::frame::parse_bare;
use crate::pipeline::EncapDrop;
use crate::session::SessionTables;

/// Runs one frame from the *unencap-in* interface: parses Ethernet/IPv4/TCP
/// only, looks up `S_fwd` by the direct (unswapped) key, and — on a hit —
/// rebuilds the outer stack (outer Ethernet and IP swapped, NSH SI
/// decremented, inner NSH Ethernet left verbatim) ahead of the observed
/// frame. Returns the specific reason on a parse drop, an unprimed flow, or
/// an NSH SI already at zero, so the caller can log (or not) accordingly.
pub fn process_encap(tables: &SessionTables, frame: &Bytes) -> Result<Bytes, EncapDrop> {
    let bare = parse_bare(frame).ok_or(EncapDrop::Malformed)?;
    let bundle = tables.get_forward(&bare.key).ok_or_else(|| {
        trace!(key = ?bare.key, "encap: no forward session for this flow");
        EncapDrop::UnknownFlow
    })?;
    let mut outbound = rebuild_outer_prefix(&bundle, false).ok_or(EncapDrop::SiUnderflow)?;
    outbound.extend_from_slice(frame);
    Ok(Bytes::from(outbound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NshHeader;
    use crate::frame::test_support::build_encapsulated_default;
    use crate::pipeline::decap::process_decap;

    #[test]
    fn primed_flow_rebuilds_outer_stack_with_swaps_and_decremented_si() {
        let tables = SessionTables::new();
        let encapsulated = build_encapsulated_default(40000, 80, 100, 5, b"req");
        let decapped = process_decap(&tables, &encapsulated).expect("must decap");
        let inner_frame = match decapped {
            crate::pipeline::decap::DecapOutput::Forward(frame) => frame,
            crate::pipeline::decap::DecapOutput::Reply(_) => panic!("expected forward"),
        };

        let outbound = process_encap(&tables, &inner_frame).expect("primed flow must rebuild");

        assert!(outbound.ends_with(&inner_frame[..]));

        let (outer_eth, rest) = crate::codec::EthernetHeader::parse(&outbound).unwrap();
        assert_eq!(outer_eth.dst, [0xBB; 6]);
        assert_eq!(outer_eth.src, [0xAA; 6]);

        let (outer_ip, rest) = crate::codec::Ipv4Header::parse(&rest).unwrap();
        assert_eq!(outer_ip.src, [192, 168, 1, 2]);
        assert_eq!(outer_ip.dst, [192, 168, 1, 1]);

        let rest = rest.slice(crate::codec::UDP_HEADER_LEN..);
        let rest = rest.slice(crate::codec::VXLAN_GPE_HEADER_LEN..);
        let rest = rest.slice(crate::codec::ETHERNET_HEADER_LEN..);
        let (nsh, _) = NshHeader::parse(&rest).unwrap();
        assert_eq!(nsh.si(), 4);
        assert_eq!(nsh.spi(), 100);
    }

    #[test]
    fn unknown_flow_drops_silently() {
        let tables = SessionTables::new();
        let bare = build_bare_frame(40000, 80);
        assert_eq!(process_encap(&tables, &bare), Err(EncapDrop::UnknownFlow));
    }

    #[test]
    fn si_already_zero_is_reported_distinctly_from_unknown_flow() {
        let tables = SessionTables::new();
        let encapsulated = build_encapsulated_default(40000, 80, 100, 0, b"req");
        process_decap(&tables, &encapsulated).expect("must decap");
        let bare = build_bare_frame(40000, 80);
        assert_eq!(process_encap(&tables, &bare), Err(EncapDrop::SiUnderflow));
    }

    fn build_bare_frame(src_port: u16, dst_port: u16) -> Bytes {
        use crate::codec::{EthernetHeader, Ipv4Header, TcpHeader, ETHERTYPE_IPV4, IP_PROTO_TCP};
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
}
