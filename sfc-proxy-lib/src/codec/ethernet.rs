use bytes::{Bytes, BytesMut};

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_IPV6: u16 = 0x86DD;
pub const ETHERTYPE_NSH: u16 = 0x894F;

pub const ETHERNET_HEADER_LEN: usize = 14;

/// A 14-byte Ethernet header: `eth_dst[6] eth_src[6] eth_type[u16]`.
///
/// No 802.1Q tag handling: a VLAN-tagged frame is simply parsed as if the
/// tag bytes were the ethertype, and will fail the caller's ethertype check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: [u8; 6],
    pub src: [u8; 6],
    pub eth_type: u16,
}

impl EthernetHeader {
    /// Parses a header off the front of `bytes`, returning it and the remainder.
    pub fn parse(bytes: &Bytes) -> Option<(Self, Bytes)> {
        if bytes.len() < ETHERNET_HEADER_LEN {
            return None;
        }
        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        dst.copy_from_slice(&bytes[0..6]);
        src.copy_from_slice(&bytes[6..12]);
        let eth_type = u16::from_be_bytes([bytes[12], bytes[13]]);
        let header = EthernetHeader { dst, src, eth_type };
        Some((header, bytes.slice(ETHERNET_HEADER_LEN..)))
    }

    pub fn pack(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(ETHERNET_HEADER_LEN);
        out.extend_from_slice(&self.dst);
        out.extend_from_slice(&self.src);
        out.extend_from_slice(&self.eth_type.to_be_bytes());
        out.freeze()
    }

    /// Returns a copy of this header with `src`/`dst` exchanged.
    pub fn swapped(&self) -> Self {
        EthernetHeader {
            dst: self.src,
            src: self.dst,
            eth_type: self.eth_type,
        }
    }
}

/// Parses the leading 14 bytes of `bundle_bytes` as an Ethernet header, swaps
/// `src`/`dst`, and repacks. Used to rebuild a stored outer-Ethernet slice at
/// replay time without touching the stored bundle itself.
pub fn swap_packed(bundle_bytes: &Bytes) -> Option<Bytes> {
    let (header, _) = EthernetHeader::parse(bundle_bytes)?;
    Some(header.swapped().pack())
}
