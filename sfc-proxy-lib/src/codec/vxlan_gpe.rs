use bytes::{Bytes, BytesMut};

pub const VXLAN_GPE_HEADER_LEN: usize = 8;

/// An 8-byte VXLAN-GPE header, treated as an opaque passthrough:
/// `flags[u8] reserved1[u16] next_proto[u8] vni[3B] reserved2[u8]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VxlanGpeHeader {
    pub flags: u8,
    pub reserved1: u16,
    pub next_proto: u8,
    pub vni: [u8; 3],
    pub reserved2: u8,
}

impl VxlanGpeHeader {
    pub fn parse(bytes: &Bytes) -> Option<(Self, Bytes)> {
        if bytes.len() < VXLAN_GPE_HEADER_LEN {
            return None;
        }
        let header = VxlanGpeHeader {
            flags: bytes[0],
            reserved1: u16::from_be_bytes([bytes[1], bytes[2]]),
            next_proto: bytes[3],
            vni: [bytes[4], bytes[5], bytes[6]],
            reserved2: bytes[7],
        };
        Some((header, bytes.slice(VXLAN_GPE_HEADER_LEN..)))
    }

    pub fn pack(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(VXLAN_GPE_HEADER_LEN);
        out.extend_from_slice(&[self.flags]);
        out.extend_from_slice(&self.reserved1.to_be_bytes());
        out.extend_from_slice(&[self.next_proto]);
        out.extend_from_slice(&self.vni);
        out.extend_from_slice(&[self.reserved2]);
        out.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let header = VxlanGpeHeader {
            flags: 0x0C,
            reserved1: 0,
            next_proto: 0x04, // Ethernet
            vni: [0x00, 0x00, 0x64],
            reserved2: 0,
        };
        let packed = header.pack();
        let (parsed, remainder) = VxlanGpeHeader::parse(&packed).unwrap();
        assert_eq!(parsed, header);
        assert!(remainder.is_empty());
    }
}
