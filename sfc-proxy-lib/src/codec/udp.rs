use bytes::{Bytes, BytesMut};

pub const VXLAN_GPE_PORT: u16 = 4790;
pub const UDP_HEADER_LEN: usize = 8;

/// An 8-byte UDP header: `src_port dst_port length checksum`, all u16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub length: u16,
    pub checksum: u16,
}

impl UdpHeader {
    pub fn parse(bytes: &Bytes) -> Option<(Self, Bytes)> {
        if bytes.len() < UDP_HEADER_LEN {
            return None;
        }
        let header = UdpHeader {
            src_port: u16::from_be_bytes([bytes[0], bytes[1]]),
            dst_port: u16::from_be_bytes([bytes[2], bytes[3]]),
            length: u16::from_be_bytes([bytes[4], bytes[5]]),
            checksum: u16::from_be_bytes([bytes[6], bytes[7]]),
        };
        Some((header, bytes.slice(UDP_HEADER_LEN..)))
    }

    pub fn pack(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(UDP_HEADER_LEN);
        out.extend_from_slice(&self.src_port.to_be_bytes());
        out.extend_from_slice(&self.dst_port.to_be_bytes());
        out.extend_from_slice(&self.length.to_be_bytes());
        out.extend_from_slice(&self.checksum.to_be_bytes());
        out.freeze()
    }
}
