use bytes::{Bytes, BytesMut};

use super::checksum::internet_checksum;
use super::ipv4::IP_PROTO_TCP;

pub const TCP_BASE_HEADER_LEN: usize = 20;

/// A TCP header's fixed 20-byte portion. Options and padding (if the data
/// offset indicates a longer header) and the payload are kept as separate
/// opaque byte ranges by the caller rather than modeled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq: u32,
    pub ack: u32,
    pub offset_reserved_flags: u16,
    pub window: u16,
    pub checksum: u16,
    pub urgent_ptr: u16,
}

impl TcpHeader {
    /// Data offset in bytes, from the top nibble of byte 12 of the header.
    pub fn header_len(&self) -> usize {
        let data_offset_words = (self.offset_reserved_flags >> 12) & 0x0F;
        data_offset_words as usize * 4
    }

    /// Parses the base 20-byte header, then strips exactly `header_len()`
    /// bytes (base fields plus any options+padding, which are discarded)
    /// and returns the payload as the remainder.
    pub fn parse(bytes: &Bytes) -> Option<(Self, Bytes)> {
        if bytes.len() < TCP_BASE_HEADER_LEN {
            return None;
        }
        let header = TcpHeader {
            src_port: u16::from_be_bytes([bytes[0], bytes[1]]),
            dst_port: u16::from_be_bytes([bytes[2], bytes[3]]),
            seq: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            ack: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            offset_reserved_flags: u16::from_be_bytes([bytes[12], bytes[13]]),
            window: u16::from_be_bytes([bytes[14], bytes[15]]),
            checksum: u16::from_be_bytes([bytes[16], bytes[17]]),
            urgent_ptr: u16::from_be_bytes([bytes[18], bytes[19]]),
        };
        let header_len = header.header_len();
        if bytes.len() < header_len {
            return None;
        }
        Some((header, bytes.slice(header_len..)))
    }

    pub fn pack(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(TCP_BASE_HEADER_LEN);
        out.extend_from_slice(&self.src_port.to_be_bytes());
        out.extend_from_slice(&self.dst_port.to_be_bytes());
        out.extend_from_slice(&self.seq.to_be_bytes());
        out.extend_from_slice(&self.ack.to_be_bytes());
        out.extend_from_slice(&self.offset_reserved_flags.to_be_bytes());
        out.extend_from_slice(&self.window.to_be_bytes());
        out.extend_from_slice(&self.checksum.to_be_bytes());
        out.extend_from_slice(&self.urgent_ptr.to_be_bytes());
        out.freeze()
    }
}

/// The 12-byte IPv4 pseudo-header used in the TCP checksum, per RFC 793.
pub struct PseudoHeader {
    pub src: [u8; 4],
    pub dst: [u8; 4],
    pub tcp_length: u16,
}

impl PseudoHeader {
    fn pack(&self) -> [u8; 12] {
        let mut buf = [0u8; 12];
        buf[0..4].copy_from_slice(&self.src);
        buf[4..8].copy_from_slice(&self.dst);
        buf[8] = 0;
        buf[9] = IP_PROTO_TCP;
        buf[10..12].copy_from_slice(&self.tcp_length.to_be_bytes());
        buf
    }
}

/// Computes the TCP checksum over pseudo-header + header + options + payload,
/// with the header's checksum field zeroed during the sum.
pub fn tcp_checksum(
    pseudo: &PseudoHeader,
    header: &TcpHeader,
    options: &[u8],
    payload: &[u8],
) -> u16 {
    let zeroed = TcpHeader {
        checksum: 0,
        ..*header
    };
    let mut buf = Vec::with_capacity(12 + TCP_BASE_HEADER_LEN + options.len() + payload.len());
    buf.extend_from_slice(&pseudo.pack());
    buf.extend_from_slice(&zeroed.pack());
    buf.extend_from_slice(options);
    buf.extend_from_slice(payload);
    internet_checksum(&buf)
}
