use bytes::{Bytes, BytesMut};

use super::checksum::internet_checksum;

pub const IP_PROTO_TCP: u8 = 6;
pub const IP_PROTO_UDP: u8 = 17;

pub const IPV4_BASE_HEADER_LEN: usize = 20;

/// An IPv4 base header, per the field grouping used on the wire here:
/// `ver_ihl_tos[u16] total_length[u16] id[u16] flags_frag[u16] ttl[u8]
/// protocol[u8] checksum[u16] src[4] dst[4]`.
///
/// IHL (and thus header length) lives in the high byte of `ver_ihl_tos`.
/// Options beyond the base 20 bytes are consumed by `parse` but not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub ver_ihl_tos: u16,
    pub total_length: u16,
    pub id: u16,
    pub flags_frag: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src: [u8; 4],
    pub dst: [u8; 4],
}

impl Ipv4Header {
    /// Header length in bytes, derived from the low nibble of the first byte.
    pub fn header_len(&self) -> usize {
        let ihl = ((self.ver_ihl_tos >> 8) & 0x0F) as usize;
        ihl * 4
    }

    /// Parses the header, consuming exactly `header_len()` bytes (base fields
    /// plus any options, which are discarded) and returning the remainder.
    pub fn parse(bytes: &Bytes) -> Option<(Self, Bytes)> {
        if bytes.len() < IPV4_BASE_HEADER_LEN {
            return None;
        }
        let ver_ihl_tos = u16::from_be_bytes([bytes[0], bytes[1]]);
        let total_length = u16::from_be_bytes([bytes[2], bytes[3]]);
        let id = u16::from_be_bytes([bytes[4], bytes[5]]);
        let flags_frag = u16::from_be_bytes([bytes[6], bytes[7]]);
        let ttl = bytes[8];
        let protocol = bytes[9];
        let checksum = u16::from_be_bytes([bytes[10], bytes[11]]);
        let mut src = [0u8; 4];
        let mut dst = [0u8; 4];
        src.copy_from_slice(&bytes[12..16]);
        dst.copy_from_slice(&bytes[16..20]);

        let header = Ipv4Header {
            ver_ihl_tos,
            total_length,
            id,
            flags_frag,
            ttl,
            protocol,
            checksum,
            src,
            dst,
        };
        let header_len = header.header_len();
        if bytes.len() < header_len {
            return None;
        }
        Some((header, bytes.slice(header_len..)))
    }

    /// Packs only the 20-byte base header; any options the original frame
    /// carried are never reconstructed, matching the distilled parse above.
    pub fn pack(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(IPV4_BASE_HEADER_LEN);
        out.extend_from_slice(&self.ver_ihl_tos.to_be_bytes());
        out.extend_from_slice(&self.total_length.to_be_bytes());
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags_frag.to_be_bytes());
        out.extend_from_slice(&[self.ttl, self.protocol]);
        out.extend_from_slice(&self.checksum.to_be_bytes());
        out.extend_from_slice(&self.src);
        out.extend_from_slice(&self.dst);
        out.freeze()
    }

    /// Returns a copy with `src`/`dst` exchanged. The checksum field is left
    /// untouched: a pure address swap preserves the one's-complement sum, so
    /// the stored checksum stays valid without recomputation.
    pub fn swapped(&self) -> Self {
        Ipv4Header {
            src: self.dst,
            dst: self.src,
            ..*self
        }
    }

    /// Sets `total_length` and recomputes the header checksum with the
    /// checksum field zeroed during the sum.
    pub fn rewrite_total_length(&self, total_length: u16) -> Self {
        let mut header = Ipv4Header {
            total_length,
            checksum: 0,
            ..*self
        };
        let packed = header.pack();
        header.checksum = internet_checksum(&packed);
        header
    }
}

/// Parses the leading IPv4 base header out of a stored outer-IP slice, swaps
/// `src`/`dst`, and repacks — used to rebuild the outer IP header at replay
/// time. See [`Ipv4Header::swapped`] for why the checksum is left alone.
pub fn swap_packed(bundle_bytes: &Bytes) -> Option<Bytes> {
    let (header, _) = Ipv4Header::parse(bundle_bytes)?;
    Some(header.swapped().pack())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ipv4Header {
        Ipv4Header {
            ver_ihl_tos: 0x4500,
            total_length: 40,
            id: 0x1234,
            flags_frag: 0x4000,
            ttl: 64,
            protocol: IP_PROTO_TCP,
            checksum: 0,
            src: [10, 0, 0, 1],
            dst: [10, 0, 0, 2],
        }
    }

    #[test]
    fn round_trip() {
        let header = sample();
        let packed = header.pack();
        let (parsed, remainder) = Ipv4Header::parse(&packed).unwrap();
        assert_eq!(parsed, header);
        assert!(remainder.is_empty());
    }

    #[test]
    fn header_len_reads_ihl_nibble() {
        let header = sample();
        assert_eq!(header.header_len(), 20);
    }

    #[test]
    fn parse_strips_options_beyond_base_header() {
        let header = Ipv4Header {
            ver_ihl_tos: 0x4600, // IHL = 6 -> 24-byte header
            ..sample()
        };
        let mut packed = header.pack().to_vec();
        packed.extend_from_slice(&[0, 0, 0, 0]); // 4 bytes of options
        packed.extend_from_slice(b"payload");
        let bytes = Bytes::from(packed);
        let (parsed, remainder) = Ipv4Header::parse(&bytes).unwrap();
        assert_eq!(parsed.header_len(), 24);
        assert_eq!(&remainder[..], b"payload");
    }

    #[test]
    fn swap_exchanges_src_dst_and_keeps_checksum() {
        let header = sample();
        let swapped = header.swapped();
        assert_eq!(swapped.src, header.dst);
        assert_eq!(swapped.dst, header.src);
        assert_eq!(swapped.checksum, header.checksum);
    }

    #[test]
    fn rewrite_total_length_produces_valid_checksum() {
        let header = sample().rewrite_total_length(1500);
        assert_eq!(header.total_length, 1500);
        let packed = header.pack();
        assert_eq!(internet_checksum(&packed), 0x0000);
    }
}
