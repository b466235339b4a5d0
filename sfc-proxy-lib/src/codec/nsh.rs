use bytes::{Bytes, BytesMut};

pub const NSH_HEADER_LEN: usize = 24;
pub const NSH_MD_TYPE_1: u8 = 1;

/// An NSH MD-Type 1 header (draft-ietf-sfc-nsh-05): 8-byte base header plus
/// four 32-bit context words.
///
/// `service_path_header` packs the 24-bit SPI in its upper bits and the
/// 8-bit SI in its lowest byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NshHeader {
    pub flags_length: u16,
    pub md_type: u8,
    pub next_proto: u8,
    pub service_path_header: u32,
    pub ctx: [u32; 4],
}

impl NshHeader {
    pub fn parse(bytes: &Bytes) -> Option<(Self, Bytes)> {
        if bytes.len() < NSH_HEADER_LEN {
            return None;
        }
        let flags_length = u16::from_be_bytes([bytes[0], bytes[1]]);
        let md_type = bytes[2];
        let next_proto = bytes[3];
        let service_path_header = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let mut ctx = [0u32; 4];
        for (i, word) in ctx.iter_mut().enumerate() {
            let off = 8 + i * 4;
            *word = u32::from_be_bytes([
                bytes[off],
                bytes[off + 1],
                bytes[off + 2],
                bytes[off + 3],
            ]);
        }
        let header = NshHeader {
            flags_length,
            md_type,
            next_proto,
            service_path_header,
            ctx,
        };
        Some((header, bytes.slice(NSH_HEADER_LEN..)))
    }

    pub fn pack(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(NSH_HEADER_LEN);
        out.extend_from_slice(&self.flags_length.to_be_bytes());
        out.extend_from_slice(&[self.md_type, self.next_proto]);
        out.extend_from_slice(&self.service_path_header.to_be_bytes());
        for word in &self.ctx {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out.freeze()
    }

    /// Service Path Identifier: the upper 24 bits of the service path header.
    pub fn spi(&self) -> u32 {
        self.service_path_header >> 8
    }

    /// Service Index: the lowest 8 bits of the service path header.
    pub fn si(&self) -> u8 {
        (self.service_path_header & 0xFF) as u8
    }

    /// Returns a copy with SI decremented by one, or `None` at `SI == 0`.
    ///
    /// The decrement is never allowed to wrap: a chain whose SI has already
    /// reached zero has a bookkeeping bug upstream, and silently wrapping to
    /// 255 would hand the packet to the wrong hop in a different chain.
    pub fn decrement_si(&self) -> Option<Self> {
        let si = self.si();
        if si == 0 {
            return None;
        }
        let spi_bits = self.service_path_header & !0xFF;
        Some(NshHeader {
            service_path_header: spi_bits | u32::from(si - 1),
            ..*self
        })
    }
}

/// Parses the NSH header out of a stored bundle slice, decrements its SI, and
/// repacks. Returns `None` on a truncated bundle slice or SI underflow.
pub fn decrement_si_packed(bundle_bytes: &Bytes) -> Option<Bytes> {
    let (header, _) = NshHeader::parse(bundle_bytes)?;
    Some(header.decrement_si()?.pack())
}
