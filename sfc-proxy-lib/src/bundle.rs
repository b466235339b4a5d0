use bytes::Bytes;
use tracing::warn;

use crate::codec::{ethernet, ipv4, nsh};

/// The six preserved outer-header byte slices needed to reconstruct the
/// encapsulation on the return path. Stored verbatim as received; every
/// field here is a cheap `Bytes` clone of a region of the frame that was
/// de-encapsulated, not a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBundle {
    pub outer_eth: Bytes,
    pub outer_ip: Bytes,
    pub udp: Bytes,
    pub vxlan: Bytes,
    pub nsh_eth: Bytes,
    pub nsh: Bytes,
}

/// What a replay needs from a bundle: the rebuilt outer-stack prefix to
/// prepend ahead of the caller's own frame bytes.
///
/// Returns `None` if the stored NSH's Service Index is already zero (an
/// unconditional decrement is never allowed to wrap) or if any stored slice
/// is too short to parse back out, which would indicate the bundle was
/// captured from a malformed frame in the first place.
pub fn rebuild_outer_prefix(bundle: &HeaderBundle, swap_nsh_eth: bool) -> Option<Vec<u8>> {
    let eth = ethernet::swap_packed(&bundle.outer_eth)?;
    let ip = ipv4::swap_packed(&bundle.outer_ip)?;
    let nsh_eth = if swap_nsh_eth {
        ethernet::swap_packed(&bundle.nsh_eth)?
    } else {
        bundle.nsh_eth.clone()
    };
    let nsh = match nsh::decrement_si_packed(&bundle.nsh) {
        Some(nsh) => nsh,
        None => {
            warn!("NSH Service Index already zero, dropping packet instead of wrapping");
            return None;
        }
    };

    let mut out = Vec::with_capacity(
        eth.len() + ip.len() + bundle.udp.len() + bundle.vxlan.len() + nsh_eth.len() + nsh.len(),
    );
    out.extend_from_slice(&eth);
    out.extend_from_slice(&ip);
    out.extend_from_slice(&bundle.udp);
    out.extend_from_slice(&bundle.vxlan);
    out.extend_from_slice(&nsh_eth);
    out.extend_from_slice(&nsh);
    Some(out)
}
