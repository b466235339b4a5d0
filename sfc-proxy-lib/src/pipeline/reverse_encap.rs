use bytes::Bytes;
use tracing::trace;

use crate::bundle::rebuild_outer_prefix;
use crate::frame::parse_bare;
use crate::pipeline::EncapDrop;
use crate::session::SessionTables;

/// Runs one frame from the *unencap-out* interface. Symmetric to
/// [`crate::pipeline::encap::process_encap`], but the direct key is only
/// used to confirm `swap(k) ∈ S_fwd`; the replay bundle itself is fetched
/// from `S_rev[swap(k)]`, and both the outer Ethernet and the inner
/// NSH-carrying Ethernet of that bundle are swapped.
pub fn process_reverse_encap(tables: &SessionTables, frame: &Bytes) -> Result<Bytes, EncapDrop> {
    let bare = parse_bare(frame).ok_or(EncapDrop::Malformed)?;
    let swapped = bare.key.swap();
    if !tables.contains_forward(&swapped) {
        trace!(key = ?swapped, "reverse_encap: no forward session for this (swapped) flow");
        return Err(EncapDrop::UnknownFlow);
    }
    let bundle = tables.get_reply(&swapped).ok_or(EncapDrop::UnknownFlow)?;
    let mut outbound = rebuild_outer_prefix(&bundle, true).ok_or(EncapDrop::SiUnderflow)?;
    outbound.extend_from_slice(frame);
    Ok(Bytes::from(outbound))
}
