//! The three cooperating pipelines, each a pure function from one observed
//! frame plus the shared session tables to an optional outbound frame (or,
//! for the decap pipeline, a direction-tagged one). None of these functions
//! know about real sockets — that lives in the binary crate, which supplies
//! frames via `bytes::Bytes` and drains outbound frames with
//! [`crate::send::send_drained`].

pub mod decap;
pub mod encap;
pub mod reverse_encap;

pub use decap::{process_decap, DecapOutput};
pub use encap::process_encap;
pub use reverse_encap::process_reverse_encap;

/// Why the Encap or Reverse-encap pipeline produced no outbound frame.
///
/// Kept distinct from a plain `Option` so a caller can tell a routine
/// "flow not primed yet" drop apart from the NSH SI already being zero —
/// the latter is its own open-question case (see `bundle::rebuild_outer_prefix`)
/// and shouldn't be logged as if it were just an unrecognized flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncapDrop {
    /// The frame didn't parse as Ethernet/IPv4/TCP.
    Malformed,
    /// No forward session exists for this flow (or, on the reverse-encap
    /// side, for its swapped key).
    UnknownFlow,
    /// A forward session exists, but its stored NSH Service Index was
    /// already zero; the decrement never wraps.
    SiUnderflow,
}
