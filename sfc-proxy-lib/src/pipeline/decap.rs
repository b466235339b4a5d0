use bytes::Bytes;
use tracing::trace;

use crate::frame::parse_encapsulated;
use crate::session::SessionTables;

/// Which unencapsulated interface the inner frame should be emitted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecapOutput {
    /// First-seen flow: emit on `unencap-out`.
    Forward(Bytes),
    /// Matches an existing flow under swap: emit on `unencap-in`.
    Reply(Bytes),
}

/// Runs one frame from the *encap* interface through the full stacked parse,
/// records the appropriate session-table entry, and returns the inner frame
/// tagged with its emission direction. Returns `None` on any parse drop,
/// leaving both tables untouched.
pub fn process_decap(tables: &SessionTables, frame: &Bytes) -> Option<DecapOutput> {
    let decapped = match parse_encapsulated(frame) {
        Some(d) => d,
        None => {
            trace!(bytes = frame.len(), "decap: frame did not match the expected header chain");
            return None;
        }
    };
    let swapped = decapped.key.swap();

    if tables.contains_forward(&swapped) {
        tables.insert_reply(swapped, decapped.bundle);
        trace!(?swapped, "decap: reply direction, recorded into S_rev");
        Some(DecapOutput::Reply(decapped.inner_frame))
    } else {
        trace!(key = ?decapped.key, "decap: first-seen flow, recorded into S_fwd");
        tables.insert_forward(decapped.key, decapped.bundle);
        Some(DecapOutput::Forward(decapped.inner_frame))
    }
}
