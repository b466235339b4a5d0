use std::io;

/// A raw send primitive that may transmit fewer bytes than requested.
///
/// Implemented by the binary crate's real socket adapter (where a single
/// call is typically atomic for a link-layer frame) and by test doubles
/// that deliberately short-send to exercise the drain loop below.
pub trait RawSend {
    fn send_once(&mut self, buf: &[u8]) -> io::Result<usize>;
}

/// Sends `frame` in full, retrying with the unsent suffix until drained.
/// There is no timeout: a socket that never makes progress blocks forever,
/// matching the core's accepted lack of cancellation.
pub fn send_drained<S: RawSend>(sock: &mut S, frame: &[u8]) -> io::Result<()> {
    let mut remaining = frame;
    while !remaining.is_empty() {
        let n = sock.send_once(remaining)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "raw socket send made no progress",
            ));
        }
        remaining = &remaining[n..];
    }
    Ok(())
}
