#![forbid(unsafe_code)]

//! Core of the SFC proxy: header codecs, flow keys, the per-flow session
//! tables, and the three pipelines that de-encapsulate traffic arriving
//! wrapped in VXLAN-GPE/NSH, hand it to a non-SFC-aware service function,
//! and re-wrap whatever comes back.
//!
//! This crate has no notion of a real network socket. The binary crate
//! (`sfc-proxy`) owns raw link-layer I/O and calls into the pipeline
//! functions here with `bytes::Bytes` buffers it has already received.

pub mod bundle;
pub mod codec;
pub mod error;
pub mod flow;
pub mod frame;
pub mod pipeline;
pub mod send;
pub mod session;

pub use bundle::HeaderBundle;
pub use error::{ProxyError, Result};
pub use flow::FlowKey;
pub use pipeline::{process_decap, process_encap, process_reverse_encap, DecapOutput, EncapDrop};
pub use send::{send_drained, RawSend};
pub use session::SessionTables;
