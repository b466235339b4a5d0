//! Raw link-layer socket acquisition and the concrete [`RawSend`] used by
//! the worker threads, both built on `pnet`'s datalink channel API.

use std::io;

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use sfc_proxy_lib::RawSend;
use thiserror::Error;

/// Receive buffer large enough for a maximally-stacked frame this proxy
/// understands (outer Eth/IP/UDP/VXLAN-GPE/NSH plus a full inner frame)
/// with headroom to spare.
const CHANNEL_BUFFER_SIZE: usize = 65536;

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("no such network interface: {0}")]
    NoSuchInterface(String),
    #[error("interface {interface} does not support a datalink channel")]
    UnsupportedChannelType { interface: String },
    #[error("failed to open datalink channel on {interface}: {source}")]
    ChannelOpen {
        interface: String,
        #[source]
        source: io::Error,
    },
}

/// A bound raw link-layer socket: a send half and a receive half, both tied
/// to the same interface.
pub struct RawSocket {
    pub name: String,
    pub tx: Box<dyn DataLinkSender>,
    pub rx: Box<dyn DataLinkReceiver>,
}

/// Resolves `name` to a live interface and opens a datalink channel on it,
/// configured to receive every ethertype with no BPF-level filter.
pub fn open(name: &str) -> Result<RawSocket, SocketError> {
    let interface = find_interface(name)?;

    let config = Config {
        read_buffer_size: CHANNEL_BUFFER_SIZE,
        write_buffer_size: CHANNEL_BUFFER_SIZE,
        ..Config::default()
    };

    match datalink::channel(&interface, config) {
        Ok(Channel::Ethernet(tx, rx)) => Ok(RawSocket {
            name: name.to_string(),
            tx,
            rx,
        }),
        Ok(_) => Err(SocketError::UnsupportedChannelType {
            interface: name.to_string(),
        }),
        Err(source) => Err(SocketError::ChannelOpen {
            interface: name.to_string(),
            source,
        }),
    }
}

fn find_interface(name: &str) -> Result<NetworkInterface, SocketError> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| SocketError::NoSuchInterface(name.to_string()))
}

/// Adapts `pnet`'s [`DataLinkSender`] to the library's socket-agnostic
/// [`RawSend`] trait, so [`sfc_proxy_lib::send_drained`] drives it the same
/// way its unit tests drive a mock sender.
pub struct PnetSender<'a> {
    tx: &'a mut dyn DataLinkSender,
}

impl<'a> PnetSender<'a> {
    pub fn new(tx: &'a mut dyn DataLinkSender) -> Self {
        Self { tx }
    }
}

impl RawSend for PnetSender<'_> {
    fn send_once(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.tx.send_to(buf, None) {
            Some(Ok(())) => Ok(buf.len()),
            Some(Err(e)) => Err(e),
            None => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "datalink sender has no destination configured",
            )),
        }
    }
}
