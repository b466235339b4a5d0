#![forbid(unsafe_code)]

use std::sync::Mutex;
use std::thread;

use bytes::Bytes;
use clap::Parser;
use pnet::datalink::{DataLinkReceiver, DataLinkSender};
use sfc_proxy_lib::{
    process_decap, process_encap, process_reverse_encap, send_drained, DecapOutput, EncapDrop,
    SessionTables,
};
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

mod socket;

use socket::{PnetSender, RawSocket};

/// SFC proxy for non-SFC-aware service functions: strips VXLAN-GPE/NSH
/// encapsulation on the way in, hands the inner packet to the service
/// function, and re-wraps whatever it sends back.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Interface carrying encapsulated VXLAN-GPE/NSH traffic.
    #[arg(short = 'e', long = "encap_if")]
    encap_if: String,

    /// Interface the service function receives de-encapsulated traffic on.
    #[arg(long = "unencap_in_if", alias = "uin")]
    unencap_in_if: String,

    /// Interface the service function's reply path is read from.
    #[arg(long = "unencap_out_if", alias = "uout")]
    unencap_out_if: String,
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let encap = match socket::open(&cli.encap_if) {
        Ok(s) => s,
        Err(err) => {
            error!(%err, interface = %cli.encap_if, "failed to bind encap interface");
            return std::process::ExitCode::FAILURE;
        }
    };
    let unencap_in = match socket::open(&cli.unencap_in_if) {
        Ok(s) => s,
        Err(err) => {
            error!(%err, interface = %cli.unencap_in_if, "failed to bind unencap-in interface");
            return std::process::ExitCode::FAILURE;
        }
    };
    let unencap_out = match socket::open(&cli.unencap_out_if) {
        Ok(s) => s,
        Err(err) => {
            error!(%err, interface = %cli.unencap_out_if, "failed to bind unencap-out interface");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        encap = %encap.name,
        unencap_in = %unencap_in.name,
        unencap_out = %unencap_out.name,
        "interfaces bound, starting pipelines"
    );

    let RawSocket { rx: encap_rx, tx: encap_tx, .. } = encap;
    let RawSocket { rx: unencap_in_rx, tx: unencap_in_tx, .. } = unencap_in;
    let RawSocket { rx: unencap_out_rx, tx: unencap_out_tx, .. } = unencap_out;

    // The encap interface's send half is shared by the encap and
    // reverse-encap workers; the other two send halves are each used by a
    // single worker (the decap worker) and need no synchronization.
    let encap_tx = Mutex::new(encap_tx);
    let tables = SessionTables::new();

    thread::scope(|scope| {
        scope.spawn(|| decap_worker(encap_rx, unencap_in_tx, unencap_out_tx, &tables));
        scope.spawn(|| encap_worker(unencap_in_rx, &encap_tx, &tables));
        scope.spawn(|| reverse_encap_worker(unencap_out_rx, &encap_tx, &tables));
    });

    std::process::ExitCode::SUCCESS
}

/// Reads encapsulated frames from the *encap* interface, runs the decap
/// pipeline, and emits the inner frame on whichever unencapsulated
/// interface the pipeline selected.
fn decap_worker(
    mut rx: Box<dyn DataLinkReceiver>,
    mut unencap_in_tx: Box<dyn DataLinkSender>,
    mut unencap_out_tx: Box<dyn DataLinkSender>,
    tables: &SessionTables,
) {
    loop {
        let frame = match rx.next() {
            Ok(bytes) => Bytes::copy_from_slice(bytes),
            Err(err) => {
                error!(%err, worker = "decap", "receive failed, worker exiting");
                return;
            }
        };

        match process_decap(tables, &frame) {
            Some(DecapOutput::Forward(inner)) => {
                emit("decap->unencap_out", unencap_out_tx.as_mut(), &inner);
            }
            Some(DecapOutput::Reply(inner)) => {
                emit("decap->unencap_in", unencap_in_tx.as_mut(), &inner);
            }
            None => {
                trace!(worker = "decap", bytes = frame.len(), "frame dropped: unrecognized chain");
            }
        }
    }
}

/// Reads the service function's forward output on *unencap-in*, rebuilds
/// the outer stack from the matching forward session, and emits on *encap*.
fn encap_worker(
    mut rx: Box<dyn DataLinkReceiver>,
    encap_tx: &Mutex<Box<dyn DataLinkSender>>,
    tables: &SessionTables,
) {
    loop {
        let frame = match rx.next() {
            Ok(bytes) => Bytes::copy_from_slice(bytes),
            Err(err) => {
                error!(%err, worker = "encap", "receive failed, worker exiting");
                return;
            }
        };

        match process_encap(tables, &frame) {
            Ok(outbound) => {
                let mut tx = encap_tx.lock().unwrap_or_else(|e| e.into_inner());
                emit("encap->encap", tx.as_mut(), &outbound);
            }
            Err(EncapDrop::Malformed) => {
                trace!(worker = "encap", bytes = frame.len(), "frame dropped: unrecognized chain");
            }
            Err(EncapDrop::UnknownFlow) => {
                debug!(worker = "encap", bytes = frame.len(), "frame dropped: unknown flow");
            }
            Err(EncapDrop::SiUnderflow) => {
                // Already logged at `warn` by `rebuild_outer_prefix`; nothing more to say here.
            }
        }
    }
}

/// Reads the service function's reply output on *unencap-out*, rebuilds the
/// outer stack from the matching reply session, and emits on *encap*.
fn reverse_encap_worker(
    mut rx: Box<dyn DataLinkReceiver>,
    encap_tx: &Mutex<Box<dyn DataLinkSender>>,
    tables: &SessionTables,
) {
    loop {
        let frame = match rx.next() {
            Ok(bytes) => Bytes::copy_from_slice(bytes),
            Err(err) => {
                error!(%err, worker = "reverse_encap", "receive failed, worker exiting");
                return;
            }
        };

        match process_reverse_encap(tables, &frame) {
            Ok(outbound) => {
                let mut tx = encap_tx.lock().unwrap_or_else(|e| e.into_inner());
                emit("reverse_encap->encap", tx.as_mut(), &outbound);
            }
            Err(EncapDrop::Malformed) => {
                trace!(
                    worker = "reverse_encap",
                    bytes = frame.len(),
                    "frame dropped: unrecognized chain"
                );
            }
            Err(EncapDrop::UnknownFlow) => {
                debug!(
                    worker = "reverse_encap",
                    bytes = frame.len(),
                    "frame dropped: unprimed flow"
                );
            }
            Err(EncapDrop::SiUnderflow) => {
                // Already logged at `warn` by `rebuild_outer_prefix`; nothing more to say here.
            }
        }
    }
}

fn emit(path: &str, tx: &mut dyn DataLinkSender, frame: &[u8]) {
    let mut sender = PnetSender::new(tx);
    if let Err(err) = send_drained(&mut sender, frame) {
        error!(%err, path, "send failed");
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
