use thiserror::Error;

/// Errors that can occur while assembling or tearing down the proxy runtime.
///
/// The packet-processing path itself does not use this type: a parse mismatch
/// or an unknown flow is routine control flow and is represented as `None`,
/// not as an error.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
