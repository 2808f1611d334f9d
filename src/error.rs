//! Unified error type.

use std::net::SocketAddr;

/// The error type returned by otc's fallible operations.
///
/// Application-level outcomes (404, 405, 422, etc.) are expressed as HTTP
/// responses, not as `Error`s. This type surfaces infrastructure failures:
/// binding to a port, touching the storage directory, setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging: {0}")]
    Logging(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
