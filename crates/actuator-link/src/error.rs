//! Link error types

use thiserror::Error;

/// Errors from the serial command link
#[derive(Debug, Error)]
pub enum LinkError {
    /// Serial port could not be opened. Fatal at startup.
    #[error("Failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },

    /// Write failed mid-dispatch. Isolated to the dispatch task, logged and
    /// never propagated to the detection loop.
    #[error("Serial write failed: {0}")]
    Write(#[from] std::io::Error),
}
