//! Serial command link

use crate::command::AlertCommand;
use crate::error::LinkError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

/// Serial link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Serial port device path (e.g., "/dev/ttyACM0" or "COM5")
    pub port: String,
    /// Baud rate (8N1 framing)
    pub baud_rate: u32,
    /// Settle time after opening the port, while the board resets (ms)
    pub settle_ms: u64,
    /// How long the actuator stays active per alert (ms)
    pub dwell_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".to_string(),
            baud_rate: 115_200,
            settle_ms: 2000,
            dwell_ms: 5000,
        }
    }
}

impl LinkConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

/// Host side of the one-byte command protocol.
///
/// Writes are fire-and-forget: no response is read and no acknowledgement
/// exists. Generic over the transport so tests can substitute an in-memory
/// sink for the serial stream.
pub struct ActuatorLink<T> {
    transport: T,
}

impl ActuatorLink<SerialStream> {
    /// Open the serial port and wait out the device reset.
    ///
    /// Opening the port resets the board, so the link holds off for the
    /// configured settle interval before it is handed to callers.
    pub async fn open(config: &LinkConfig) -> Result<Self, LinkError> {
        info!(port = %config.port, baud = config.baud_rate, "Opening actuator link");

        let transport = tokio_serial::new(&config.port, config.baud_rate)
            .open_native_async()
            .map_err(|source| LinkError::Open {
                port: config.port.clone(),
                source,
            })?;

        tokio::time::sleep(config.settle()).await;
        info!("Actuator link ready");

        Ok(Self { transport })
    }
}

impl<T: AsyncWrite + Unpin + Send> ActuatorLink<T> {
    /// Wrap an already-open transport (tests, alternate backends)
    pub fn from_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Send one command byte, fire-and-forget
    pub async fn send(&mut self, command: AlertCommand) -> Result<(), LinkError> {
        self.transport.write_all(&[command.as_byte()]).await?;
        self.transport.flush().await?;
        debug!(?command, "Sent actuator command");
        Ok(())
    }
}
