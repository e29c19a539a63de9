//! In-memory transport for tests (no hardware required)

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;
use tokio::time::Instant;

/// `AsyncWrite` sink that records every byte with the (tokio) time it was
/// written. Clones share the same recording, so one handle can be given to
/// the link while the test keeps another for assertions.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    writes: Arc<Mutex<Vec<(u8, Instant)>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far, in order
    pub fn bytes(&self) -> Vec<u8> {
        self.writes
            .lock()
            .expect("transport lock")
            .iter()
            .map(|(b, _)| *b)
            .collect()
    }

    /// Bytes with their write timestamps
    pub fn timed_writes(&self) -> Vec<(u8, Instant)> {
        self.writes.lock().expect("transport lock").clone()
    }
}

impl AsyncWrite for MemoryTransport {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        let now = Instant::now();
        let mut writes = self.writes.lock().expect("transport lock");
        writes.extend(buf.iter().map(|&b| (b, now)));
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
