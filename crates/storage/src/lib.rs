//! Sleep Event Storage
//!
//! Append-only recording of sleep events plus the trend queries the
//! analytics layer asks for. The core hands each event off at the moment
//! of the Awake→Alerting transition and keeps nothing.

mod log;

pub use log::SleepLog;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// One sleep occurrence: created exactly once per Awake→Alerting
/// transition and passed to the recorder immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepEvent {
    pub timestamp: DateTime<Utc>,
}

impl SleepEvent {
    /// Stamp an event at the current wall-clock time
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }

    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }
}

/// Append-only event sink. Duplicate timestamps are not deduplicated.
pub trait EventRecorder: Send + Sync {
    fn record(&self, event: SleepEvent) -> Result<(), StorageError>;
}

impl<T: EventRecorder + ?Sized> EventRecorder for std::sync::Arc<T> {
    fn record(&self, event: SleepEvent) -> Result<(), StorageError> {
        (**self).record(event)
    }
}
