//! In-memory sleep log

use crate::{EventRecorder, SleepEvent, StorageError};
use chrono::Timelike;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use tracing::info;

/// Default retention: one event per alert episode, so even a very long
/// shift stays far below this.
const DEFAULT_MAX_EVENTS: usize = 10_000;

/// In-memory, append-only sleep event log with bounded retention.
///
/// Stands in for an external event store; the hour-frequency queries mirror
/// what the analytics side asks of the full database.
pub struct SleepLog {
    events: Mutex<VecDeque<SleepEvent>>,
    max_events: usize,
}

impl SleepLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_EVENTS)
    }

    pub fn with_capacity(max_events: usize) -> Self {
        info!(max_events, "Creating in-memory sleep log");
        Self {
            events: Mutex::new(VecDeque::new()),
            max_events,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<SleepEvent>>, StorageError> {
        self.events
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("Lock error: {e}")))
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events per hour of day (0..=23), hours with no events omitted
    pub fn hourly_counts(&self) -> Result<BTreeMap<u32, usize>, StorageError> {
        let events = self.lock()?;
        let mut counts = BTreeMap::new();
        for event in events.iter() {
            *counts.entry(event.timestamp.hour()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// The hour of day when sleep happens most often, with its frequency
    pub fn most_common_sleep_hour(&self) -> Result<Option<(u32, usize)>, StorageError> {
        let counts = self.hourly_counts()?;
        Ok(counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0))))
    }

    /// Export all events as JSON (newest last)
    pub fn export_json(&self) -> Result<String, StorageError> {
        let events = self.lock()?;
        serde_json::to_string(&events.iter().collect::<Vec<_>>())
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

impl Default for SleepLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRecorder for SleepLog {
    fn record(&self, event: SleepEvent) -> Result<(), StorageError> {
        let mut events = self.lock()?;
        while events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
        info!(timestamp = %event.timestamp, "Sleep event recorded");
        Ok(())
    }
}
