//! Detection session
//!
//! Single-threaded frame loop: extract landmarks, compute the combined
//! EAR, feed the state machine. On an Awake→Alerting transition the sleep
//! event is recorded and the actuator dispatch fires without blocking the
//! loop. Per-frame failures (no face, incomplete landmarks) skip the frame
//! and contribute nothing to the state machine.

use actuator_link::{AlertDispatcher, LinkError};
use drowsiness::{DrowsinessEvent, DrowsinessTracker};
use storage::{EventRecorder, SleepEvent};
use thiserror::Error;
use tokio::io::AsyncWrite;
use tracing::{debug, info, warn};
use vision::{EarCalculator, SignalExtractor, VideoFrame, VisionError};

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    /// Capture cannot be opened or failed mid-stream. Terminates the loop.
    #[error("Video source error: {0}")]
    VideoSource(String),

    /// Serial link bring-up failed. Fatal at startup.
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Frame supplier (camera, file, or synthetic source).
///
/// `Ok(None)` means the stream ended normally.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, SessionError>;
}

/// Counters for one session run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames pulled from the source
    pub frames: u64,
    /// Frames skipped (no face or incomplete landmarks)
    pub skipped: u64,
    /// Alert episodes (Awake→Alerting transitions)
    pub alerts: u64,
}

/// The per-frame drowsiness pipeline
pub struct DetectionSession<E, R, T> {
    extractor: E,
    calculator: EarCalculator,
    tracker: DrowsinessTracker,
    dispatcher: AlertDispatcher<T>,
    recorder: R,
    stats: SessionStats,
}

impl<E, R, T> DetectionSession<E, R, T>
where
    E: SignalExtractor,
    R: EventRecorder,
    T: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(
        extractor: E,
        calculator: EarCalculator,
        tracker: DrowsinessTracker,
        dispatcher: AlertDispatcher<T>,
        recorder: R,
    ) -> Self {
        Self {
            extractor,
            calculator,
            tracker,
            dispatcher,
            recorder,
            stats: SessionStats::default(),
        }
    }

    /// Evaluate one frame. Never blocks on the alert dwell.
    pub fn process_frame(&mut self, frame: &VideoFrame) {
        self.stats.frames += 1;

        let landmarks = match self.extractor.extract(frame) {
            Ok(map) => map,
            Err(e) => {
                debug!(sequence = frame.sequence, error = %e, "Extraction failed, skipping frame");
                self.stats.skipped += 1;
                return;
            }
        };
        if landmarks.is_empty() {
            debug!(sequence = frame.sequence, "No face this frame");
            self.stats.skipped += 1;
            return;
        }

        let ear = match self.calculator.combined(&landmarks) {
            Ok(value) => value,
            Err(VisionError::MissingLandmark(id)) => {
                debug!(sequence = frame.sequence, landmark = id, "Incomplete landmark set");
                self.stats.skipped += 1;
                return;
            }
            Err(e) => {
                debug!(sequence = frame.sequence, error = %e, "EAR unavailable");
                self.stats.skipped += 1;
                return;
            }
        };

        if let Some(DrowsinessEvent::EnterAlerting) = self.tracker.observe(ear) {
            self.stats.alerts += 1;
            if let Err(e) = self.recorder.record(SleepEvent::now()) {
                warn!(error = %e, "Failed to record sleep event");
            }
            self.dispatcher.trigger();
        }
    }

    /// Drain the source until it ends
    pub fn run<S: FrameSource>(&mut self, source: &mut S) -> Result<SessionStats, SessionError> {
        info!("Detection session started");
        while let Some(frame) = source.next_frame()? {
            self.process_frame(&frame);
        }
        info!(
            frames = self.stats.frames,
            skipped = self.stats.skipped,
            alerts = self.stats.alerts,
            "Detection session ended"
        );
        Ok(self.stats)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Optionally wait for in-flight alert sequences before dropping the
    /// session. Normal shutdown may skip this; the leaked tasks are bounded.
    pub async fn drain_alerts(&self) {
        self.dispatcher.drain().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{ScriptedExtractor, SyntheticSource};
    use actuator_link::testing::MemoryTransport;
    use actuator_link::ActuatorLink;
    use drowsiness::DrowsinessConfig;
    use std::time::Duration;
    use storage::SleepLog;

    fn session(
        openness: Vec<f32>,
        required: u32,
    ) -> (
        DetectionSession<ScriptedExtractor, SleepLog, MemoryTransport>,
        MemoryTransport,
    ) {
        let transport = MemoryTransport::new();
        let link = ActuatorLink::from_transport(transport.clone());
        let dispatcher = AlertDispatcher::new(link, Duration::from_millis(10));
        let tracker = DrowsinessTracker::new(DrowsinessConfig {
            ear_threshold: 0.24,
            consecutive_frames: required,
        });
        let session = DetectionSession::new(
            ScriptedExtractor::new(openness),
            EarCalculator::default(),
            tracker,
            dispatcher,
            SleepLog::new(),
        );
        (session, transport)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sustained_closure_records_and_dispatches_once() {
        let (mut session, transport) = session(vec![0.10; 5], 3);
        let mut source = SyntheticSource::new(5);

        let stats = session.run(&mut source).unwrap();
        session.drain_alerts().await;

        assert_eq!(stats.frames, 5);
        assert_eq!(stats.alerts, 1);
        assert_eq!(transport.bytes(), vec![0x31, 0x30]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_without_face_are_skipped() {
        // NaN openness makes the extractor return an empty map
        let (mut session, transport) = session(vec![f32::NAN, 0.3, f32::NAN], 3);
        let mut source = SyntheticSource::new(3);

        let stats = session.run(&mut source).unwrap();

        assert_eq!(stats.frames, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.alerts, 0);
        assert!(transport.bytes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_closure_never_alerts() {
        let mut openness = vec![0.10; 89];
        openness.push(0.30);
        openness.extend(vec![0.10; 10]);
        let frames = openness.len() as u32;

        let (mut session, transport) = session(openness, 90);
        let mut source = SyntheticSource::new(frames);

        let stats = session.run(&mut source).unwrap();
        session.drain_alerts().await;

        assert_eq!(stats.alerts, 0);
        assert!(transport.bytes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_episodes_dispatch_twice() {
        let openness = vec![0.1, 0.1, 0.1, 0.3, 0.1, 0.1, 0.1];
        let (mut session, transport) = session(openness, 3);
        let mut source = SyntheticSource::new(7);

        let stats = session.run(&mut source).unwrap();
        session.drain_alerts().await;

        assert_eq!(stats.alerts, 2);
        assert_eq!(transport.bytes(), vec![0x31, 0x30, 0x31, 0x30]);
    }
}
