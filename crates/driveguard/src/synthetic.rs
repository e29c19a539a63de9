//! Synthetic perception backends
//!
//! Stand-ins for the external face-mesh module: a frame source that emits
//! blank frames and an extractor that replays a scripted per-frame openness
//! signal as landmark geometry. Used by tests and by the binary when no
//! camera backend is wired in.

use crate::session::{FrameSource, SessionError};
use vision::{EyeLandmarkSet, LandmarkMap, SignalExtractor, VideoFrame, VisionError};
use vision::{LEFT_EYE_EAR, RIGHT_EYE_EAR};

/// Emits a fixed number of blank frames, then ends the stream
pub struct SyntheticSource {
    remaining: u32,
    sequence: u32,
}

impl SyntheticSource {
    pub fn new(frames: u32) -> Self {
        Self {
            remaining: frames,
            sequence: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, SessionError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.sequence += 1;
        Ok(Some(VideoFrame::empty(640, 480, self.sequence)))
    }
}

/// Replays a scripted openness value per frame as synthetic eye geometry.
///
/// The generated landmarks are laid out so the computed EAR equals the
/// scripted value exactly. `NaN` entries produce an empty landmark map
/// ("no face this frame"); an exhausted script also yields empty maps.
pub struct ScriptedExtractor {
    script: Vec<f32>,
    cursor: usize,
}

impl ScriptedExtractor {
    pub fn new(script: Vec<f32>) -> Self {
        Self { script, cursor: 0 }
    }

    fn place_eye(map: &mut LandmarkMap, eye: &EyeLandmarkSet, origin_x: f32, openness: f32) {
        // Corners 60px apart, both vertical pairs 60*openness apart:
        // EAR = (60v + 60v) / (2 * 60) = v
        let half = 30.0 * openness;
        map.insert(eye[0], (origin_x, 0.0));
        map.insert(eye[3], (origin_x + 60.0, 0.0));
        map.insert(eye[1], (origin_x + 20.0, half));
        map.insert(eye[5], (origin_x + 20.0, -half));
        map.insert(eye[2], (origin_x + 40.0, half));
        map.insert(eye[4], (origin_x + 40.0, -half));
    }
}

impl SignalExtractor for ScriptedExtractor {
    fn extract(&mut self, _frame: &VideoFrame) -> Result<LandmarkMap, VisionError> {
        let value = self.script.get(self.cursor).copied();
        self.cursor += 1;

        let mut map = LandmarkMap::new();
        match value {
            Some(openness) if openness.is_finite() => {
                Self::place_eye(&mut map, &RIGHT_EYE_EAR, 0.0, openness);
                Self::place_eye(&mut map, &LEFT_EYE_EAR, 100.0, openness);
            }
            _ => {} // no face
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision::EarCalculator;

    #[test]
    fn test_scripted_openness_round_trips_through_ear() {
        let mut extractor = ScriptedExtractor::new(vec![0.30, 0.10]);
        let frame = VideoFrame::empty(64, 64, 1);
        let calculator = EarCalculator::default();

        let map = extractor.extract(&frame).unwrap();
        assert!((calculator.combined(&map).unwrap() - 0.30).abs() < 1e-6);

        let map = extractor.extract(&frame).unwrap();
        assert!((calculator.combined(&map).unwrap() - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_source_ends_after_count() {
        let mut source = SyntheticSource::new(2);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_exhausted_script_means_no_face() {
        let mut extractor = ScriptedExtractor::new(vec![]);
        let map = extractor.extract(&VideoFrame::empty(8, 8, 1)).unwrap();
        assert!(map.is_empty());
    }
}
