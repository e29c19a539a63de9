//! Vision Primitives
//!
//! Landmark types and the eye aspect ratio (EAR) calculation used by the
//! drowsiness pipeline. Landmark *extraction* (running a face mesh over
//! pixels) is an external concern behind the [`SignalExtractor`] trait.

pub mod ear;
pub mod frame;
pub mod landmarks;

pub use ear::{eye_aspect_ratio, EarCalculator};
pub use frame::VideoFrame;
pub use landmarks::{EyeLandmarkSet, EyeSelection, LandmarkMap, LEFT_EYE_EAR, RIGHT_EYE_EAR};

use thiserror::Error;

/// Vision error types
#[derive(Error, Debug)]
pub enum VisionError {
    /// A landmark id required by the EAR formula is absent from the map
    /// (typically: no face detected this frame). Recoverable — callers
    /// skip evaluation for the frame.
    #[error("Landmark {0} missing from landmark map")]
    MissingLandmark(u32),

    /// The extractor backend failed on this frame
    #[error("Landmark extraction failed: {0}")]
    Extraction(String),
}

/// Per-frame facial landmark extraction.
///
/// Implementations wrap whatever perception backend produces 2-D landmark
/// coordinates. An empty map means no face was found in the frame and the
/// frame contributes nothing to drowsiness evaluation.
pub trait SignalExtractor {
    fn extract(&mut self, frame: &VideoFrame) -> Result<LandmarkMap, VisionError>;
}
