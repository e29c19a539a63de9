//! Eye aspect ratio (EAR) calculation
//!
//! EAR = (||p2 - p6|| + ||p3 - p5||) / (2 * ||p1 - p4||)
//!
//! Lower values indicate more closed eyes. The metric is computed per eye
//! and averaged across both eyes for the per-frame sample.

use crate::landmarks::{EyeLandmarkSet, EyeSelection, LandmarkMap, LEFT_EYE_EAR, RIGHT_EYE_EAR};
use crate::VisionError;

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

fn point(map: &LandmarkMap, id: u32) -> Result<(f32, f32), VisionError> {
    map.get(id).ok_or(VisionError::MissingLandmark(id))
}

/// Compute the aspect ratio for a single eye.
///
/// `eye` lists landmark ids in p1..p6 order. Fails with
/// [`VisionError::MissingLandmark`] if any id is absent from the map.
pub fn eye_aspect_ratio(eye: &EyeLandmarkSet, map: &LandmarkMap) -> Result<f32, VisionError> {
    let p1 = point(map, eye[0])?;
    let p2 = point(map, eye[1])?;
    let p3 = point(map, eye[2])?;
    let p4 = point(map, eye[3])?;
    let p5 = point(map, eye[4])?;
    let p6 = point(map, eye[5])?;

    let vertical_a = distance(p2, p6);
    let vertical_b = distance(p3, p5);
    let horizontal = distance(p1, p4);

    Ok((vertical_a + vertical_b) / (2.0 * horizontal))
}

/// Combined openness metric over both eyes.
///
/// Pure and deterministic; holds only the landmark id configuration.
#[derive(Debug, Clone)]
pub struct EarCalculator {
    right_eye: EyeLandmarkSet,
    left_eye: EyeLandmarkSet,
}

impl Default for EarCalculator {
    fn default() -> Self {
        Self {
            right_eye: RIGHT_EYE_EAR,
            left_eye: LEFT_EYE_EAR,
        }
    }
}

impl EarCalculator {
    /// Create a calculator with custom landmark id sets
    pub fn new(right_eye: EyeLandmarkSet, left_eye: EyeLandmarkSet) -> Self {
        Self { right_eye, left_eye }
    }

    pub fn from_selection(selection: &EyeSelection) -> Self {
        Self::new(selection.right_eye, selection.left_eye)
    }

    /// Average of both eyes' ratios for one frame
    pub fn combined(&self, map: &LandmarkMap) -> Result<f32, VisionError> {
        let right = eye_aspect_ratio(&self.right_eye, map)?;
        let left = eye_aspect_ratio(&self.left_eye, map)?;
        Ok((right + left) / 2.0)
    }
}
