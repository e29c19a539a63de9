//! Facial landmark map and eye landmark selection

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Six ordered landmark ids (p1..p6) feeding the EAR formula for one eye.
///
/// Ordering is significant: p1/p4 span the eye corners (width), p2/p6 and
/// p3/p5 are the vertical pairs.
pub type EyeLandmarkSet = [u32; 6];

/// MediaPipe face mesh indices for the right eye, in p1..p6 order
pub const RIGHT_EYE_EAR: EyeLandmarkSet = [33, 159, 158, 133, 153, 145];

/// MediaPipe face mesh indices for the left eye, in p1..p6 order
pub const LEFT_EYE_EAR: EyeLandmarkSet = [362, 380, 374, 263, 386, 385];

/// Which landmark ids feed the EAR formula, per eye
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EyeSelection {
    pub right_eye: EyeLandmarkSet,
    pub left_eye: EyeLandmarkSet,
}

impl Default for EyeSelection {
    fn default() -> Self {
        Self {
            right_eye: RIGHT_EYE_EAR,
            left_eye: LEFT_EYE_EAR,
        }
    }
}

/// Per-frame landmark map: landmark id -> (x, y) pixel coordinates.
///
/// Produced fresh by the extractor for every frame and discarded after the
/// frame is evaluated. An empty map means no face was detected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkMap {
    points: HashMap<u32, (f32, f32)>,
}

impl LandmarkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a landmark coordinate
    pub fn insert(&mut self, id: u32, point: (f32, f32)) {
        self.points.insert(id, point);
    }

    /// Look up a landmark by id
    pub fn get(&self, id: u32) -> Option<(f32, f32)> {
        self.points.get(&id).copied()
    }

    /// True when no face was detected this frame
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of landmarks present
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

impl FromIterator<(u32, (f32, f32))> for LandmarkMap {
    fn from_iter<I: IntoIterator<Item = (u32, (f32, f32))>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
