use bevy::prelude::*;
use constants::landmarks as idx;
use serde::{Deserialize, Serialize};

use crate::engine::camera::CameraProjection;
use crate::error::OverlayError;

/// One detector sample lifted into world space. Index-addressed, fixed length
/// for a given detector, never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: Vec<Vec3>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Build a frame from detector-normalised coordinates, rejecting frames
    /// that are too short for `schema` or carry non-finite values.
    pub fn from_normalized(
        raw: &[[f32; 3]],
        projection: &CameraProjection,
        schema: &LandmarkSchema,
    ) -> Result<Self, OverlayError> {
        let expected = schema.required_len();
        if raw.len() < expected {
            return Err(OverlayError::TooFewLandmarks {
                expected,
                found: raw.len(),
            });
        }

        let mut points = Vec::with_capacity(raw.len());
        for (i, p) in raw.iter().enumerate() {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(OverlayError::NonFiniteLandmark(i));
            }
            points.push(projection.to_world(*p));
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }
}

/// Semantic indices into a detector frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandmarkSchema {
    pub left_eye_outer: usize,
    pub right_eye_outer: usize,
    pub left_eye_inner: usize,
    pub right_eye_inner: usize,
    pub nose_bridge: usize,
    pub nose_tip: usize,
    pub forehead: usize,
    pub chin: usize,
    pub left_temple: usize,
    pub right_temple: usize,
    pub left_iris: Option<usize>,
    pub right_iris: Option<usize>,
}

impl Default for LandmarkSchema {
    fn default() -> Self {
        Self {
            left_eye_outer: idx::LEFT_EYE_OUTER,
            right_eye_outer: idx::RIGHT_EYE_OUTER,
            left_eye_inner: idx::LEFT_EYE_INNER,
            right_eye_inner: idx::RIGHT_EYE_INNER,
            nose_bridge: idx::NOSE_BRIDGE,
            nose_tip: idx::NOSE_TIP,
            forehead: idx::FOREHEAD,
            chin: idx::CHIN,
            left_temple: idx::LEFT_TEMPLE,
            right_temple: idx::RIGHT_TEMPLE,
            left_iris: Some(idx::LEFT_IRIS),
            right_iris: Some(idx::RIGHT_IRIS),
        }
    }
}

impl LandmarkSchema {
    fn required_indices(&self) -> [usize; 10] {
        [
            self.left_eye_outer,
            self.right_eye_outer,
            self.left_eye_inner,
            self.right_eye_inner,
            self.nose_bridge,
            self.nose_tip,
            self.forehead,
            self.chin,
            self.left_temple,
            self.right_temple,
        ]
    }

    /// Minimum frame length; iris points are optional and not counted.
    pub fn required_len(&self) -> usize {
        self.required_indices().into_iter().max().unwrap_or(0) + 1
    }

    /// Schema as seen through `projection`. A mirrored view puts the
    /// subject's left side on the viewer's right, so paired points swap.
    pub fn for_projection(&self, projection: &CameraProjection) -> Self {
        if !projection.mirror {
            return *self;
        }
        Self {
            left_eye_outer: self.right_eye_outer,
            right_eye_outer: self.left_eye_outer,
            left_eye_inner: self.right_eye_inner,
            right_eye_inner: self.left_eye_inner,
            left_temple: self.right_temple,
            right_temple: self.left_temple,
            left_iris: self.right_iris,
            right_iris: self.left_iris,
            ..*self
        }
    }

    /// Pick the named points out of `frame`. `None` when the frame is too short.
    pub fn resolve(&self, frame: &LandmarkFrame) -> Option<FacePoints> {
        Some(FacePoints {
            left_eye_outer: frame.get(self.left_eye_outer)?,
            right_eye_outer: frame.get(self.right_eye_outer)?,
            left_eye_inner: frame.get(self.left_eye_inner)?,
            right_eye_inner: frame.get(self.right_eye_inner)?,
            nose_bridge: frame.get(self.nose_bridge)?,
            nose_tip: frame.get(self.nose_tip)?,
            forehead: frame.get(self.forehead)?,
            chin: frame.get(self.chin)?,
            left_temple: frame.get(self.left_temple)?,
            right_temple: frame.get(self.right_temple)?,
            left_iris: self.left_iris.and_then(|i| frame.get(i)),
            right_iris: self.right_iris.and_then(|i| frame.get(i)),
        })
    }
}

/// The named landmarks the pose, scale and anchor stages consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePoints {
    pub left_eye_outer: Vec3,
    pub right_eye_outer: Vec3,
    pub left_eye_inner: Vec3,
    pub right_eye_inner: Vec3,
    pub nose_bridge: Vec3,
    pub nose_tip: Vec3,
    pub forehead: Vec3,
    pub chin: Vec3,
    pub left_temple: Vec3,
    pub right_temple: Vec3,
    pub left_iris: Option<Vec3>,
    pub right_iris: Option<Vec3>,
}

impl FacePoints {
    pub fn temple_distance(&self) -> f32 {
        self.left_temple.distance(self.right_temple)
    }

    pub fn eye_width(&self) -> f32 {
        self.left_eye_outer.distance(self.right_eye_outer)
    }

    pub fn eye_center(&self) -> Vec3 {
        (self.left_eye_inner + self.right_eye_inner) * 0.5
    }
}

#[cfg(test)]
pub(crate) mod test_faces {
    use super::*;

    /// A frontal face of roughly human proportions, centred on `origin`,
    /// looking toward +Z. Units are arbitrary.
    pub fn frontal_face(origin: Vec3) -> FacePoints {
        FacePoints {
            left_eye_outer: origin + Vec3::new(-45.0, 0.0, 0.0),
            right_eye_outer: origin + Vec3::new(45.0, 0.0, 0.0),
            left_eye_inner: origin + Vec3::new(-15.0, 0.0, 2.0),
            right_eye_inner: origin + Vec3::new(15.0, 0.0, 2.0),
            nose_bridge: origin + Vec3::new(0.0, -5.0, 8.0),
            nose_tip: origin + Vec3::new(0.0, -45.0, 25.0),
            forehead: origin + Vec3::new(0.0, 60.0, 5.0),
            chin: origin + Vec3::new(0.0, -110.0, 5.0),
            left_temple: origin + Vec3::new(-70.0, 5.0, -20.0),
            right_temple: origin + Vec3::new(70.0, 5.0, -20.0),
            left_iris: None,
            right_iris: None,
        }
    }

    /// Write `face` into a frame laid out by the default schema.
    pub fn frame_from_face(face: &FacePoints) -> LandmarkFrame {
        let schema = LandmarkSchema::default();
        let mut points = vec![Vec3::ZERO; schema.required_len()];
        points[schema.left_eye_outer] = face.left_eye_outer;
        points[schema.right_eye_outer] = face.right_eye_outer;
        points[schema.left_eye_inner] = face.left_eye_inner;
        points[schema.right_eye_inner] = face.right_eye_inner;
        points[schema.nose_bridge] = face.nose_bridge;
        points[schema.nose_tip] = face.nose_tip;
        points[schema.forehead] = face.forehead;
        points[schema.chin] = face.chin;
        points[schema.left_temple] = face.left_temple;
        points[schema.right_temple] = face.right_temple;
        LandmarkFrame::new(points)
    }
}
