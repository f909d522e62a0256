use bevy::prelude::*;
use constants::tracking::DEGENERATE_LENGTH_SQUARED;

use super::landmarks::FacePoints;

/// Right-handed orthonormal face-local frame and its rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub rotation: Quat,
}

impl FaceBasis {
    pub const IDENTITY: Self = Self {
        right: Vec3::X,
        up: Vec3::Y,
        forward: Vec3::Z,
        rotation: Quat::IDENTITY,
    };

    fn from_axes(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize();
        Self {
            right,
            up,
            forward,
            rotation,
        }
    }
}

fn normalize_checked(v: Vec3) -> Option<Vec3> {
    let length_squared = v.length_squared();
    if !length_squared.is_finite() || length_squared < DEGENERATE_LENGTH_SQUARED {
        return None;
    }
    Some(v / length_squared.sqrt())
}

/// Face frame from eye corners and the forehead/chin axis.
///
/// `forward` is `right x up`, then `up` is rebuilt as `forward x right`.
/// Returns `None` when any difference or cross product is near zero.
pub fn face_basis(face: &FacePoints) -> Option<FaceBasis> {
    let right = normalize_checked(face.right_eye_outer - face.left_eye_outer)?;
    let up_raw = normalize_checked(face.forehead - face.chin)?;
    let forward = normalize_checked(right.cross(up_raw))?;
    let up = normalize_checked(forward.cross(right))?;

    Some(FaceBasis::from_axes(right, up, forward))
}

/// Pose stage; remembers the last good basis to ride out degenerate frames.
#[derive(Debug, Clone, Default)]
pub struct PoseEstimator {
    last: Option<FaceBasis>,
}

impl PoseEstimator {
    pub fn estimate(&mut self, face: &FacePoints) -> FaceBasis {
        match face_basis(face) {
            Some(basis) => {
                self.last = Some(basis);
                basis
            }
            None => {
                debug!("Degenerate landmark geometry, reusing previous orientation");
                self.last.unwrap_or(FaceBasis::IDENTITY)
            }
        }
    }

    pub fn last(&self) -> Option<&FaceBasis> {
        self.last.as_ref()
    }
}
