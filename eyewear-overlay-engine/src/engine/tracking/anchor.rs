use bevy::prelude::*;
use constants::tracking::{ANCHOR_DEPTH_BIAS, ANCHOR_NOSE_WEIGHT, ANCHOR_VERTICAL_BIAS};

use super::landmarks::FacePoints;

/// Rest point on the nose bridge, weighted toward the bridge rather than the
/// point between the eyes.
pub fn anchor_point(face: &FacePoints) -> Vec3 {
    face.nose_bridge * ANCHOR_NOSE_WEIGHT + face.eye_center() * (1.0 - ANCHOR_NOSE_WEIGHT)
}

/// Face-local offset applied on top of the anchor, scaled by eye width.
pub fn local_offset(eye_width: f32, vertical_offset: f32, depth_offset: f32) -> Vec3 {
    Vec3::new(
        0.0,
        eye_width * ANCHOR_VERTICAL_BIAS + vertical_offset,
        eye_width * ANCHOR_DEPTH_BIAS + depth_offset,
    )
}

/// World position of the overlay root.
pub fn anchor_position(
    face: &FacePoints,
    orientation: Quat,
    vertical_offset: f32,
    depth_offset: f32,
) -> Vec3 {
    let offset = local_offset(face.eye_width(), vertical_offset, depth_offset);
    anchor_point(face) + orientation * offset
}
