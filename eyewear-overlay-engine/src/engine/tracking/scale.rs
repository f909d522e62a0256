use bevy::prelude::*;
use constants::tracking::{FIT_RATIO, MIN_SCALE};

/// Uniform overlay scale from temple span and the model's reference width.
///
/// Always finite and at least `MIN_SCALE`, including for zero, negative or
/// non-finite reference widths.
pub fn overlay_scale(temple_distance: f32, reference_width: f32, user_scale: f32) -> f32 {
    let desired_width = temple_distance * FIT_RATIO;
    let scale = desired_width / reference_width * user_scale;

    if scale.is_finite() {
        scale.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

/// Scale vector for the overlay root; X carries the frame-width calibration.
pub fn scale_vector(scale: f32, width_multiplier: f32) -> Vec3 {
    Vec3::new((scale * width_multiplier).max(MIN_SCALE), scale, scale)
}
