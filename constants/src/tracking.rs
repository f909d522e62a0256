/// Blend factor of the landmark low-pass filter (weight of the raw sample).
pub const LANDMARK_SMOOTHING_ALPHA: f32 = 0.35;

/// Overlay width relative to temple-to-temple distance.
pub const FIT_RATIO: f32 = 1.15;

/// Lower bound for the computed overlay scale.
pub const MIN_SCALE: f32 = 1.0e-3;

/// Squared length below which a basis vector is treated as degenerate.
pub const DEGENERATE_LENGTH_SQUARED: f32 = 1.0e-10;

/// Weight of the nose bridge in the anchor blend (eye centre gets the rest).
pub const ANCHOR_NOSE_WEIGHT: f32 = 0.6;

/// Vertical anchor offset as a fraction of eye width (negative is downward).
pub const ANCHOR_VERTICAL_BIAS: f32 = -0.08;

/// Depth anchor offset as a fraction of eye width (toward the face).
pub const ANCHOR_DEPTH_BIAS: f32 = 0.15;

/// Per-tick interpolation factors of the stabiliser.
pub const STABILIZER_POSITION_RATE: f32 = 0.7;
pub const STABILIZER_ROTATION_RATE: f32 = 0.6;
pub const STABILIZER_SCALE_RATE: f32 = 0.7;

/// Width every loaded model is normalised to at load time (asset-local units).
pub const CANONICAL_MODEL_WIDTH: f32 = 1.0;

/// Default camera used to lift normalised landmarks into world space.
pub const DEFAULT_CAMERA_FOV_Y_DEGREES: f32 = 50.0;
pub const DEFAULT_CAMERA_ASPECT: f32 = 4.0 / 3.0;
pub const DEFAULT_LANDMARK_DEPTH: f32 = 5.0;
