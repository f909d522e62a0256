/// Name contains "lens" or "lense".
pub const LENS_NAME_WEIGHT: f32 = 10.0;

/// Name contains "glass" but not "glasses".
pub const GLASS_NAME_WEIGHT: f32 = 8.0;

/// Name contains "tint".
pub const TINT_NAME_WEIGHT: f32 = 5.0;

/// Material name contains "transparent" or "clear".
pub const CLEAR_MATERIAL_WEIGHT: f32 = 5.0;

/// Source material already blended with opacity below `TRANSPARENT_OPACITY_LIMIT`.
pub const TRANSPARENT_MATERIAL_WEIGHT: f32 = 8.0;
pub const TRANSPARENT_OPACITY_LIMIT: f32 = 0.7;

/// Source material transmission above `TRANSMISSION_LIMIT`.
pub const TRANSMISSIVE_MATERIAL_WEIGHT: f32 = 10.0;
pub const TRANSMISSION_LIMIT: f32 = 0.3;

/// Smallest bounding box extent below this fraction of the largest.
pub const THIN_SHELL_WEIGHT: f32 = 6.0;
pub const THIN_SHELL_RATIO: f32 = 0.08;

/// Parts must score strictly above this to be picked as lenses.
pub const LENS_SCORE_THRESHOLD: f32 = 3.0;

/// A pair of glasses has two lenses.
pub const MAX_LENS_PARTS: usize = 2;

/// Thinness ratio a part needs to enter the symmetry fallback.
pub const SYMMETRY_THIN_RATIO: f32 = 0.10;

/// Mirror tolerances of the symmetry fallback, in recentred, width-normalised units.
pub const SYMMETRY_CENTER_SUM_TOLERANCE: f32 = 0.1;
pub const SYMMETRY_CENTER_Y_TOLERANCE: f32 = 0.1;
