//! Model-side data: catalogue, manifest, styles, and the part/bounds types
//! the classifier works on.

/// Mesh parts with material hints, as handed to the classifier.
pub mod asset_part;

/// Axis-aligned bounds for parts and whole models.
pub mod bounds;

/// Wrapping next/previous navigation over the configured models.
pub mod catalogue;

/// Engine configuration loaded from `*.overlay.json`.
pub mod overlay_manifest;

/// Lens/frame colours and finish, parsed from hex-coded JSON.
pub mod style;
