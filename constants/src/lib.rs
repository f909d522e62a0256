//! Shared tuning constants for the overlay engine.
//!
//! Everything here is empirical: values were picked against recorded sessions
//! and a range of eyewear models, and are kept in one place so they can be
//! tuned without touching the pipeline code.

/// Landmark indices of the face-mesh detector output.
pub mod landmarks;

/// Per-frame tracking: smoothing, fit ratio, anchor biases, stabiliser rates.
pub mod tracking;

/// Lens/frame scoring weights and selection thresholds.
pub mod class;

/// Material parameters for lens and frame render profiles.
pub mod render_settings;

/// Asset paths relative to the asset root.
pub mod path;
