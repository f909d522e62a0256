//! Per-frame face tracking stages.
//!
//! Raw detector frames flow through the stages in order:
//!
//! ```text
//! Detection ─> LandmarkSmoother ─> FacePoints ─┬─> PoseEstimator ──┐
//!                                              ├─> overlay_scale ──┼─> Stabilizer ─> Transform
//!                                              └─> anchor_position ┘
//! ```
//!
//! Stages are plain structs and functions over Bevy math types; the ECS glue
//! lives in `core::scheduler` and `systems::overlay_sync`.

pub mod anchor;

/// Detector trait plus replay and host-bridge implementations.
pub mod detector;

pub mod landmarks;

/// Face-local basis from eye and forehead/chin landmarks.
pub mod pose;

pub mod scale;
pub mod smoother;
pub mod stabilizer;
