//! Overlay camera and the projection used to lift detector output into the scene.
//!
//! The camera sits at the origin looking down -Z with a transparent clear
//! colour so the host page's video element shows through. Landmarks are placed
//! on a plane at a fixed depth in front of it, sized to the visible frustum.

/// Perspective camera spawn and normalised-to-world landmark projection.
pub mod overlay_camera;

pub use overlay_camera::{CameraProjection, spawn_overlay_camera};
