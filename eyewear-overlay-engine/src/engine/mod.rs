//! Overlay engine: face tracking, model loading and part classification,
//! wired into Bevy.

pub mod assets;
pub mod camera;
pub mod classification;
pub mod core;
pub mod loading;
pub mod systems;
pub mod tracking;
