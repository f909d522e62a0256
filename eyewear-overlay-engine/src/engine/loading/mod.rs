//! Asset loading for the overlay.
//!
//! The manifest is loaded once at startup; models are loaded on demand,
//! each under a fresh generation token so that only the newest request can
//! replace what is on screen.

/// Overlay manifest loading and detector selection.
pub mod manifest_loader;

/// glTF scene spawning, part gathering and material assignment.
pub mod model_loader;

/// Recentring, normalisation and classification of a gathered model.
pub mod prepare;

/// Loading progress tracking resource for state transitions.
pub mod progress;

pub mod tokens;
