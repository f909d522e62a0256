//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and the shared overlay context for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Loading → Running state machine.
pub mod app_state;

/// Shared tracking and model state, plus user calibration.
///
/// Every per-frame stage and every model load reads and writes through
/// `OverlayContext`; nothing else holds overlay state.
pub mod context;

/// At-most-one-in-flight detection driver.
pub mod scheduler;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures a transparent canvas for web targets and vsync settings.
pub mod window_config;
