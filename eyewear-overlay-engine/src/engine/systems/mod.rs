//! Runtime systems connecting the overlay pipeline to the ECS world.

/// Catalogue navigation from bridge messages and the keyboard.
pub mod model_navigation;

/// Per-frame tracking tick and overlay root update.
pub mod overlay_sync;

/// Frame rate and detector throughput notifications for the host page.
pub mod tracking_stats;
