/// Engine configuration, loaded at startup.
pub const OVERLAY_MANIFEST_PATH: &str = "overlay/glasses.overlay.json";

/// Extension registered for engine manifests.
pub const OVERLAY_MANIFEST_EXTENSION: &str = "overlay.json";

/// Extension registered for recorded landmark sessions.
pub const LANDMARK_RECORDING_EXTENSION: &str = "landmarks.json";
