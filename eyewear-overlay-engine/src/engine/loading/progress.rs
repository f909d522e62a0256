use bevy::prelude::*;

/// Startup milestones; the app runs once the manifest is applied and a
/// detector is in place.
#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub detector_ready: bool,
}

impl LoadingProgress {
    pub fn is_ready(&self) -> bool {
        self.manifest_loaded && self.detector_ready
    }
}
