use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::OVERLAY_MANIFEST_PATH;

use super::model_loader::ModelLoadRequest;
use super::progress::LoadingProgress;
use crate::engine::assets::catalogue::ModelCatalogue;
use crate::engine::assets::overlay_manifest::OverlayManifest;
use crate::engine::camera::spawn_overlay_camera;
use crate::engine::core::context::OverlayContext;
use crate::engine::core::scheduler::TickScheduler;
use crate::engine::tracking::detector::{ActiveDetector, LandmarkRecording, ReplayDetector};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<OverlayManifest>>,
    replay: Option<Handle<LandmarkRecording>>,
}

pub fn start_loading(mut loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading overlay manifest from {}", OVERLAY_MANIFEST_PATH);
    loader.handle = Some(asset_server.load(OVERLAY_MANIFEST_PATH));
}

/// Copy the manifest's settings into the context, fill the catalogue and
/// pick a detector.
pub fn apply_manifest(
    manifest: &OverlayManifest,
    ctx: &mut OverlayContext,
    catalogue: &mut ModelCatalogue,
) {
    ctx.calibration = manifest.calibration;
    ctx.projection = manifest.camera;
    ctx.schema = manifest.landmarks;
    ctx.symmetry = manifest.symmetry;
    match manifest.style.resolve() {
        Ok(style) => ctx.style = style,
        Err(err) => warn!("Manifest style rejected, keeping defaults: {}", err),
    }
    *catalogue = ModelCatalogue::new(manifest.models.clone());
}

pub fn load_manifest_system(
    mut progress: ResMut<LoadingProgress>,
    mut loader: ResMut<ManifestLoader>,
    manifests: Res<Assets<OverlayManifest>>,
    asset_server: Res<AssetServer>,
    mut ctx: ResMut<OverlayContext>,
    mut catalogue: ResMut<ModelCatalogue>,
    mut requests: EventWriter<ModelLoadRequest>,
    mut commands: Commands,
) {
    if progress.manifest_loaded {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    let manifest = match manifests.get(&handle) {
        Some(manifest) => manifest.clone(),
        None => {
            if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
                // Run with defaults and an empty catalogue rather than stall.
                error!("Overlay manifest failed to load: {}", err);
                let fallback = OverlayManifest::default();
                apply_manifest(&fallback, &mut ctx, &mut catalogue);
                spawn_overlay_camera(&mut commands, &fallback.camera);
                progress.manifest_loaded = true;
                progress.detector_ready = true;
            }
            return;
        }
    };

    info!("✓ Manifest loaded: {} models", manifest.models.len());
    apply_manifest(&manifest, &mut ctx, &mut catalogue);
    spawn_overlay_camera(&mut commands, &manifest.camera);
    configure_detector(&manifest, &mut loader, &mut progress, &asset_server, &mut commands);
    commands.insert_resource(manifest);
    progress.manifest_loaded = true;

    if let Ok(first) = catalogue.select(0) {
        requests.write(ModelLoadRequest { model: first });
    } else {
        warn!("Manifest lists no models; nothing to display");
    }
}

#[cfg(target_arch = "wasm32")]
fn configure_detector(
    _manifest: &OverlayManifest,
    _loader: &mut ManifestLoader,
    progress: &mut LoadingProgress,
    _asset_server: &AssetServer,
    commands: &mut Commands,
) {
    use crate::engine::tracking::detector::HostDetector;

    let (detector, link) = HostDetector::new();
    commands.insert_resource(ActiveDetector(Box::new(detector)));
    commands.insert_resource(link);
    progress.detector_ready = true;
    info!("Using host page landmark detector");
}

#[cfg(not(target_arch = "wasm32"))]
fn configure_detector(
    manifest: &OverlayManifest,
    loader: &mut ManifestLoader,
    progress: &mut LoadingProgress,
    asset_server: &AssetServer,
    _commands: &mut Commands,
) {
    match &manifest.replay {
        Some(path) => {
            info!("Replaying landmark session {}", path);
            loader.replay = Some(asset_server.load(path.clone()));
        }
        None => {
            info!("No landmark source configured; overlay stays hidden");
            progress.detector_ready = true;
        }
    }
}

/// Swap in the replay detector once its recording is available.
pub fn load_replay_system(
    mut progress: ResMut<LoadingProgress>,
    mut loader: ResMut<ManifestLoader>,
    recordings: Res<Assets<LandmarkRecording>>,
    asset_server: Res<AssetServer>,
    mut ctx: ResMut<OverlayContext>,
    mut scheduler: ResMut<TickScheduler>,
    mut detector: ResMut<ActiveDetector>,
) {
    let Some(handle) = loader.replay.clone() else {
        return;
    };

    if let Some(recording) = recordings.get(&handle) {
        match ReplayDetector::from_recording(recording, &ctx.projection, &ctx.schema) {
            Ok(replay) => {
                info!("✓ Landmark recording loaded: {} frames", replay.len());
                detector.0 = Box::new(replay);
                scheduler.reset();
                ctx.reset_tracking();
            }
            Err(err) => warn!("Landmark recording rejected: {}", err),
        }
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
        warn!("Landmark recording failed to load: {}", err);
    } else {
        return;
    }

    loader.replay = None;
    progress.detector_ready = true;
}
