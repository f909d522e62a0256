use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::{LANDMARK_RECORDING_EXTENSION, OVERLAY_MANIFEST_EXTENSION};

// Crate engine modules
use crate::engine::assets::catalogue::ModelCatalogue;
use crate::engine::assets::overlay_manifest::OverlayManifest;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::context::OverlayContext;
use crate::engine::core::scheduler::TickScheduler;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, load_manifest_system, load_replay_system, start_loading,
};
use crate::engine::loading::model_loader::{
    AssetStatus, ModelLoadRequest, StyleChanged, classify_spawned_models, detect_failed_loads,
    restyle_displayed_model, spawn_overlay_root, start_model_loads,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::systems::model_navigation::{ModelNavigation, handle_model_navigation};
use crate::engine::systems::overlay_sync::run_tracking_tick;
use crate::engine::systems::tracking_stats::tracking_stats_notification_system;
use crate::engine::tracking::detector::{ActiveDetector, LandmarkRecording};
// Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::model_navigation::keyboard_model_navigation;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Engine configuration and recorded sessions are JSON assets.
        .add_plugins(JsonAssetPlugin::<OverlayManifest>::new(&[
            OVERLAY_MANIFEST_EXTENSION,
        ]))
        .add_plugins(JsonAssetPlugin::<LandmarkRecording>::new(&[
            LANDMARK_RECORDING_EXTENSION,
        ]))
        .add_plugins(WebRpcPlugin)
        // The video feed shows through wherever the overlay draws nothing.
        .insert_resource(ClearColor(Color::NONE));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<OverlayContext>()
        .init_resource::<ModelCatalogue>()
        .init_resource::<TickScheduler>()
        .init_resource::<ActiveDetector>()
        .add_event::<ModelLoadRequest>()
        .add_event::<AssetStatus>()
        .add_event::<StyleChanged>()
        .add_event::<ModelNavigation>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_manifest_system, load_replay_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Model loads run in every state so the first model can be prepared
    // while the detector is still starting.
    app.add_systems(
        Update,
        (
            handle_model_navigation,
            start_model_loads,
            detect_failed_loads,
            classify_spawned_models,
            restyle_displayed_model,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        (run_tracking_tick, tracking_stats_notification_system)
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            keyboard_model_navigation.before(handle_model_navigation),
        );
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            illuminance: 4_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 2.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });
}

// Startup system that only handles basic initialisation; the camera is
// spawned once the manifest supplies its projection.
fn setup(mut commands: Commands) {
    println!("=== EYEWEAR OVERLAY ENGINE ===");

    spawn_lighting(&mut commands);
    spawn_overlay_root(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
