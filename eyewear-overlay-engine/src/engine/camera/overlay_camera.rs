use bevy::core_pipeline::core_3d::ScreenSpaceTransmissionQuality;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use constants::tracking::{
    DEFAULT_CAMERA_ASPECT, DEFAULT_CAMERA_FOV_Y_DEGREES, DEFAULT_LANDMARK_DEPTH,
};
use serde::{Deserialize, Serialize};

/// Projection parameters shared by the render camera and the landmark lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraProjection {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    /// Distance from the camera to the plane landmarks are placed on.
    pub depth: f32,
    /// Flip X so the overlay matches a selfie-mirrored video feed.
    pub mirror: bool,
}

impl Default for CameraProjection {
    fn default() -> Self {
        Self {
            fov_y_degrees: DEFAULT_CAMERA_FOV_Y_DEGREES,
            aspect: DEFAULT_CAMERA_ASPECT,
            depth: DEFAULT_LANDMARK_DEPTH,
            mirror: true,
        }
    }
}

impl CameraProjection {
    pub fn frustum_height(&self) -> f32 {
        2.0 * self.depth * (self.fov_y_degrees.to_radians() * 0.5).tan()
    }

    pub fn frustum_width(&self) -> f32 {
        self.frustum_height() * self.aspect
    }

    /// Convert a detector-normalised point (x, y in [0, 1], y down, z in
    /// x-relative units) into world space.
    pub fn to_world(&self, normalized: [f32; 3]) -> Vec3 {
        let width = self.frustum_width();
        let height = self.frustum_height();
        let [x, y, z] = normalized;

        let mut world_x = (x - 0.5) * width;
        if self.mirror {
            world_x = -world_x;
        }

        Vec3::new(world_x, (0.5 - y) * height, -self.depth - z * width)
    }

    fn perspective(&self) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.fov_y_degrees.to_radians(),
            aspect_ratio: self.aspect,
            ..default()
        }
    }
}

#[derive(Component)]
pub struct OverlayCamera;

pub fn spawn_overlay_camera(commands: &mut Commands, projection: &CameraProjection) {
    commands.spawn((
        Camera3d {
            // Lens materials use specular transmission
            screen_space_specular_transmission_steps: 1,
            screen_space_specular_transmission_quality: ScreenSpaceTransmissionQuality::Medium,
            ..default()
        },
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::Perspective(projection.perspective()),
        Transform::IDENTITY,
        OverlayCamera,
        Name::new("OverlayCamera"),
    ));
}
