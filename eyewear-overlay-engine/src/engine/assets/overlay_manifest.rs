use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::style::GlassesStyle;
use crate::engine::camera::CameraProjection;
use crate::engine::classification::classifier::SymmetryTolerance;
use crate::engine::core::context::Calibration;
use crate::engine::tracking::landmarks::LandmarkSchema;

/// One entry of the model catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    /// glTF path relative to the asset root.
    pub path: String,
    /// Overrides the manifest-wide style for this model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<GlassesStyle>,
}

/// Engine configuration as a Bevy asset. Mirrors the `*.overlay.json` layout.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayManifest {
    pub models: Vec<ModelEntry>,
    pub style: GlassesStyle,
    pub calibration: Calibration,
    pub camera: CameraProjection,
    pub landmarks: LandmarkSchema,
    pub symmetry: SymmetryTolerance,
    /// Recorded landmark session played back when no host detector exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replay: Option<String>,
}

impl OverlayManifest {
    pub fn from_json(json: &str) -> Result<Self, crate::error::OverlayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Style for `model`, falling back to the manifest-wide one.
    pub fn style_for(&self, model: usize) -> &GlassesStyle {
        self.models
            .get(model)
            .and_then(|m| m.style.as_ref())
            .unwrap_or(&self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::style::FrameMaterial;

    const MANIFEST: &str = r##"{
        "models": [
            { "name": "Aviator", "path": "models/aviator.glb" },
            { "name": "Round", "path": "models/round.glb",
              "style": { "frameMaterial": "metal", "lensColor": "#222222" } }
        ],
        "style": { "tintOpacity": 0.3 },
        "calibration": { "scaleMultiplier": 0.9, "depthOffset": 0.05 },
        "camera": { "fovYDegrees": 60.0, "mirror": false },
        "symmetry": { "centerSum": 0.2 },
        "replay": "sessions/demo.landmarks.json"
    }"##;

    #[test]
    fn manifest_parses_with_partial_sections() {
        let manifest = OverlayManifest::from_json(MANIFEST).unwrap();

        assert_eq!(manifest.models.len(), 2);
        assert_eq!(manifest.calibration.scale_multiplier, 0.9);
        assert_eq!(manifest.calibration.width_multiplier, 1.0);
        assert_eq!(manifest.camera.fov_y_degrees, 60.0);
        assert!(!manifest.camera.mirror);
        assert_eq!(manifest.symmetry.center_sum, 0.2);
        assert_eq!(
            manifest.symmetry.center_y,
            SymmetryTolerance::default().center_y
        );
        assert_eq!(manifest.landmarks, LandmarkSchema::default());
        assert_eq!(manifest.replay.as_deref(), Some("sessions/demo.landmarks.json"));
    }

    #[test]
    fn per_model_style_overrides_global() {
        let manifest = OverlayManifest::from_json(MANIFEST).unwrap();

        assert_eq!(manifest.style_for(0).tint_opacity, 0.3);
        assert_eq!(manifest.style_for(1).frame_material, FrameMaterial::Metal);
        // Out of range falls back to the global style.
        assert_eq!(manifest.style_for(7), &manifest.style);
    }

    #[test]
    fn shipped_manifest_references_shipped_files() {
        let assets = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let json = std::fs::read_to_string(assets.join(constants::path::OVERLAY_MANIFEST_PATH)).unwrap();
        let manifest = OverlayManifest::from_json(&json).unwrap();

        assert!(!manifest.models.is_empty());
        for model in &manifest.models {
            assert!(assets.join(&model.path).is_file(), "missing {}", model.path);
        }
        let replay = manifest.replay.unwrap();
        assert!(assets.join(replay).is_file());
    }
}
