use bevy::prelude::*;
use constants::render_settings::{DEFAULT_FRAME_COLOR, DEFAULT_LENS_COLOR, DEFAULT_TINT_OPACITY};
use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Frame finish. Anything other than "metal" is treated as plastic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FrameMaterial {
    Metal,
    #[default]
    Plastic,
}

impl From<String> for FrameMaterial {
    fn from(value: String) -> Self {
        FrameMaterial::from(value.as_str())
    }
}

impl From<&str> for FrameMaterial {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("metal") {
            FrameMaterial::Metal
        } else {
            FrameMaterial::Plastic
        }
    }
}

impl From<FrameMaterial> for String {
    fn from(value: FrameMaterial) -> Self {
        match value {
            FrameMaterial::Metal => "metal".to_string(),
            FrameMaterial::Plastic => "plastic".to_string(),
        }
    }
}

/// Look of a pair of glasses as written in manifests and host messages.
/// Colours are hex strings, e.g. `"#3b82f6"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlassesStyle {
    pub lens_color: String,
    pub frame_color: String,
    pub tint_opacity: f32,
    pub frame_scale: f32,
    pub frame_material: FrameMaterial,
    pub frame_metalness: Option<f32>,
}

impl Default for GlassesStyle {
    fn default() -> Self {
        Self {
            lens_color: DEFAULT_LENS_COLOR.to_hex(),
            frame_color: DEFAULT_FRAME_COLOR.to_hex(),
            tint_opacity: DEFAULT_TINT_OPACITY,
            frame_scale: 1.0,
            frame_material: FrameMaterial::Plastic,
            frame_metalness: None,
        }
    }
}

fn parse_colour(value: &str) -> Result<Srgba, OverlayError> {
    Srgba::hex(value).map_err(|e| OverlayError::InvalidColour(value.to_string(), e))
}

impl GlassesStyle {
    pub fn from_json(json: &str) -> Result<Self, OverlayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse colours and sanitise numbers into a [`MaterialStyle`].
    pub fn resolve(&self) -> Result<MaterialStyle, OverlayError> {
        Ok(MaterialStyle {
            lens_color: parse_colour(&self.lens_color)?,
            frame_color: parse_colour(&self.frame_color)?,
            tint_opacity: if self.tint_opacity.is_finite() {
                self.tint_opacity
            } else {
                DEFAULT_TINT_OPACITY
            },
            frame_scale: if self.frame_scale.is_finite() && self.frame_scale > 0.0 {
                self.frame_scale
            } else {
                1.0
            },
            frame_material: self.frame_material,
            frame_metalness: self.frame_metalness.filter(|m| m.is_finite()),
        })
    }
}

/// Parsed style consumed by the material assigner and the scale stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialStyle {
    pub lens_color: Srgba,
    pub frame_color: Srgba,
    pub tint_opacity: f32,
    pub frame_scale: f32,
    pub frame_material: FrameMaterial,
    pub frame_metalness: Option<f32>,
}

impl Default for MaterialStyle {
    fn default() -> Self {
        Self {
            lens_color: DEFAULT_LENS_COLOR,
            frame_color: DEFAULT_FRAME_COLOR,
            tint_opacity: DEFAULT_TINT_OPACITY,
            frame_scale: 1.0,
            frame_material: FrameMaterial::Plastic,
            frame_metalness: None,
        }
    }
}
