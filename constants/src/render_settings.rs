use bevy::color::Srgba;

pub const DEFAULT_LENS_COLOR: Srgba = Srgba::rgb(0.231, 0.510, 0.965);
pub const DEFAULT_FRAME_COLOR: Srgba = Srgba::rgb(0.102, 0.102, 0.102);
pub const DEFAULT_TINT_OPACITY: f32 = 0.5;

/// Lens opacity is clamped into this range whatever the tint.
pub const LENS_OPACITY_MIN: f32 = 0.15;
pub const LENS_OPACITY_MAX: f32 = 0.6;

pub const LENS_TRANSMISSION: f32 = 0.85;
pub const LENS_ROUGHNESS: f32 = 0.05;
pub const LENS_METALNESS: f32 = 0.0;
pub const LENS_CLEARCOAT: f32 = 1.0;
pub const LENS_CLEARCOAT_ROUGHNESS: f32 = 0.05;
pub const LENS_IOR: f32 = 1.5;
pub const LENS_THICKNESS: f32 = 0.002;

/// Lenses draw after opaque parts.
pub const LENS_RENDER_ORDER: i32 = 1;

pub const METAL_FRAME_METALNESS: f32 = 0.8;
pub const METAL_FRAME_MIN_METALNESS: f32 = 0.6;
pub const METAL_FRAME_ROUGHNESS: f32 = 0.25;
pub const PLASTIC_FRAME_METALNESS: f32 = 0.0;
pub const PLASTIC_FRAME_ROUGHNESS: f32 = 0.5;
