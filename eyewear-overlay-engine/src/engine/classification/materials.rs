use bevy::prelude::*;
use bevy::render::render_resource::Face;
use constants::render_settings::*;

use super::classifier::PartRole;
use crate::engine::assets::style::{FrameMaterial, MaterialStyle};

/// Renderer-independent description of a part's material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProfile {
    pub base_color: Srgba,
    pub opacity: f32,
    pub transmission: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub double_sided: bool,
    pub depth_write: bool,
    /// Higher draws later among overlapping transparent surfaces.
    pub render_order: i32,
}

pub fn lens_profile(style: &MaterialStyle) -> MaterialProfile {
    MaterialProfile {
        base_color: style.lens_color,
        opacity: style.tint_opacity.clamp(LENS_OPACITY_MIN, LENS_OPACITY_MAX),
        transmission: LENS_TRANSMISSION,
        roughness: LENS_ROUGHNESS,
        metalness: LENS_METALNESS,
        clearcoat: LENS_CLEARCOAT,
        clearcoat_roughness: LENS_CLEARCOAT_ROUGHNESS,
        double_sided: true,
        depth_write: false,
        render_order: LENS_RENDER_ORDER,
    }
}

pub fn frame_profile(style: &MaterialStyle) -> MaterialProfile {
    let (metalness, roughness) = match style.frame_material {
        FrameMaterial::Metal => (
            style
                .frame_metalness
                .filter(|m| *m >= METAL_FRAME_MIN_METALNESS)
                .map(|m| m.min(1.0))
                .unwrap_or(METAL_FRAME_METALNESS),
            METAL_FRAME_ROUGHNESS,
        ),
        FrameMaterial::Plastic => (PLASTIC_FRAME_METALNESS, PLASTIC_FRAME_ROUGHNESS),
    };

    MaterialProfile {
        base_color: style.frame_color,
        opacity: 1.0,
        transmission: 0.0,
        roughness,
        metalness,
        clearcoat: 0.0,
        clearcoat_roughness: 0.0,
        double_sided: true,
        depth_write: true,
        render_order: 0,
    }
}

pub fn profile_for(role: PartRole, style: &MaterialStyle) -> MaterialProfile {
    match role {
        PartRole::Lens => lens_profile(style),
        PartRole::Frame => frame_profile(style),
    }
}

impl MaterialProfile {
    pub fn to_standard_material(&self) -> StandardMaterial {
        let blended = !self.depth_write || self.opacity < 1.0;

        StandardMaterial {
            base_color: Srgba {
                alpha: self.opacity,
                ..self.base_color
            }
            .into(),
            // Blended surfaces go through the transparent pass, which
            // neither writes depth nor draws before opaque geometry.
            alpha_mode: if blended {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            perceptual_roughness: self.roughness,
            metallic: self.metalness,
            specular_transmission: self.transmission,
            thickness: if self.transmission > 0.0 {
                LENS_THICKNESS
            } else {
                0.0
            },
            ior: LENS_IOR,
            clearcoat: self.clearcoat,
            clearcoat_perceptual_roughness: self.clearcoat_roughness,
            double_sided: self.double_sided,
            cull_mode: if self.double_sided {
                None
            } else {
                Some(Face::Back)
            },
            depth_bias: self.render_order as f32,
            ..default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metal_style(metalness: Option<f32>) -> MaterialStyle {
        MaterialStyle {
            frame_material: FrameMaterial::Metal,
            frame_metalness: metalness,
            ..default()
        }
    }

    #[test]
    fn lens_opacity_is_clamped() {
        for (tint, expected) in [(0.0, 0.15), (0.4, 0.4), (0.95, 0.6)] {
            let style = MaterialStyle {
                tint_opacity: tint,
                ..default()
            };
            assert_eq!(lens_profile(&style).opacity, expected);
        }
    }

    #[test]
    fn lens_is_transmissive_and_drawn_late() {
        let lens = lens_profile(&MaterialStyle::default());

        assert!(lens.transmission >= 0.8);
        assert!(lens.roughness < 0.1);
        assert_eq!(lens.metalness, 0.0);
        assert!(lens.clearcoat > 0.0);
        assert!(lens.double_sided);
        assert!(!lens.depth_write);
        assert!(lens.render_order > frame_profile(&MaterialStyle::default()).render_order);
    }

    #[test]
    fn frame_finish_follows_category() {
        let plastic = frame_profile(&MaterialStyle::default());
        assert_eq!(plastic.metalness, 0.0);
        assert_eq!(plastic.roughness, 0.5);

        let metal = frame_profile(&metal_style(None));
        assert!(metal.metalness >= 0.6);
        assert_eq!(metal.roughness, 0.25);
        assert!(metal.double_sided);
        assert_eq!(metal.opacity, 1.0);
    }

    #[test]
    fn metalness_override_respects_floor() {
        assert_eq!(frame_profile(&metal_style(Some(0.7))).metalness, 0.7);
        assert_eq!(
            frame_profile(&metal_style(Some(0.5))).metalness,
            METAL_FRAME_METALNESS
        );
        // Plastic frames ignore the override.
        let plastic = MaterialStyle {
            frame_metalness: Some(0.9),
            ..default()
        };
        assert_eq!(frame_profile(&plastic).metalness, 0.0);
    }

    #[test]
    fn standard_material_conversion() {
        let style = MaterialStyle {
            tint_opacity: 0.3,
            ..default()
        };

        let lens = profile_for(PartRole::Lens, &style).to_standard_material();
        assert!(matches!(lens.alpha_mode, AlphaMode::Blend));
        assert_eq!(lens.base_color.alpha(), 0.3);
        assert_eq!(lens.specular_transmission, LENS_TRANSMISSION);
        assert!(lens.double_sided);
        assert_eq!(lens.cull_mode, None);
        assert!(lens.depth_bias > 0.0);

        let frame = profile_for(PartRole::Frame, &style).to_standard_material();
        assert!(matches!(frame.alpha_mode, AlphaMode::Opaque));
        assert_eq!(frame.base_color.alpha(), 1.0);
        assert_eq!(frame.depth_bias, 0.0);
    }
}
