use constants::class::*;

use crate::engine::assets::asset_part::AssetPart;

/// Evidence a rule looks for. Kept alongside the score so classification
/// results can be logged and inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    LensName,
    GlassName,
    TintName,
    ClearMaterialName,
    TransparentMaterial,
    TransmissiveMaterial,
    ThinShell,
}

/// Lower-cased text and derived geometry of a part, computed once per part.
#[derive(Debug, Clone)]
pub struct PartFeatures<'a> {
    pub part: &'a AssetPart,
    pub name: String,
    pub material_name: String,
    pub thinness: f32,
}

impl<'a> PartFeatures<'a> {
    pub fn of(part: &'a AssetPart) -> Self {
        Self {
            part,
            name: part.name.to_lowercase(),
            material_name: part.material_name.to_lowercase(),
            thinness: part.bounds.thinness_ratio(),
        }
    }

    fn any_text(&self, pred: impl Fn(&str) -> bool) -> bool {
        pred(&self.name) || pred(&self.material_name)
    }
}

pub struct ScoringRule {
    pub signal: Signal,
    pub weight: f32,
    pub applies: fn(&PartFeatures) -> bool,
}

fn lens_name(f: &PartFeatures) -> bool {
    // "lense" contains "lens"
    f.any_text(|t| t.contains("lens"))
}

fn glass_name(f: &PartFeatures) -> bool {
    f.any_text(|t| t.contains("glass") && !t.contains("glasses"))
}

fn tint_name(f: &PartFeatures) -> bool {
    f.any_text(|t| t.contains("tint"))
}

fn clear_material_name(f: &PartFeatures) -> bool {
    f.material_name.contains("transparent") || f.material_name.contains("clear")
}

fn transparent_material(f: &PartFeatures) -> bool {
    let m = &f.part.material;
    m.transparent && m.opacity.is_some_and(|o| o < TRANSPARENT_OPACITY_LIMIT)
}

fn transmissive_material(f: &PartFeatures) -> bool {
    f.part
        .material
        .transmission
        .is_some_and(|t| t > TRANSMISSION_LIMIT)
}

fn thin_shell(f: &PartFeatures) -> bool {
    f.thinness < THIN_SHELL_RATIO
}

/// Lens evidence, applied in order to every part. Each rule adds its weight
/// at most once.
pub const LENS_RULES: &[ScoringRule] = &[
    ScoringRule {
        signal: Signal::LensName,
        weight: LENS_NAME_WEIGHT,
        applies: lens_name,
    },
    ScoringRule {
        signal: Signal::GlassName,
        weight: GLASS_NAME_WEIGHT,
        applies: glass_name,
    },
    ScoringRule {
        signal: Signal::TintName,
        weight: TINT_NAME_WEIGHT,
        applies: tint_name,
    },
    ScoringRule {
        signal: Signal::ClearMaterialName,
        weight: CLEAR_MATERIAL_WEIGHT,
        applies: clear_material_name,
    },
    ScoringRule {
        signal: Signal::TransparentMaterial,
        weight: TRANSPARENT_MATERIAL_WEIGHT,
        applies: transparent_material,
    },
    ScoringRule {
        signal: Signal::TransmissiveMaterial,
        weight: TRANSMISSIVE_MATERIAL_WEIGHT,
        applies: transmissive_material,
    },
    ScoringRule {
        signal: Signal::ThinShell,
        weight: THIN_SHELL_WEIGHT,
        applies: thin_shell,
    },
];

/// Accumulated lens score of one part and the signals that fired.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassificationScore {
    pub score: f32,
    pub signals: Vec<Signal>,
}

pub fn score_part(part: &AssetPart, rules: &[ScoringRule]) -> ClassificationScore {
    let features = PartFeatures::of(part);
    rules
        .iter()
        .filter(|rule| (rule.applies)(&features))
        .fold(ClassificationScore::default(), |mut acc, rule| {
            acc.score += rule.weight;
            acc.signals.push(rule.signal);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::asset_part::PartMaterialProps;
    use crate::engine::assets::bounds::PartBounds;
    use bevy::math::Vec3;

    fn chunky(name: &str) -> AssetPart {
        AssetPart::new(name, PartBounds::from_center_size(Vec3::ZERO, Vec3::ONE))
    }

    fn score(part: &AssetPart) -> ClassificationScore {
        score_part(part, LENS_RULES)
    }

    #[test]
    fn name_rules() {
        assert_eq!(score(&chunky("Lens_L")).signals, vec![Signal::LensName]);
        assert_eq!(score(&chunky("lenses")).score, 10.0);
        assert_eq!(score(&chunky("FrontGlass")).signals, vec![Signal::GlassName]);
        assert_eq!(score(&chunky("Glasses_Root")).score, 0.0);
        assert_eq!(score(&chunky("tinted")).score, 5.0);
    }

    #[test]
    fn material_name_counts_for_text_rules() {
        let part = chunky("mesh_04").with_material("Clear Glass", PartMaterialProps::default());
        let s = score(&part);

        assert_eq!(s.signals, vec![Signal::GlassName, Signal::ClearMaterialName]);
        assert_eq!(s.score, 13.0);
    }

    #[test]
    fn clear_rule_only_reads_material_name() {
        assert_eq!(score(&chunky("clear_coat_frame")).score, 0.0);
    }

    #[test]
    fn material_property_rules() {
        let see_through = chunky("a").with_material(
            "",
            PartMaterialProps {
                opacity: Some(0.4),
                transparent: true,
                transmission: None,
            },
        );
        assert_eq!(score(&see_through).signals, vec![Signal::TransparentMaterial]);

        // Opacity alone without a blending flag is not evidence.
        let flagged_off = chunky("b").with_material(
            "",
            PartMaterialProps {
                opacity: Some(0.4),
                transparent: false,
                transmission: None,
            },
        );
        assert_eq!(score(&flagged_off).score, 0.0);

        let transmissive = chunky("c").with_material(
            "",
            PartMaterialProps {
                transmission: Some(0.9),
                ..Default::default()
            },
        );
        assert_eq!(score(&transmissive).score, 10.0);
    }

    #[test]
    fn thin_shell_rule() {
        let thin = AssetPart::new(
            "shell",
            PartBounds::from_center_size(Vec3::ZERO, Vec3::new(1.0, 0.8, 0.05)),
        );
        assert_eq!(score(&thin).signals, vec![Signal::ThinShell]);
        assert_eq!(score(&thin).score, 6.0);
    }

    #[test]
    fn signals_stack() {
        let part = AssetPart::new(
            "lens_tint_left",
            PartBounds::from_center_size(Vec3::ZERO, Vec3::new(1.0, 0.8, 0.01)),
        )
        .with_material(
            "transparent_glass",
            PartMaterialProps {
                opacity: Some(0.3),
                transparent: true,
                transmission: Some(1.0),
            },
        );

        assert_eq!(score(&part).score, 10.0 + 8.0 + 5.0 + 5.0 + 8.0 + 10.0 + 6.0);
        assert_eq!(score(&part).signals.len(), LENS_RULES.len());
    }
}
