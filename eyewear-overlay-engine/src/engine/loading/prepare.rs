use bevy::prelude::*;
use constants::tracking::CANONICAL_MODEL_WIDTH;

use crate::engine::assets::asset_part::AssetPart;
use crate::engine::assets::bounds::PartBounds;
use crate::engine::classification::classifier::{
    Classification, SymmetryTolerance, classify_parts,
};
use crate::error::OverlayError;

/// A model after load-time preparation: recentred on its bounding box,
/// uniformly scaled to the canonical width, and classified.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAsset {
    /// Parts in prepared (recentred, normalised) model space.
    pub parts: Vec<AssetPart>,
    pub classification: Classification,
    /// Translation that moves the raw bounding-box centre to the origin.
    pub recentre: Vec3,
    /// Uniform scale taking the raw width to the canonical width.
    pub normalize: f32,
    /// Model width the scale stage fits to the face.
    pub reference_width: f32,
}

impl PreparedAsset {
    /// Recentre, normalise and classify `parts` given in scene-root space.
    pub fn prepare(parts: Vec<AssetPart>, tolerance: &SymmetryTolerance) -> Result<Self, OverlayError> {
        let bounds = parts
            .iter()
            .map(|p| p.bounds)
            .reduce(|a, b| a.union(&b))
            .ok_or_else(|| OverlayError::AssetLoadFailed("model has no mesh parts".to_string()))?;

        let width = bounds.width();
        if !width.is_finite() || width <= 0.0 {
            return Err(OverlayError::AssetLoadFailed(format!(
                "model has degenerate width {}",
                width
            )));
        }

        let recentre = -bounds.center();
        let normalize = CANONICAL_MODEL_WIDTH / width;

        let parts: Vec<AssetPart> = parts
            .into_iter()
            .map(|mut p| {
                p.bounds = p.bounds.recentred(recentre, normalize);
                p
            })
            .collect();
        let classification = classify_parts(&parts, tolerance);

        Ok(Self {
            parts,
            classification,
            recentre,
            normalize,
            reference_width: width * normalize,
        })
    }

    /// Transform for the model's scene root under the overlay root.
    pub fn root_transform(&self) -> Transform {
        Transform::from_scale(Vec3::splat(self.normalize))
            .with_translation(self.recentre * self.normalize)
    }

    pub fn bounds(&self) -> Option<PartBounds> {
        self.parts
            .iter()
            .map(|p| p.bounds)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classification::classifier::{LensSource, PartRole};
    use approx::assert_relative_eq;

    fn offset_glasses() -> Vec<AssetPart> {
        // 140 units wide, centred at (10, 5, 0).
        let c = Vec3::new(10.0, 5.0, 0.0);
        vec![
            AssetPart::new("frame_top", PartBounds::from_center_size(c + Vec3::Y * 20.0, Vec3::new(140.0, 12.0, 15.0))),
            AssetPart::new("lens_left", PartBounds::from_center_size(c + Vec3::X * -32.0, Vec3::new(50.0, 40.0, 2.0))),
            AssetPart::new("lens_right", PartBounds::from_center_size(c + Vec3::X * 32.0, Vec3::new(50.0, 40.0, 2.0))),
        ]
    }

    #[test]
    fn prepared_model_is_centred_at_canonical_width() {
        let prepared = PreparedAsset::prepare(offset_glasses(), &SymmetryTolerance::default()).unwrap();
        let bounds = prepared.bounds().unwrap();

        assert_relative_eq!(bounds.width(), CANONICAL_MODEL_WIDTH, epsilon = 1e-5);
        assert_relative_eq!(bounds.center().x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.center().y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(prepared.reference_width, CANONICAL_MODEL_WIDTH, epsilon = 1e-5);
        assert_eq!(prepared.classification.source, LensSource::Scored);
        assert_eq!(
            prepared.classification.roles,
            vec![PartRole::Frame, PartRole::Lens, PartRole::Lens]
        );
    }

    #[test]
    fn root_transform_maps_raw_centre_to_origin() {
        let prepared = PreparedAsset::prepare(offset_glasses(), &SymmetryTolerance::default()).unwrap();
        let root = prepared.root_transform();

        // The union box spans x in [-60, 80] and y in [-15, 31].
        let raw_centre = Vec3::new(10.0, 8.0, 0.0);
        let right_edge = Vec3::new(80.0, 8.0, 0.0);

        assert_relative_eq!(root.transform_point(raw_centre).length(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(root.transform_point(right_edge).x, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn empty_or_flat_models_are_rejected() {
        assert!(PreparedAsset::prepare(Vec::new(), &SymmetryTolerance::default()).is_err());

        let flat = vec![AssetPart::new("dot", PartBounds::from_center_size(Vec3::ZERO, Vec3::ZERO))];
        assert!(PreparedAsset::prepare(flat, &SymmetryTolerance::default()).is_err());
    }
}
