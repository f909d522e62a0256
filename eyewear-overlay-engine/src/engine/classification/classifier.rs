use bevy::prelude::*;
use constants::class::{
    LENS_SCORE_THRESHOLD, MAX_LENS_PARTS, SYMMETRY_CENTER_SUM_TOLERANCE,
    SYMMETRY_CENTER_Y_TOLERANCE, SYMMETRY_THIN_RATIO,
};
use serde::{Deserialize, Serialize};

use super::rules::{ClassificationScore, LENS_RULES, score_part};
use crate::engine::assets::asset_part::AssetPart;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartRole {
    Lens,
    Frame,
}

/// Mirror-match tolerances of the symmetry fallback, in recentred and
/// width-normalised model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SymmetryTolerance {
    /// Max |cx_a + cx_b| for two centres to count as mirrored about X = 0.
    pub center_sum: f32,
    /// Max |cy_a - cy_b|.
    pub center_y: f32,
    /// Parts must be thinner than this to take part.
    pub thin_ratio: f32,
}

impl Default for SymmetryTolerance {
    fn default() -> Self {
        Self {
            center_sum: SYMMETRY_CENTER_SUM_TOLERANCE,
            center_y: SYMMETRY_CENTER_Y_TOLERANCE,
            thin_ratio: SYMMETRY_THIN_RATIO,
        }
    }
}

/// How the lens parts were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LensSource {
    Scored,
    Symmetry,
    None,
}

/// Role per part (same order as the input) plus the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub roles: Vec<PartRole>,
    pub scores: Vec<ClassificationScore>,
    pub source: LensSource,
}

impl Classification {
    pub fn lens_indices(&self) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == PartRole::Lens)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn lens_count(&self) -> usize {
        self.roles.iter().filter(|r| **r == PartRole::Lens).count()
    }
}

/// Highest scoring parts above the threshold, at most `MAX_LENS_PARTS`.
/// Ties keep asset order.
fn select_by_score(scores: &[ClassificationScore]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].score.total_cmp(&scores[a].score));
    order
        .into_iter()
        .filter(|&i| scores[i].score > LENS_SCORE_THRESHOLD)
        .take(MAX_LENS_PARTS)
        .collect()
}

/// First pair of thin parts whose centres mirror each other across X = 0.
fn mirrored_pair(parts: &[AssetPart], tolerance: &SymmetryTolerance) -> Option<(usize, usize)> {
    let thin: Vec<(usize, Vec3)> = parts
        .iter()
        .enumerate()
        .filter(|(_, p)| p.bounds.thinness_ratio() < tolerance.thin_ratio)
        .map(|(i, p)| (i, p.bounds.center()))
        .collect();

    for (n, &(a, ca)) in thin.iter().enumerate() {
        for &(b, cb) in &thin[n + 1..] {
            let mirrored_x = (ca.x + cb.x).abs() <= tolerance.center_sum;
            let level_y = (ca.y - cb.y).abs() <= tolerance.center_y;
            // A part on the midline mirrors itself; require two distinct sides.
            let separated = ca.x * cb.x < 0.0;
            if mirrored_x && level_y && separated {
                return Some((a, b));
            }
        }
    }
    None
}

/// Score every part and pick the lenses. Parts are expected in recentred
/// model space (midline at X = 0).
pub fn classify_parts(parts: &[AssetPart], tolerance: &SymmetryTolerance) -> Classification {
    let scores: Vec<ClassificationScore> =
        parts.iter().map(|p| score_part(p, LENS_RULES)).collect();
    let mut roles = vec![PartRole::Frame; parts.len()];

    let scored = select_by_score(&scores);
    let source = if !scored.is_empty() {
        for i in scored {
            roles[i] = PartRole::Lens;
        }
        LensSource::Scored
    } else if let Some((a, b)) = mirrored_pair(parts, tolerance) {
        roles[a] = PartRole::Lens;
        roles[b] = PartRole::Lens;
        LensSource::Symmetry
    } else {
        LensSource::None
    };

    Classification {
        roles,
        scores,
        source,
    }
}
