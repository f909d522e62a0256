use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::style::MaterialStyle;
use crate::engine::camera::CameraProjection;
use crate::engine::classification::classifier::SymmetryTolerance;
use crate::engine::loading::prepare::PreparedAsset;
use crate::engine::loading::tokens::{LoadToken, LoadTracker};
use crate::engine::tracking::detector::Detection;
use crate::engine::tracking::landmarks::LandmarkSchema;
use crate::engine::tracking::pose::PoseEstimator;
use crate::engine::tracking::scale::{overlay_scale, scale_vector};
use crate::engine::tracking::smoother::LandmarkSmoother;
use crate::engine::tracking::stabilizer::Stabilizer;
use crate::engine::tracking::anchor::anchor_position;
use crate::error::OverlayError;

/// User fit adjustments applied on top of the measured face geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Calibration {
    pub scale_multiplier: f32,
    /// Extra horizontal stretch for wide or narrow faces.
    pub width_multiplier: f32,
    pub vertical_offset: f32,
    pub depth_offset: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale_multiplier: 1.0,
            width_multiplier: 1.0,
            vertical_offset: 0.0,
            depth_offset: 0.0,
        }
    }
}

/// Partial calibration change; unset fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalibrationUpdate {
    pub scale_multiplier: Option<f32>,
    pub width_multiplier: Option<f32>,
    pub vertical_offset: Option<f32>,
    pub depth_offset: Option<f32>,
}

impl Calibration {
    /// Apply `update`, ignoring non-finite values.
    pub fn apply(&mut self, update: &CalibrationUpdate) {
        fn set(field: &mut f32, value: Option<f32>) {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                *field = v;
            }
        }
        set(&mut self.scale_multiplier, update.scale_multiplier);
        set(&mut self.width_multiplier, update.width_multiplier);
        set(&mut self.vertical_offset, update.vertical_offset);
        set(&mut self.depth_offset, update.depth_offset);
    }
}

/// What a detection did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameUpdate {
    /// New stabilised transform for the overlay root.
    Updated(Transform),
    /// No usable face; the last transform stays.
    Held,
    /// Face tracked but no model prepared yet.
    AwaitingAsset,
}

/// Outcome of handing a finished load to the context.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Superseded by a newer load; dropped.
    Stale,
    /// Current load failed; the previous model stays displayed.
    Failed(OverlayError),
    Applied,
}

/// The model currently on screen.
#[derive(Debug, Clone)]
pub struct DisplayedAsset {
    pub token: LoadToken,
    pub model: usize,
    pub prepared: PreparedAsset,
}

/// Everything the per-frame pipeline and the load pipeline share.
#[derive(Resource, Debug, Clone, Default)]
pub struct OverlayContext {
    pub calibration: Calibration,
    pub style: MaterialStyle,
    pub projection: CameraProjection,
    pub schema: LandmarkSchema,
    pub symmetry: SymmetryTolerance,
    smoother: LandmarkSmoother,
    pose: PoseEstimator,
    stabilizer: Stabilizer,
    loads: LoadTracker,
    pending_model: Option<(LoadToken, usize)>,
    displayed: Option<DisplayedAsset>,
}

impl OverlayContext {
    /// Run one detection through smoother, pose, scale, anchor and
    /// stabilizer.
    pub fn apply_detection(&mut self, detection: Detection) -> FrameUpdate {
        let Detection::Face(frame) = detection else {
            return FrameUpdate::Held;
        };

        let smoothed = self.smoother.update(&frame);
        let schema = self.schema.for_projection(&self.projection);
        let Some(face) = schema.resolve(smoothed) else {
            debug!("Landmark frame too short for schema, holding overlay");
            return FrameUpdate::Held;
        };

        let basis = self.pose.estimate(&face);

        let Some(displayed) = &self.displayed else {
            return FrameUpdate::AwaitingAsset;
        };

        let user_scale = self.calibration.scale_multiplier * self.style.frame_scale;
        let scale = overlay_scale(
            face.temple_distance(),
            displayed.prepared.reference_width,
            user_scale,
        );
        let target = Transform {
            translation: anchor_position(
                &face,
                basis.rotation,
                self.calibration.vertical_offset,
                self.calibration.depth_offset,
            ),
            rotation: basis.rotation,
            scale: scale_vector(scale, self.calibration.width_multiplier),
        };

        FrameUpdate::Updated(self.stabilizer.step(target))
    }

    /// Register a load of catalogue entry `model` and return its token.
    pub fn begin_load(&mut self, model: usize) -> LoadToken {
        let token = self.loads.begin();
        self.pending_model = Some((token, model));
        token
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        self.loads.is_current(token)
    }

    /// Accept the result of a load. Only the most recent load may replace
    /// the displayed model.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        result: Result<PreparedAsset, OverlayError>,
    ) -> LoadOutcome {
        if !self.loads.is_current(token) {
            debug!("Discarding stale model load {:?}", token);
            return LoadOutcome::Stale;
        }

        let model = match self.pending_model.take() {
            Some((pending, model)) if pending == token => model,
            other => {
                self.pending_model = other;
                return LoadOutcome::Stale;
            }
        };

        match result {
            Ok(prepared) => {
                self.displayed = Some(DisplayedAsset {
                    token,
                    model,
                    prepared,
                });
                LoadOutcome::Applied
            }
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    pub fn displayed(&self) -> Option<&DisplayedAsset> {
        self.displayed.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_model.is_some()
    }

    /// Last applied overlay transform.
    pub fn transform(&self) -> Option<Transform> {
        self.stabilizer.current()
    }

    /// Forget all tracking history, e.g. after the detector changes.
    pub fn reset_tracking(&mut self) {
        self.smoother.reset();
        self.stabilizer.reset();
        self.pose = PoseEstimator::default();
    }
}
