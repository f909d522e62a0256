use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::landmarks::{LandmarkFrame, LandmarkSchema};
use crate::engine::camera::CameraProjection;
use crate::error::OverlayError;

/// Result of one detector run.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Face(LandmarkFrame),
    NoFace,
}

impl Detection {
    /// Lift raw detector output (`None` for no face) into world space.
    pub fn from_normalized(
        raw: Option<&[[f32; 3]]>,
        projection: &CameraProjection,
        schema: &LandmarkSchema,
    ) -> Result<Self, OverlayError> {
        match raw {
            Some(points) => Ok(Detection::Face(LandmarkFrame::from_normalized(
                points, projection, schema,
            )?)),
            None => Ok(Detection::NoFace),
        }
    }
}

/// External landmark detector. Both calls must return immediately; the
/// scheduler keeps at most one request outstanding.
pub trait LandmarkDetector: Send + Sync + 'static {
    /// Ask for a detection on the current video frame.
    fn request(&mut self);

    /// Result of the outstanding request, if it has arrived.
    fn poll(&mut self) -> Option<Detection>;
}

/// Detector that never reports anything; used until the manifest is loaded.
#[derive(Debug, Default)]
pub struct IdleDetector;

impl LandmarkDetector for IdleDetector {
    fn request(&mut self) {}

    fn poll(&mut self) -> Option<Detection> {
        None
    }
}

/// Recorded detector session as stored in `*.landmarks.json` files.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkRecording {
    /// One entry per detector run; `null` marks a frame with no face.
    pub frames: Vec<Option<Vec<[f32; 3]>>>,
}

/// Plays a recording back in a loop, one frame per request.
#[derive(Debug)]
pub struct ReplayDetector {
    frames: Vec<Detection>,
    cursor: usize,
    pending: bool,
}

impl ReplayDetector {
    pub fn from_recording(
        recording: &LandmarkRecording,
        projection: &CameraProjection,
        schema: &LandmarkSchema,
    ) -> Result<Self, OverlayError> {
        let frames = recording
            .frames
            .iter()
            .map(|f| Detection::from_normalized(f.as_deref(), projection, schema))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            frames,
            cursor: 0,
            pending: false,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl LandmarkDetector for ReplayDetector {
    fn request(&mut self) {
        self.pending = true;
    }

    fn poll(&mut self) -> Option<Detection> {
        if !self.pending || self.frames.is_empty() {
            return None;
        }
        self.pending = false;

        let detection = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        Some(detection)
    }
}

#[derive(Debug, Default)]
struct HostSlot {
    request_pending: bool,
    result: Option<Detection>,
}

/// Detector backed by the host page: requests go out as bridge
/// notifications and results come back through [`HostDetectorLink`].
#[derive(Debug)]
pub struct HostDetector {
    slot: Arc<Mutex<HostSlot>>,
}

/// Bridge-side handle of a [`HostDetector`].
#[derive(Resource, Debug, Clone)]
pub struct HostDetectorLink {
    slot: Arc<Mutex<HostSlot>>,
}

impl HostDetector {
    pub fn new() -> (Self, HostDetectorLink) {
        let slot = Arc::new(Mutex::new(HostSlot::default()));
        (
            Self { slot: slot.clone() },
            HostDetectorLink { slot },
        )
    }
}

impl LandmarkDetector for HostDetector {
    fn request(&mut self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.request_pending = true;
        }
    }

    fn poll(&mut self) -> Option<Detection> {
        self.slot.lock().ok().and_then(|mut slot| slot.result.take())
    }
}

impl HostDetectorLink {
    /// Take a request raised since the last call, if any.
    pub fn take_request(&self) -> bool {
        self.slot
            .lock()
            .map(|mut slot| std::mem::take(&mut slot.request_pending))
            .unwrap_or(false)
    }

    /// Hand a detector result to the engine. A newer result replaces one the
    /// scheduler has not picked up yet.
    pub fn deliver(&self, detection: Detection) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.result = Some(detection);
        }
    }
}

/// Detector currently driving the per-frame pipeline.
#[derive(Resource)]
pub struct ActiveDetector(pub Box<dyn LandmarkDetector>);

impl Default for ActiveDetector {
    fn default() -> Self {
        Self(Box::new(IdleDetector))
    }
}
