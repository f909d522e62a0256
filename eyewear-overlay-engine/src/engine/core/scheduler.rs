use bevy::prelude::*;

use super::context::{FrameUpdate, OverlayContext};
use crate::engine::tracking::detector::LandmarkDetector;

/// Counters for the per-frame loop, reported in debug logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ticks: u64,
    pub requests: u64,
    pub detections: u64,
    pub faces: u64,
}

/// Drives detections at most one at a time: a tick collects the outstanding
/// result if it has arrived, and only then asks for a new one.
#[derive(Resource, Debug, Clone, Default)]
pub struct TickScheduler {
    in_flight: bool,
    stats: TickStats,
}

impl TickScheduler {
    /// One display tick. Returns the update produced by a detection that
    /// completed this tick, or `None` when nothing arrived.
    pub fn advance(
        &mut self,
        ctx: &mut OverlayContext,
        detector: &mut dyn LandmarkDetector,
    ) -> Option<FrameUpdate> {
        self.stats.ticks += 1;

        let mut update = None;
        if self.in_flight {
            match detector.poll() {
                Some(detection) => {
                    self.in_flight = false;
                    self.stats.detections += 1;
                    let result = ctx.apply_detection(detection);
                    if result != FrameUpdate::Held {
                        self.stats.faces += 1;
                    }
                    update = Some(result);
                }
                None => return None,
            }
        }

        detector.request();
        self.in_flight = true;
        self.stats.requests += 1;
        update
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Drop the outstanding request, e.g. when the detector is replaced.
    pub fn reset(&mut self) {
        self.in_flight = false;
    }
}
