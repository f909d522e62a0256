use bevy::prelude::*;
use constants::tracking::{
    STABILIZER_POSITION_RATE, STABILIZER_ROTATION_RATE, STABILIZER_SCALE_RATE,
};

/// Per-tick interpolation factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizerRates {
    pub position: f32,
    pub rotation: f32,
    pub scale: f32,
}

impl Default for StabilizerRates {
    fn default() -> Self {
        Self {
            position: STABILIZER_POSITION_RATE,
            rotation: STABILIZER_ROTATION_RATE,
            scale: STABILIZER_SCALE_RATE,
        }
    }
}

/// Moves the applied overlay transform a fixed fraction of the way toward
/// each new target. No velocity state; convergence is geometric.
#[derive(Debug, Clone, Default)]
pub struct Stabilizer {
    rates: StabilizerRates,
    current: Option<Transform>,
}

impl Stabilizer {
    pub fn with_rates(rates: StabilizerRates) -> Self {
        Self {
            rates,
            current: None,
        }
    }

    /// Advance one tick toward `target`. The first target is taken as is.
    pub fn step(&mut self, target: Transform) -> Transform {
        let next = match self.current {
            None => target,
            Some(current) => Transform {
                translation: current.translation.lerp(target.translation, self.rates.position),
                rotation: current
                    .rotation
                    .slerp(target.rotation, self.rates.rotation)
                    .normalize(),
                scale: current.scale.lerp(target.scale, self.rates.scale),
            },
        };
        self.current = Some(next);
        next
    }

    /// Transform currently applied to the overlay, held across no-face ticks.
    pub fn current(&self) -> Option<Transform> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
