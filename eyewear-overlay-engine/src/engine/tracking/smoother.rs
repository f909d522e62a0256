use bevy::prelude::*;
use constants::tracking::LANDMARK_SMOOTHING_ALPHA;

use super::landmarks::LandmarkFrame;

/// Exponential blend of `raw` into `previous`:
/// `smoothed = alpha * raw + (1 - alpha) * previous`.
///
/// With no previous frame, or one of a different length, `raw` passes
/// through unchanged.
pub fn blend_frames(previous: Option<&LandmarkFrame>, raw: &LandmarkFrame, alpha: f32) -> LandmarkFrame {
    match previous {
        Some(prev) if prev.len() == raw.len() => LandmarkFrame::new(
            prev.points()
                .iter()
                .zip(raw.points())
                .map(|(p, r)| p.lerp(*r, alpha))
                .collect(),
        ),
        _ => raw.clone(),
    }
}

/// Low-pass filter over successive detector frames.
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    alpha: f32,
    smoothed: Option<LandmarkFrame>,
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::with_alpha(LANDMARK_SMOOTHING_ALPHA)
    }
}

impl LandmarkSmoother {
    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            smoothed: None,
        }
    }

    /// Fold a new raw frame into the filter and return the smoothed result.
    pub fn update(&mut self, raw: &LandmarkFrame) -> &LandmarkFrame {
        if let Some(prev) = &self.smoothed {
            if prev.len() != raw.len() {
                warn!(
                    "Landmark frame length changed ({} -> {}), resetting smoother",
                    prev.len(),
                    raw.len()
                );
            }
        }

        let next = blend_frames(self.smoothed.as_ref(), raw, self.alpha);
        self.smoothed.insert(next)
    }

    /// Last smoothed frame; retained verbatim across no-face ticks.
    pub fn current(&self) -> Option<&LandmarkFrame> {
        self.smoothed.as_ref()
    }

    pub fn reset(&mut self) {
        self.smoothed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(value: f32) -> LandmarkFrame {
        LandmarkFrame::new(vec![Vec3::splat(value); 4])
    }

    #[test]
    fn first_frame_passes_through() {
        let mut smoother = LandmarkSmoother::default();
        let raw = LandmarkFrame::new(vec![Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_ONE]);

        assert_eq!(smoother.update(&raw), &raw);
    }

    #[test]
    fn blend_uses_fixed_alpha() {
        let mut smoother = LandmarkSmoother::default();
        smoother.update(&frame(0.0));
        let out = smoother.update(&frame(10.0));

        assert_relative_eq!(out.points()[0].x, 3.5, epsilon = 1e-5);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut smoother = LandmarkSmoother::default();
        smoother.update(&frame(-4.0));

        let target = frame(6.0);
        let mut last = -4.0f32;
        for _ in 0..60 {
            let x = smoother.update(&target).points()[0].x;
            assert!(x >= last, "smoothed value moved away from target");
            assert!(x <= 6.0, "smoothed value overshot target");
            last = x;
        }
        assert_relative_eq!(last, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn length_change_resets_to_raw() {
        let mut smoother = LandmarkSmoother::default();
        smoother.update(&frame(1.0));

        let longer = LandmarkFrame::new(vec![Vec3::splat(9.0); 6]);
        assert_eq!(smoother.update(&longer), &longer);
    }

    #[test]
    fn current_is_kept_until_next_update() {
        let mut smoother = LandmarkSmoother::default();
        assert!(smoother.current().is_none());

        smoother.update(&frame(2.0));
        assert_eq!(smoother.current(), Some(&frame(2.0)));

        smoother.reset();
        assert!(smoother.current().is_none());
    }
}
