use bevy::prelude::*;

/// Axis-aligned bounds in a model's local space.
/// Used for per-part thinness/symmetry tests and whole-model centring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl PartBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    /// Tightest bounds around `points`; `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Extent along X, the axis lenses sit side by side on.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Smallest extent over largest; 1.0 for point-like bounds.
    pub fn thinness_ratio(&self) -> f32 {
        let size = self.size();
        let largest = size.max_element();
        if largest <= f32::EPSILON {
            return 1.0;
        }
        size.min_element() / largest
    }

    /// Bounds after `translate` then uniform `scale`.
    pub fn recentred(&self, translate: Vec3, scale: f32) -> Self {
        Self::new((self.min + translate) * scale, (self.max + translate) * scale)
    }
}
