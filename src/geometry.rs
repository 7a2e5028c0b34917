//! Screen-space math. World coordinates grow rightward on x and downward on
//! y, so angles are measured with y flipped to keep the usual counter-clockwise
//! convention.

use glam::Vec2;

/// Angle in degrees of the vector from `origin` to `target`.
pub fn angle_to_target(origin: Vec2, target: Vec2) -> f32 {
    let delta = target - origin;
    (-delta.y).atan2(delta.x).to_degrees()
}

/// Unit vector for an angle produced by [`angle_to_target`].
pub fn direction_from_angle(angle_deg: f32) -> Vec2 {
    let radians = angle_deg.to_radians();
    Vec2::new(radians.cos(), -radians.sin())
}

/// Axis-aligned square centered on a point. Used for every hit test,
/// whatever the entity looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec2,
    pub size: f32,
}

impl Footprint {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.size / 2.0)
    }

    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.size / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}
