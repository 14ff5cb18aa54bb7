//! Math utilities and types
//!
//! Provides the 2D math types used by components and systems.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Rectangular play area anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Width of the play area
    pub width: f32,

    /// Height of the play area
    pub height: f32,
}

impl Bounds {
    /// Create new bounds
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the play area
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Unit vector pointing along `angle` (radians, 0 = +X)
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap an angle into `(-PI, PI]`
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Rotate `current` toward `target` by at most `max_step` radians along the shortest arc
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = wrap_angle(target - current);
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heading_is_unit_length() {
        let h = heading(1.234);
        assert_relative_eq!(h.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(0.5), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_towards_takes_shortest_arc() {
        // Just below +PI to just above -PI: the shortest arc crosses ±PI
        let next = rotate_towards(PI - 0.1, -PI + 0.1, 0.05);
        assert!(next > PI - 0.1);

        assert_relative_eq!(rotate_towards(0.0, 1.0, 0.25), 0.25);
        assert_relative_eq!(rotate_towards(0.0, -1.0, 0.25), -0.25);
        assert_relative_eq!(rotate_towards(0.0, 0.1, 0.25), 0.1);
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::new(200.0, 100.0);
        assert_eq!(bounds.center(), Vec2::new(100.0, 50.0));
    }
}
