//! Movement component for entities that move in the 2D play area
//!
//! Two modes share the same data:
//! - **driven** (`can_move = true`): steered toward `target_rotation`, thrust sets
//!   velocity to `speed` along the heading
//! - **free-drifting** (`can_move = false`): never steered, only decelerated by drag

use crate::ecs::Component;
use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Component for entities that can move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementComponent {
    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Per-tick velocity multiplier (1.0 = no drag)
    pub drag: f32,

    /// Rotation the entity turns toward, in radians
    pub target_rotation: f32,

    /// Speed applied along the heading while thrusting
    pub speed: f32,

    /// Maximum turn rate in radians per second
    pub turn_speed: f32,

    /// Whether thrust is currently applied
    pub thrust: bool,

    /// Whether input-driven steering applies
    pub can_move: bool,
}

impl MovementComponent {
    /// Create an input-driven movement component
    pub fn driven(speed: f32, turn_speed: f32, drag: f32) -> Self {
        Self {
            velocity: Vec2::zeros(),
            drag: drag.clamp(0.0, 1.0),
            target_rotation: 0.0,
            speed,
            turn_speed,
            thrust: false,
            can_move: true,
        }
    }

    /// Create a free-drifting movement component with an initial velocity
    pub fn drifting(velocity: Vec2, drag: f32) -> Self {
        Self {
            velocity,
            drag: drag.clamp(0.0, 1.0),
            target_rotation: 0.0,
            speed: velocity.magnitude(),
            turn_speed: 0.0,
            thrust: false,
            can_move: false,
        }
    }

    /// Builder pattern: Set target rotation
    pub fn with_target_rotation(mut self, target_rotation: f32) -> Self {
        self.target_rotation = target_rotation;
        self
    }

    /// Steer toward a rotation, optionally thrusting
    ///
    /// Ignored for free-drifting entities.
    pub fn steer(&mut self, target_rotation: f32, thrust: bool) {
        if !self.can_move {
            return;
        }
        self.target_rotation = target_rotation;
        self.thrust = thrust;
    }

    /// Apply one tick of drag
    pub fn apply_drag(&mut self) {
        self.velocity *= self.drag;
    }

    /// Current speed
    pub fn current_speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Stop all movement
    pub fn stop(&mut self) {
        self.velocity = Vec2::zeros();
        self.thrust = false;
    }
}

impl Component for MovementComponent {}

impl Default for MovementComponent {
    fn default() -> Self {
        Self::drifting(Vec2::zeros(), 1.0)
    }
}
