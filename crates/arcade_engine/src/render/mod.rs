//! Render-engine collaborator interfaces
//!
//! The engine never draws anything itself. Sprites, animation playback and
//! randomized scalars come from an external engine through these traits.

pub mod headless;
pub mod random;

pub use headless::{HeadlessRenderer, SpriteSnapshot};
pub use random::{RandomSource, StdRandom};

use crate::foundation::math::Vec2;

/// Engine-owned object representing an entity's visual and physical presence
///
/// The handle is the single source of truth for spatial state; components
/// read and write through it instead of keeping their own copy.
pub trait RenderHandle: Send + Sync {
    /// Horizontal position
    fn x(&self) -> f32;

    /// Vertical position
    fn y(&self) -> f32;

    /// Move the object
    fn set_position(&mut self, x: f32, y: f32);

    /// Rotation in radians
    fn rotation(&self) -> f32;

    /// Set rotation in radians
    fn set_rotation(&mut self, rotation: f32);

    /// Velocity in units per second
    fn velocity(&self) -> Vec2;

    /// Set velocity in units per second
    fn set_velocity(&mut self, velocity: Vec2);

    /// Start playing a named animation
    fn play_animation(&mut self, name: &str);

    /// Remove the object from the engine
    fn destroy(&mut self);

    /// Whether the object is still present in the engine
    fn is_active(&self) -> bool;
}

/// Factory side of the render engine
pub trait RenderEngine {
    /// Create a sprite-like object at `(x, y)` using the given visual key
    fn create_sprite(&mut self, x: f32, y: f32, visual_key: &str) -> Box<dyn RenderHandle>;
}
