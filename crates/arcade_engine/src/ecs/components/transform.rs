//! Transform component for the ECS system
//!
//! Unlike a plain data component, the transform does not store position or
//! rotation. It owns the render engine's handle and forwards every read and
//! write to it, so the handle stays the single source of truth.
//!
//! The handle lives exactly as long as the component: dropping a transform
//! that was taken out of the world with `remove_component` destroys it too.

use crate::ecs::Component;
use crate::foundation::math::Vec2;
use crate::render::RenderHandle;
use std::fmt;

/// ECS Transform component delegating to a render handle
pub struct TransformComponent {
    handle: Box<dyn RenderHandle>,
}

impl TransformComponent {
    /// Wrap a render handle
    pub fn new(handle: Box<dyn RenderHandle>) -> Self {
        Self { handle }
    }

    /// Horizontal position
    pub fn x(&self) -> f32 {
        self.handle.x()
    }

    /// Vertical position
    pub fn y(&self) -> f32 {
        self.handle.y()
    }

    /// Position as a vector
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.handle.x(), self.handle.y())
    }

    /// Set horizontal position
    pub fn set_x(&mut self, x: f32) {
        let y = self.handle.y();
        self.handle.set_position(x, y);
    }

    /// Set vertical position
    pub fn set_y(&mut self, y: f32) {
        let x = self.handle.x();
        self.handle.set_position(x, y);
    }

    /// Set position
    pub fn set_position(&mut self, position: Vec2) {
        self.handle.set_position(position.x, position.y);
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.handle.rotation()
    }

    /// Set rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.handle.set_rotation(rotation);
    }

    /// Velocity mirrored on the handle
    pub fn velocity(&self) -> Vec2 {
        self.handle.velocity()
    }

    /// Mirror velocity onto the handle
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.handle.set_velocity(velocity);
    }

    /// Play an animation on the underlying handle
    pub fn play_animation(&mut self, name: &str) {
        self.handle.play_animation(name);
    }

    /// Whether the handle is still present in the render engine
    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }
}

impl Component for TransformComponent {
    fn detach(&mut self) {
        if self.handle.is_active() {
            self.handle.destroy();
        }
    }
}

impl Drop for TransformComponent {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for TransformComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformComponent")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("rotation", &self.rotation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::render::{HeadlessRenderer, RenderEngine};

    #[test]
    fn test_reads_and_writes_go_through_handle() {
        let mut renderer = HeadlessRenderer::new();
        let mut transform = TransformComponent::new(renderer.create_sprite(1.0, 2.0, "ship"));

        assert_eq!(transform.position(), Vec2::new(1.0, 2.0));

        transform.set_x(5.0);
        transform.set_y(6.0);
        transform.set_rotation(0.5);

        let sprite = renderer.last_sprite().unwrap();
        assert_eq!((sprite.x, sprite.y, sprite.rotation), (5.0, 6.0, 0.5));
    }

    #[test]
    fn test_removing_entity_destroys_handle() {
        let mut renderer = HeadlessRenderer::new();
        let mut world = World::new();
        let id = world.create_entity(None);
        world.add_component(&id, TransformComponent::new(renderer.create_sprite(0.0, 0.0, "ship")));

        world.remove_entity(&id);
        world.remove_entity(&id);

        assert!(renderer.last_sprite().unwrap().destroyed);
        assert_eq!(renderer.live_count(), 0);
    }

    #[test]
    fn test_removed_transform_keeps_handle_until_dropped() {
        let mut renderer = HeadlessRenderer::new();
        let mut world = World::new();
        let id = world.create_entity(None);
        world.add_component(&id, TransformComponent::new(renderer.create_sprite(0.0, 0.0, "ship")));

        let transform = world.remove_component::<TransformComponent>(&id).unwrap();
        assert!(transform.is_active());
        assert_eq!(renderer.live_count(), 1);

        drop(transform);
        assert!(renderer.last_sprite().unwrap().destroyed);
        assert_eq!(renderer.live_count(), 0);
    }
}
