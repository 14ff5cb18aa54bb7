//! # Movement System
//!
//! Integrates every entity with a transform and a movement component.
//! Driven entities turn toward their target rotation and thrust along their
//! heading; every entity then loses speed to drag and advances its position.
//! Results are written through the transform, i.e. onto the render handle.

use crate::ecs::components::{MovementComponent, TransformComponent};
use crate::ecs::{ComponentKind, System, SystemPhase, World};
use crate::foundation::math::{heading, rotate_towards};

/// System integrating velocity, steering and drag
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create a new movement system
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    fn run(&mut self, world: &mut World, delta_time: f32) {
        let kinds = [
            ComponentKind::of::<TransformComponent>(),
            ComponentKind::of::<MovementComponent>(),
        ];

        for entity in world.query_ids(&kinds) {
            let Some(rotation) = world
                .get_component::<TransformComponent>(&entity)
                .map(TransformComponent::rotation)
            else {
                continue;
            };
            let Some(movement) = world.get_component_mut::<MovementComponent>(&entity) else {
                continue;
            };

            let steered = if movement.can_move {
                let next = rotate_towards(
                    rotation,
                    movement.target_rotation,
                    movement.turn_speed * delta_time,
                );
                if movement.thrust {
                    movement.velocity = heading(next) * movement.speed;
                }
                Some(next)
            } else {
                None
            };
            movement.apply_drag();
            let velocity = movement.velocity;

            let Some(transform) = world.get_component_mut::<TransformComponent>(&entity) else {
                continue;
            };
            if let Some(rotation) = steered {
                transform.set_rotation(rotation);
            }
            let position = transform.position() + velocity * delta_time;
            transform.set_position(position);
            transform.set_velocity(velocity);
        }
    }
}
