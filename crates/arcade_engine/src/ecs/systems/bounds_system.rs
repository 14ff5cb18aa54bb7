//! # Bounds System
//!
//! Reaps or wraps entities that escape the play area. The threshold is a
//! dead-zone margin beyond the nominal area before an entity counts as escaped.

use crate::ecs::components::{BoundsComponent, OutOfBoundsAction, TransformComponent};
use crate::ecs::{ComponentKind, System, SystemPhase, World};
use crate::foundation::math::{Bounds, Vec2};

/// Check whether `point` lies outside `bounds` grown by `threshold` on every side
pub fn is_out_of_bounds(point: Vec2, bounds: Bounds, threshold: f32) -> bool {
    point.x < -threshold
        || point.x > bounds.width + threshold
        || point.y < -threshold
        || point.y > bounds.height + threshold
}

/// Teleport an escaped point to the opposite edge
fn wrap_point(point: Vec2, bounds: Bounds, threshold: f32) -> Vec2 {
    let wrap = |value: f32, extent: f32| {
        if value < -threshold {
            extent + threshold
        } else if value > extent + threshold {
            -threshold
        } else {
            value
        }
    };
    Vec2::new(wrap(point.x, bounds.width), wrap(point.y, bounds.height))
}

/// System applying each entity's out-of-bounds action
#[derive(Debug, Clone)]
pub struct BoundsSystem {
    bounds: Bounds,
    threshold: f32,
}

impl BoundsSystem {
    /// Create a bounds system for the given play area and dead-zone margin
    pub fn new(bounds: Bounds, threshold: f32) -> Self {
        Self { bounds, threshold: threshold.max(0.0) }
    }

    /// Play area checked by this system
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl System for BoundsSystem {
    fn name(&self) -> &'static str {
        "bounds"
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::PostUpdate
    }

    fn run(&mut self, world: &mut World, _delta_time: f32) {
        let kinds = [
            ComponentKind::of::<TransformComponent>(),
            ComponentKind::of::<BoundsComponent>(),
        ];
        let mut escaped = Vec::new();

        for entity in world.query_ids(&kinds) {
            let Some(action) = world.get_component::<BoundsComponent>(&entity).map(|b| b.action) else {
                continue;
            };
            let Some(transform) = world.get_component_mut::<TransformComponent>(&entity) else {
                continue;
            };

            let position = transform.position();
            if !is_out_of_bounds(position, self.bounds, self.threshold) {
                continue;
            }

            match action {
                OutOfBoundsAction::Despawn => escaped.push(entity),
                OutOfBoundsAction::Wrap => {
                    transform.set_position(wrap_point(position, self.bounds, self.threshold));
                }
            }
        }

        for entity in escaped {
            log::debug!("Reaping out-of-bounds entity {}", entity);
            world.remove_entity(&entity);
        }
    }
}
