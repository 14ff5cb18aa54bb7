//! # Render Sync System
//!
//! Last system of the tick. Hands queued animations to the render engine and
//! reaps entities whose render handle the engine has already destroyed.

use crate::ecs::components::{AnimationComponent, TransformComponent};
use crate::ecs::{ComponentKind, System, SystemPhase, World};

/// System pushing per-tick render requests to the engine
#[derive(Debug, Default)]
pub struct RenderSyncSystem;

impl RenderSyncSystem {
    /// Create a new render sync system
    pub fn new() -> Self {
        Self
    }
}

impl System for RenderSyncSystem {
    fn name(&self) -> &'static str {
        "render_sync"
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Render
    }

    fn run(&mut self, world: &mut World, _delta_time: f32) {
        let animated = [
            ComponentKind::of::<TransformComponent>(),
            ComponentKind::of::<AnimationComponent>(),
        ];
        for entity in world.query_ids(&animated) {
            let requests = world
                .get_component_mut::<AnimationComponent>(&entity)
                .map(AnimationComponent::drain)
                .unwrap_or_default();
            if let Some(transform) = world.get_component_mut::<TransformComponent>(&entity) {
                for name in &requests {
                    transform.play_animation(name);
                }
            }
        }

        let orphaned: Vec<_> = world
            .query(&[ComponentKind::of::<TransformComponent>()])
            .filter(|entity| {
                world
                    .get_component::<TransformComponent>(entity)
                    .is_some_and(|transform| !transform.is_active())
            })
            .cloned()
            .collect();
        for entity in orphaned {
            log::debug!("Render handle of {} is gone, removing entity", entity);
            world.remove_entity(&entity);
        }
    }
}
