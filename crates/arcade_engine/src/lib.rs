//! # Arcade Engine
//!
//! A small 2D Entity-Component-System runtime for arcade games.
//!
//! ## Features
//!
//! - **ECS Architecture**: String-identified entities with a typed component map
//! - **Delegating Transform**: Spatial state lives on the render engine's handle
//! - **Ordered Systems**: Movement, bounds and render sync run in a fixed phase order
//! - **Collaborator Seams**: Render engine and random source are injected traits
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_engine::prelude::*;
//!
//! let mut world = World::new();
//! let mut renderer = HeadlessRenderer::new();
//!
//! let ship = world.create_entity(None);
//! let sprite = renderer.create_sprite(10.0, 20.0, "ship");
//! world.add_component(&ship, TransformComponent::new(sprite));
//! world.add_component(&ship, MovementComponent::drifting(Vec2::new(5.0, 0.0), 0.9));
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(Box::new(MovementSystem::new()));
//! scheduler.run_tick(&mut world, 1.0 / 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{
            components::{
                AnimationComponent, BoundsComponent, MovementComponent, OutOfBoundsAction,
                TransformComponent,
            },
            systems::{is_out_of_bounds, BoundsSystem, MovementSystem, RenderSyncSystem},
            Component, ComponentKind, EntityId, Query, Scheduler, System, SystemPhase, World,
        },
        foundation::math::{Bounds, Vec2},
        render::{HeadlessRenderer, RandomSource, RenderEngine, RenderHandle, StdRandom},
    };
}
