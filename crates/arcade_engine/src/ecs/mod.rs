//! Entity-Component-System implementation
//!
//! Provides the entity store, component kinds and the per-tick system runner.

pub mod component;
pub mod components;
pub mod entity;
pub mod query;
pub mod scheduler;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentKind};
pub use entity::EntityId;
pub use query::Query;
pub use scheduler::{Scheduler, SystemPhase};
pub use system::System;
pub use world::World;
