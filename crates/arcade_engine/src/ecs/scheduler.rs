//! System Scheduling
//!
//! Systems run sequentially on the owning thread in a fixed phase order.
//! Within a phase, systems run in registration order.

use super::system::System;
use super::world::World;

/// System execution phases with explicit ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SystemPhase {
    /// Entity lifecycle management before simulation
    PreUpdate = 0,
    /// Game logic, movement integration
    Update = 1,
    /// Constraint checks such as bounds
    PostUpdate = 2,
    /// Pushing state to the render engine
    Render = 3,
}

/// Sequential system scheduler
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    tick: u64,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system to the scheduler
    pub fn add_system(&mut self, system: Box<dyn System>) {
        log::debug!("Registering system {} in {:?}", system.name(), system.phase());
        self.systems.push(system);
        // Stable sort keeps registration order within a phase
        self.systems.sort_by_key(|system| system.phase());
    }

    /// Names of the registered systems in execution order
    pub fn execution_order(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of ticks executed so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Execute all systems for one tick
    pub fn run_tick(&mut self, world: &mut World, delta_time: f32) {
        for system in &mut self.systems {
            system.run(world, delta_time);
        }
        self.tick += 1;
        log::trace!("Tick {} complete ({} entities)", self.tick, world.len());
    }
}
