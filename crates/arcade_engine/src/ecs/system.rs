//! System trait and implementations

use super::scheduler::SystemPhase;
use super::world::World;

/// System trait for processing entities and components
pub trait System {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Which phase this system belongs to
    fn phase(&self) -> SystemPhase;

    /// Run the system for one tick
    fn run(&mut self, world: &mut World, delta_time: f32);
}
