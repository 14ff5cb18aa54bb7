//! Bounds component marking entities that must stay inside the play area

use crate::ecs::Component;
use serde::{Deserialize, Serialize};

/// What happens to an entity that escapes the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutOfBoundsAction {
    /// Remove the entity from the world
    Despawn,
    /// Teleport the entity to the opposite edge
    Wrap,
}

/// Component opting an entity into bounds checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsComponent {
    /// Action applied once the entity is out of bounds
    pub action: OutOfBoundsAction,
}

impl BoundsComponent {
    /// Reap the entity when it leaves the play area
    pub const fn despawn() -> Self {
        Self { action: OutOfBoundsAction::Despawn }
    }

    /// Wrap the entity around the play area
    pub const fn wrap() -> Self {
        Self { action: OutOfBoundsAction::Wrap }
    }
}

impl Component for BoundsComponent {}
