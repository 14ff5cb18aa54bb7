//! Game-specific components

mod upgrades;

pub use upgrades::UpgradesComponent;

use crate::dto::{AsteroidSize, PickupType, WeaponDto};
use arcade_engine::prelude::Component;

/// Item waiting to be claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupComponent {
    /// Pickup category
    pub kind: PickupType,

    /// Normalized value (amount or points)
    pub value: u32,
}

impl Component for PickupComponent {}

/// Equipped weapon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaponComponent {
    /// Weapon state
    pub weapon: WeaponDto,
}

impl WeaponComponent {
    /// Wrap a weapon
    pub fn new(weapon: WeaponDto) -> Self {
        Self { weapon }
    }
}

impl Component for WeaponComponent {}

/// Player state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerComponent {
    /// Display name
    pub name: String,

    /// Current health
    pub health: u32,

    /// Maximum health
    pub max_health: u32,

    /// Coins held
    pub coins: u32,

    /// Whether this is the protagonist controlled on this client
    pub is_local: bool,
}

impl PlayerComponent {
    /// Create a player at full health
    pub fn new(name: impl Into<String>, max_health: u32, is_local: bool) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            coins: 0,
            is_local,
        }
    }

    /// Take damage
    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Heal, capped at max health
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Set health, capped at max health
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Check if dead
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl Component for PlayerComponent {}

/// Asteroid state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsteroidComponent {
    /// Size category
    pub size: AsteroidSize,

    /// Current health
    pub health: u32,

    /// Maximum health
    pub max_health: u32,
}

impl AsteroidComponent {
    /// Create an asteroid component
    pub fn new(size: AsteroidSize, health: u32, max_health: u32) -> Self {
        Self {
            size,
            health: health.min(max_health),
            max_health,
        }
    }

    /// Set health, capped at max health
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }
}

impl Component for AsteroidComponent {}
