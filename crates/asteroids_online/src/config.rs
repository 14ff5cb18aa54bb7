//! Game configuration
//!
//! Every section has defaults, so a partial file only overrides what it names.

use crate::dto::UpgradeKind;
use arcade_engine::config::Config;
use arcade_engine::foundation::math::Bounds;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play area settings
    pub world: WorldConfig,

    /// Ship movement settings
    pub ship: ShipConfig,

    /// Pickup launch settings
    pub pickups: PickupConfig,

    /// Upgrade level caps
    pub upgrades: UpgradeCaps,

    /// Network sync settings
    pub network: NetworkConfig,
}

impl Config for GameConfig {}

/// Play area configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Size of the play area
    pub bounds: Bounds,

    /// Distance past the edge before an entity counts as out of bounds
    pub out_of_bounds_threshold: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            out_of_bounds_threshold: 50.0,
        }
    }
}

/// Ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Speed while thrusting
    pub speed: f32,

    /// Turn rate in radians per second
    pub turn_speed: f32,

    /// Per-tick velocity multiplier
    pub drag: f32,

    /// Health of a fresh ship
    pub max_health: u32,

    /// Extra speed per speed upgrade level
    pub speed_per_upgrade: f32,

    /// Extra max health per max health upgrade level
    pub health_per_upgrade: u32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: 300.0,
            turn_speed: 3.0,
            drag: 0.98,
            max_health: 100,
            speed_per_upgrade: 25.0,
            health_per_upgrade: 20,
        }
    }
}

/// Pickup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Slowest launch speed
    pub launch_speed_min: f32,

    /// Fastest launch speed
    pub launch_speed_max: f32,

    /// Per-tick velocity multiplier
    pub drag: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            launch_speed_min: 40.0,
            launch_speed_max: 120.0,
            drag: 0.95,
        }
    }
}

/// Maximum level of every upgrade kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeCaps {
    /// Speed cap
    pub speed: u8,

    /// Damage cap
    pub damage: u8,

    /// Fire rate cap
    pub fire_rate: u8,

    /// Max health cap
    pub max_health: u8,

    /// Coins charged per level bought
    pub cost: u32,
}

impl UpgradeCaps {
    /// Cap of `kind`
    pub const fn cap(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Damage => self.damage,
            UpgradeKind::FireRate => self.fire_rate,
            UpgradeKind::MaxHealth => self.max_health,
        }
    }
}

impl Default for UpgradeCaps {
    fn default() -> Self {
        Self {
            speed: 5,
            damage: 5,
            fire_rate: 3,
            max_health: 3,
            cost: 10,
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Ticks between two `player:coordinates` emissions
    pub coordinates_interval_ticks: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            coordinates_interval_ticks: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let path = std::env::temp_dir().join("asteroids_online_partial_config_test.toml");
        std::fs::write(&path, "[pickups]\ndrag = 0.5\n\n[network]\ncoordinates_interval_ticks = 10\n").unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.pickups.drag, 0.5);
        assert_eq!(config.pickups.launch_speed_max, PickupConfig::default().launch_speed_max);
        assert_eq!(config.network.coordinates_interval_ticks, 10);
        assert_eq!(config.world, WorldConfig::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_reload_ron() {
        let path = std::env::temp_dir().join("asteroids_online_config_test.ron");
        let mut config = GameConfig::default();
        config.upgrades.speed = 9;

        config.save_to_file(&path).unwrap();
        assert_eq!(GameConfig::load_from_file(&path).unwrap(), config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_caps_per_kind() {
        let caps = UpgradeCaps::default();
        assert_eq!(caps.cap(UpgradeKind::FireRate), 3);
        assert_eq!(caps.cap(UpgradeKind::Speed), 5);
    }
}
