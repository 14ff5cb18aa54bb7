//! Weapon DTO and its ammunition state machine
//!
//! Every ammo type has fixed stats. The mutable part is the round count, which
//! is clamped to `[0, max_ammo]` on every write, including decode.

use super::{dto_tag, Dto};
use serde::{Deserialize, Serialize};

dto_tag!(
    /// `type` literal of [`WeaponDto`]
    WeaponTag => "weapon"
);

/// Ammunition types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmmoType {
    /// Fast, cheap rounds
    #[default]
    Bullet,

    /// Slow, heavy rounds
    Rocket,
}

/// Fixed stats of an ammo type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmoStats {
    /// Capacity
    pub max_ammo: u32,
    /// Base projectile speed
    pub speed: u32,
    /// Damage per round
    pub damage: u32,
    /// Rounds granted when switching to this type
    pub allotment: u32,
    /// Rounds granted per ammo pack
    pub increment: u32,
}

impl AmmoType {
    /// Stats of this ammo type
    pub const fn stats(self) -> AmmoStats {
        match self {
            Self::Bullet => AmmoStats {
                max_ammo: 100,
                speed: 600,
                damage: 1,
                allotment: 50,
                increment: 20,
            },
            Self::Rocket => AmmoStats {
                max_ammo: 10,
                speed: 350,
                damage: 5,
                allotment: 3,
                increment: 2,
            },
        }
    }
}

/// A fired round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    /// Ammo type fired
    pub ammo_type: AmmoType,
    /// Projectile speed
    pub speed: u32,
    /// Damage dealt on hit
    pub damage: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeaponWire {
    #[serde(rename = "type", default)]
    _kind: WeaponTag,
    #[serde(default)]
    ammo_type: AmmoType,
    // Any JSON number, including ones past the i64 range
    #[serde(default)]
    ammo: Option<f64>,
}

impl From<WeaponWire> for WeaponDto {
    #[allow(clippy::cast_possible_truncation)]
    fn from(wire: WeaponWire) -> Self {
        let mut weapon = WeaponDto::new(wire.ammo_type);
        if let Some(ammo) = wire.ammo {
            // Float to int casts saturate
            weapon.set_ammo(ammo as i64);
        }
        weapon
    }
}

/// Weapon state
///
/// `max_ammo`, `speed` and `damage` are derived from the ammo type and only
/// change together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WeaponWire")]
pub struct WeaponDto {
    #[serde(rename = "type")]
    kind: WeaponTag,
    ammo_type: AmmoType,
    ammo: u32,
    max_ammo: u32,
    speed: u32,
    damage: u32,
}

impl WeaponDto {
    /// Weapon loaded with the default allotment of `ammo_type`
    pub fn new(ammo_type: AmmoType) -> Self {
        let stats = ammo_type.stats();
        Self {
            kind: WeaponTag::Tag,
            ammo_type,
            ammo: stats.allotment,
            max_ammo: stats.max_ammo,
            speed: stats.speed,
            damage: stats.damage,
        }
    }

    /// Current ammo type
    pub fn ammo_type(&self) -> AmmoType {
        self.ammo_type
    }

    /// Rounds left
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Capacity for the current ammo type
    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    /// Projectile speed for the current ammo type
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Damage per round for the current ammo type
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Whether no rounds are left
    pub fn is_empty(&self) -> bool {
        self.ammo == 0
    }

    /// Set the round count, clamped to `[0, max_ammo]`
    pub fn set_ammo(&mut self, ammo: i64) {
        self.ammo = ammo.clamp(0, i64::from(self.max_ammo)) as u32;
    }

    /// Add one ammo pack
    ///
    /// Returns false, with no change, when already at capacity.
    pub fn add_ammo(&mut self) -> bool {
        if self.ammo >= self.max_ammo {
            return false;
        }
        let increment = self.ammo_type.stats().increment;
        self.set_ammo(i64::from(self.ammo) + i64::from(increment));
        true
    }

    /// Switch to another ammo type, resetting to its default allotment
    pub fn switch_ammo_type(&mut self, ammo_type: AmmoType) {
        *self = Self::new(ammo_type);
    }

    /// Consume one round
    pub fn fire(&mut self) -> Option<Shot> {
        if self.is_empty() {
            return None;
        }
        self.ammo -= 1;
        Some(Shot {
            ammo_type: self.ammo_type,
            speed: self.speed,
            damage: self.damage,
        })
    }
}

impl Default for WeaponDto {
    fn default() -> Self {
        Self::new(AmmoType::default())
    }
}

impl Dto for WeaponDto {
    fn type_tag(&self) -> &'static str {
        WeaponTag::LITERAL
    }
}
