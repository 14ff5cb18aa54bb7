//! Player DTO

use super::{dto_tag, require_coordinate, require_id, Dto, ValidationError, WeaponDto};
use arcade_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

dto_tag!(
    /// `type` literal of [`PlayerDto`]
    PlayerTag => "player"
);

/// Purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeKind {
    /// Ship speed
    Speed,
    /// Weapon damage
    Damage,
    /// Weapon fire rate
    FireRate,
    /// Hull capacity
    MaxHealth,
}

impl UpgradeKind {
    /// Every upgrade kind
    pub const ALL: [Self; 4] = [Self::Speed, Self::Damage, Self::FireRate, Self::MaxHealth];
}

/// Player state as seen by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    #[serde(rename = "type", default)]
    kind: PlayerTag,
    /// Player id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Horizontal position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Vertical position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Heading in radians
    #[serde(default)]
    pub rotation: f32,
    /// Current health
    #[serde(default)]
    pub health: u32,
    /// Maximum health
    #[serde(default)]
    pub max_health: u32,
    /// Coins held
    #[serde(default)]
    pub coins: u32,
    /// Equipped weapon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponDto>,
    /// Upgrade levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrades: Option<BTreeMap<UpgradeKind, u8>>,
}

impl PlayerDto {
    /// Player at full health with no coins
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_health: u32) -> Self {
        Self {
            kind: PlayerTag::Tag,
            id: id.into(),
            name: name.into(),
            x: None,
            y: None,
            rotation: 0.0,
            health: max_health,
            max_health,
            coins: 0,
            weapon: None,
            upgrades: None,
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set weapon
    pub fn with_weapon(mut self, weapon: WeaponDto) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Check every field needed to spawn the player, returning its position
    pub fn validate(&self) -> Result<Vec2, ValidationError> {
        require_id(PlayerTag::LITERAL, &self.id)?;
        let x = require_coordinate(PlayerTag::LITERAL, "x", self.x)?;
        let y = require_coordinate(PlayerTag::LITERAL, "y", self.y)?;
        if !self.rotation.is_finite() {
            return Err(ValidationError::NotFinite {
                dto: PlayerTag::LITERAL,
                field: "rotation",
            });
        }
        Ok(Vec2::new(x, y))
    }
}

impl Dto for PlayerDto {
    fn type_tag(&self) -> &'static str {
        PlayerTag::LITERAL
    }
}
