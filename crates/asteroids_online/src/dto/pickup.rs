//! Pickup DTO
//!
//! The `type` field selects the pickup category. Coins carry `points`, every
//! other category carries `amount`; [`PickupDto::value`] normalizes both.

use super::{require_coordinate, require_id, Dto, ValidationError};
use arcade_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Pickup category without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupType {
    /// Ammunition refill
    Ammo,
    /// Health refill
    Health,
    /// Currency
    Coin,
}

impl PickupType {
    /// Wire literal of this category
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Ammo => "AMMO",
            Self::Health => "HEALTH",
            Self::Coin => "COIN",
        }
    }

    /// Visual key used when creating the sprite
    pub const fn visual_key(self) -> &'static str {
        match self {
            Self::Ammo => "pickup-ammo",
            Self::Health => "pickup-health",
            Self::Coin => "pickup-coin",
        }
    }

    /// Idle animation played once the sprite exists
    pub const fn idle_animation(self) -> &'static str {
        match self {
            Self::Ammo | Self::Health => "pulse",
            Self::Coin => "spin",
        }
    }

    /// Whether this pickup is currency (never launched)
    pub const fn is_currency(self) -> bool {
        matches!(self, Self::Coin)
    }
}

/// Pickup category with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupKind {
    /// Ammunition packs
    Ammo {
        /// Number of packs
        amount: u32,
    },
    /// Health points
    Health {
        /// Health restored
        amount: u32,
    },
    /// Currency
    Coin {
        /// Coins awarded
        points: u32,
    },
}

impl PickupKind {
    /// Category with its normalized value
    pub const fn with_value(pickup_type: PickupType, value: u32) -> Self {
        match pickup_type {
            PickupType::Ammo => Self::Ammo { amount: value },
            PickupType::Health => Self::Health { amount: value },
            PickupType::Coin => Self::Coin { points: value },
        }
    }

    /// Category without payload
    pub const fn pickup_type(self) -> PickupType {
        match self {
            Self::Ammo { .. } => PickupType::Ammo,
            Self::Health { .. } => PickupType::Health,
            Self::Coin { .. } => PickupType::Coin,
        }
    }

    /// Normalized value: `points` for coins, `amount` otherwise
    pub const fn value(self) -> u32 {
        match self {
            Self::Ammo { amount } | Self::Health { amount } => amount,
            Self::Coin { points } => points,
        }
    }
}

/// Item dropped into the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDto {
    /// Pickup id
    pub id: String,
    /// Horizontal position, required to spawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Vertical position, required to spawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Category and payload
    #[serde(flatten)]
    pub kind: PickupKind,
}

impl PickupDto {
    /// Pickup at a position
    pub fn new(id: impl Into<String>, x: f32, y: f32, kind: PickupKind) -> Self {
        Self {
            id: id.into(),
            x: Some(x),
            y: Some(y),
            kind,
        }
    }

    /// Ammunition pickup
    pub fn ammo(id: impl Into<String>, x: f32, y: f32, amount: u32) -> Self {
        Self::new(id, x, y, PickupKind::Ammo { amount })
    }

    /// Health pickup
    pub fn health(id: impl Into<String>, x: f32, y: f32, amount: u32) -> Self {
        Self::new(id, x, y, PickupKind::Health { amount })
    }

    /// Coin pickup
    pub fn coin(id: impl Into<String>, x: f32, y: f32, points: u32) -> Self {
        Self::new(id, x, y, PickupKind::Coin { points })
    }

    /// Category without payload
    pub fn pickup_type(&self) -> PickupType {
        self.kind.pickup_type()
    }

    /// Normalized value
    pub fn value(&self) -> u32 {
        self.kind.value()
    }

    /// Check every field needed to spawn the pickup, returning its position
    pub fn validate(&self) -> Result<Vec2, ValidationError> {
        let tag = self.pickup_type().literal();
        require_id(tag, &self.id)?;
        let x = require_coordinate(tag, "x", self.x)?;
        let y = require_coordinate(tag, "y", self.y)?;
        Ok(Vec2::new(x, y))
    }
}

impl Dto for PickupDto {
    fn type_tag(&self) -> &'static str {
        self.pickup_type().literal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_normalized() {
        assert_eq!(PickupDto::ammo("p1", 0.0, 0.0, 2).value(), 2);
        assert_eq!(PickupDto::health("p2", 0.0, 0.0, 25).value(), 25);
        assert_eq!(PickupDto::coin("p3", 0.0, 0.0, 10).value(), 10);
    }

    #[test]
    fn test_decode_by_type_tag() {
        let coin: PickupDto =
            serde_json::from_str(r#"{"id":"c1","x":1,"y":2,"type":"COIN","points":5}"#).unwrap();
        assert_eq!(coin.kind, PickupKind::Coin { points: 5 });

        let ammo: PickupDto =
            serde_json::from_str(r#"{"id":"p1","x":10,"y":20,"type":"AMMO","amount":2}"#).unwrap();
        assert_eq!(ammo.pickup_type(), PickupType::Ammo);
        assert_eq!(ammo.validate().unwrap(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_coin_requires_points_not_amount() {
        let result = serde_json::from_str::<PickupDto>(r#"{"id":"c1","x":1,"y":2,"type":"COIN","amount":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_coordinates_fail_validation() {
        let dto: PickupDto =
            serde_json::from_str(r#"{"id":"p1","y":20,"type":"AMMO","amount":2}"#).unwrap();
        assert_eq!(
            dto.validate(),
            Err(ValidationError::MissingField { dto: "AMMO", field: "x" })
        );
    }

    #[test]
    fn test_non_finite_coordinates_fail_validation() {
        let dto = PickupDto::health("h1", f32::NAN, 0.0, 5);
        assert!(matches!(dto.validate(), Err(ValidationError::NotFinite { field: "x", .. })));
    }

    #[test]
    fn test_encode_flattens_kind() {
        let value = serde_json::to_value(PickupDto::coin("c9", 3.0, 4.0, 7)).unwrap();
        assert_eq!(value["type"], "COIN");
        assert_eq!(value["points"], 7);
        assert_eq!(value["id"], "c9");
    }
}
