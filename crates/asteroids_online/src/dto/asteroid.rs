//! Asteroid DTOs

use super::{dto_tag, require_coordinate, require_id, Dto, ValidationError};
use arcade_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

dto_tag!(
    /// `type` literal of [`AsteroidDto`]
    AsteroidTag => "asteroid"
);

dto_tag!(
    /// `type` literal of [`AsteroidHitDto`]
    AsteroidHitTag => "asteroid_hit"
);

/// Asteroid size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AsteroidSize {
    /// Small asteroid
    Small,

    /// Medium asteroid
    Medium,

    /// Large asteroid
    Large,
}

impl AsteroidSize {
    /// Visual key used when creating the sprite
    pub const fn visual_key(self) -> &'static str {
        match self {
            Self::Small => "asteroid-small",
            Self::Medium => "asteroid-medium",
            Self::Large => "asteroid-large",
        }
    }

    /// Get the scale factor for this size
    pub const fn scale_factor(self) -> f32 {
        match self {
            Self::Large => 2.0,
            Self::Medium => 1.5,
            Self::Small => 1.0,
        }
    }
}

/// Why an asteroid left play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CauseOfDeath {
    /// Still alive
    #[default]
    None,

    /// Destroyed by weapon fire
    Hit,

    /// Destroyed by colliding with a ship
    Collision,

    /// Drifted out of the play area
    OutOfBounds,
}

impl CauseOfDeath {
    /// Animation played when the asteroid is destroyed
    pub const fn destroy_animation(self) -> Option<&'static str> {
        match self {
            Self::Hit | Self::Collision => Some("explode"),
            Self::None | Self::OutOfBounds => None,
        }
    }
}

/// Construction parameters for an [`AsteroidDto`]
///
/// Also the wire shape on decode: `id` and `health` may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidInit {
    // Only checked on decode
    #[allow(dead_code)]
    #[serde(rename = "type", default)]
    kind: AsteroidTag,
    /// Server id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
    /// Maximum health
    pub max_health: u32,
    /// Current health; defaults to `max_health`
    #[serde(default)]
    pub health: Option<u32>,
    /// Size category
    pub size: AsteroidSize,
    /// Horizontal velocity
    #[serde(default)]
    pub dx: f32,
    /// Vertical velocity
    #[serde(default)]
    pub dy: f32,
    /// Why the asteroid left play, if it did
    #[serde(default)]
    pub cause_of_death: CauseOfDeath,
}

impl AsteroidInit {
    /// Parameters with no id, full health and no cause of death
    pub fn new(x: f32, y: f32, max_health: u32, size: AsteroidSize) -> Self {
        Self {
            kind: AsteroidTag::Tag,
            id: None,
            x,
            y,
            max_health,
            health: None,
            size,
            dx: 0.0,
            dy: 0.0,
            cause_of_death: CauseOfDeath::None,
        }
    }

    /// Builder pattern: Set id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder pattern: Set velocity
    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Builder pattern: Set current health
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    /// Builder pattern: Set cause of death
    pub fn with_cause_of_death(mut self, cause: CauseOfDeath) -> Self {
        self.cause_of_death = cause;
        self
    }
}

/// Authoritative asteroid state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AsteroidInit")]
pub struct AsteroidDto {
    #[serde(rename = "type")]
    kind: AsteroidTag,
    /// Asteroid id
    pub id: String,
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
    /// Maximum health
    pub max_health: u32,
    /// Current health, never above `max_health`
    pub health: u32,
    /// Size category
    pub size: AsteroidSize,
    /// Horizontal velocity
    pub dx: f32,
    /// Vertical velocity
    pub dy: f32,
    /// Why the asteroid left play, if it did
    pub cause_of_death: CauseOfDeath,
}

impl AsteroidDto {
    /// Build an asteroid, generating an id and defaulting health to max health
    pub fn new(init: AsteroidInit) -> Self {
        let id = init
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let health = init.health.unwrap_or(init.max_health).min(init.max_health);

        Self {
            kind: AsteroidTag::Tag,
            id,
            x: init.x,
            y: init.y,
            max_health: init.max_health,
            health,
            size: init.size,
            dx: init.dx,
            dy: init.dy,
            cause_of_death: init.cause_of_death,
        }
    }

    /// Position as a vector
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Velocity as a vector
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// Check every field needed to spawn the asteroid
    pub fn validate(&self) -> Result<(), ValidationError> {
        let tag = AsteroidTag::LITERAL;
        require_id(tag, &self.id)?;
        require_coordinate(tag, "x", Some(self.x))?;
        require_coordinate(tag, "y", Some(self.y))?;
        require_coordinate(tag, "dx", Some(self.dx))?;
        require_coordinate(tag, "dy", Some(self.dy))?;
        Ok(())
    }
}

impl From<AsteroidInit> for AsteroidDto {
    fn from(init: AsteroidInit) -> Self {
        Self::new(init)
    }
}

impl Dto for AsteroidDto {
    fn type_tag(&self) -> &'static str {
        AsteroidTag::LITERAL
    }
}

/// Report of damage dealt to an asteroid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidHitDto {
    #[serde(rename = "type", default)]
    kind: AsteroidHitTag,
    /// Asteroid that was hit
    pub asteroid_id: String,
    /// Damage dealt
    pub damage: u32,
    /// Player who fired, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

impl AsteroidHitDto {
    /// Create a hit report
    pub fn new(asteroid_id: impl Into<String>, damage: u32, player_id: Option<String>) -> Self {
        Self {
            kind: AsteroidHitTag::Tag,
            asteroid_id: asteroid_id.into(),
            damage,
            player_id,
        }
    }

    /// Check the report refers to an asteroid
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(AsteroidHitTag::LITERAL, &self.asteroid_id)
    }
}

impl Dto for AsteroidHitDto {
    fn type_tag(&self) -> &'static str {
        AsteroidHitTag::LITERAL
    }
}
