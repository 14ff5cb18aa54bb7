//! Player hit DTO

use super::{dto_tag, require_id, Dto, ValidationError};
use serde::{Deserialize, Serialize};

dto_tag!(
    /// `type` literal of [`HitDto`]
    HitTag => "hit"
);

/// Damage dealt to a player, as decided by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitDto {
    #[serde(rename = "type", default)]
    kind: HitTag,
    /// Player that was hit
    pub player_id: String,
    /// Damage dealt
    pub damage: u32,
    /// Player who fired, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shooter_id: Option<String>,
}

impl HitDto {
    /// Create a hit
    pub fn new(player_id: impl Into<String>, damage: u32) -> Self {
        Self {
            kind: HitTag::Tag,
            player_id: player_id.into(),
            damage,
            shooter_id: None,
        }
    }

    /// Builder pattern: Set the shooter
    pub fn with_shooter(mut self, shooter_id: impl Into<String>) -> Self {
        self.shooter_id = Some(shooter_id.into());
        self
    }

    /// Check the hit refers to a player
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(HitTag::LITERAL, &self.player_id)
    }
}

impl Dto for HitDto {
    fn type_tag(&self) -> &'static str {
        HitTag::LITERAL
    }
}
