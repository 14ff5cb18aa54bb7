//! Data transfer objects
//!
//! Plain payloads exchanged with the server. Every DTO serializes a `type`
//! literal; construction enforces each DTO's invariants so that no component
//! downstream has to re-check them.

/// Declare a single-valued enum used as a DTO's `type` field
///
/// Serializes as the literal and rejects any other value on decode. Missing
/// tags decode to the literal.
macro_rules! dto_tag {
    ($(#[$meta:meta])* $name:ident => $wire:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = $wire)]
            #[allow(missing_docs)]
            Tag,
        }

        impl $name {
            /// Wire literal of this tag
            pub const LITERAL: &'static str = $wire;
        }
    };
}

pub(crate) use dto_tag;

pub mod asteroid;
pub mod hit;
pub mod pickup;
pub mod player;
pub mod weapon;

pub use asteroid::{AsteroidDto, AsteroidHitDto, AsteroidInit, AsteroidSize, CauseOfDeath};
pub use hit::HitDto;
pub use pickup::{PickupDto, PickupKind, PickupType};
pub use player::{PlayerDto, UpgradeKind};
pub use weapon::{AmmoStats, AmmoType, Shot, WeaponDto};

use thiserror::Error;

/// Common interface of every DTO
pub trait Dto {
    /// The `type` literal carried on the wire
    fn type_tag(&self) -> &'static str;
}

/// Malformed DTO content, detected before any entity is created
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent
    #[error("{dto} is missing required field `{field}`")]
    MissingField {
        /// DTO type tag
        dto: &'static str,
        /// Wire name of the missing field
        field: &'static str,
    },

    /// A numeric field is NaN or infinite
    #[error("{dto} field `{field}` is not a finite number")]
    NotFinite {
        /// DTO type tag
        dto: &'static str,
        /// Wire name of the field
        field: &'static str,
    },

    /// The DTO has an empty identifier
    #[error("{dto} has an empty id")]
    EmptyId {
        /// DTO type tag
        dto: &'static str,
    },

    /// The id already belongs to a live entity
    #[error("{dto} id `{id}` is already taken by a live entity")]
    DuplicateId {
        /// DTO type tag
        dto: &'static str,
        /// The contested id
        id: String,
    },
}

/// Check that `value` is present and finite
pub(crate) fn require_coordinate(
    dto: &'static str,
    field: &'static str,
    value: Option<f32>,
) -> Result<f32, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField { dto, field }),
        Some(v) if !v.is_finite() => Err(ValidationError::NotFinite { dto, field }),
        Some(v) => Ok(v),
    }
}

/// Check that an identifier is non-empty
pub(crate) fn require_id(dto: &'static str, id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        Err(ValidationError::EmptyId { dto })
    } else {
        Ok(())
    }
}
