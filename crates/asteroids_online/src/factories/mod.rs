//! Entity factories
//!
//! Each factory turns one DTO into a fully assembled entity. Validation runs
//! before the first side effect, so a rejected DTO leaves neither an entity
//! nor a sprite behind.

pub mod asteroid;
pub mod pickup;
pub mod player;

pub use asteroid::create_asteroid;
pub use pickup::create_pickup;
pub use player::create_player;

use crate::config::GameConfig;
use crate::dto::{Dto, ValidationError};
use arcade_engine::prelude::{EntityId, RandomSource, RenderEngine, World};

/// Everything a factory touches while spawning
pub struct SpawnContext<'a> {
    /// Entity store
    pub world: &'a mut World,

    /// Sprite source
    pub renderer: &'a mut dyn RenderEngine,

    /// Random scalars
    pub rng: &'a mut dyn RandomSource,

    /// Game settings
    pub config: &'a GameConfig,
}

/// Entity id for a DTO, refusing ids that a live entity already holds
pub(crate) fn unclaimed_id(world: &World, dto: &impl Dto, id: &str) -> Result<EntityId, ValidationError> {
    let entity = EntityId::new(id);
    if world.contains(&entity) {
        return Err(ValidationError::DuplicateId {
            dto: dto.type_tag(),
            id: id.to_string(),
        });
    }
    Ok(entity)
}
