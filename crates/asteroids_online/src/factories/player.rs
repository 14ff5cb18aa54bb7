//! Player factory

use super::{unclaimed_id, SpawnContext};
use crate::components::{PlayerComponent, UpgradesComponent, WeaponComponent};
use crate::dto::{PlayerDto, ValidationError};
use arcade_engine::prelude::*;

/// Visual key of the ship controlled on this client
pub const PROTAGONIST_SHIP: &str = "ship";

/// Visual key of every other ship
pub const REMOTE_SHIP: &str = "ship-remote";

/// Spawn a player under its server id
///
/// The protagonist gets input-driven movement; remote players drift and are
/// positioned by server updates.
pub fn create_player(
    ctx: &mut SpawnContext<'_>,
    dto: &PlayerDto,
    is_local: bool,
) -> Result<EntityId, ValidationError> {
    let position = dto.validate()?;
    let entity = unclaimed_id(ctx.world, dto, &dto.id)?;
    let ship = &ctx.config.ship;

    let visual_key = if is_local { PROTAGONIST_SHIP } else { REMOTE_SHIP };
    let mut transform = TransformComponent::new(ctx.renderer.create_sprite(position.x, position.y, visual_key));
    transform.set_rotation(dto.rotation);

    let movement = if is_local {
        MovementComponent::driven(ship.speed, ship.turn_speed, ship.drag).with_target_rotation(dto.rotation)
    } else {
        MovementComponent::drifting(Vec2::zeros(), ship.drag)
    };

    let max_health = if dto.max_health == 0 { ship.max_health } else { dto.max_health };
    let mut player = PlayerComponent::new(dto.name.clone(), max_health, is_local);
    if dto.max_health != 0 {
        player.set_health(dto.health);
    }
    player.coins = dto.coins;

    let mut upgrades = UpgradesComponent::new(&ctx.config.upgrades);
    if let Some(levels) = &dto.upgrades {
        upgrades.sync_levels(levels);
    }

    ctx.world.create_entity(Some(entity.clone()));
    ctx.world.add_component(&entity, transform);
    ctx.world.add_component(&entity, movement);
    ctx.world.add_component(&entity, player);
    ctx.world.add_component(&entity, WeaponComponent::new(dto.weapon.clone().unwrap_or_default()));
    ctx.world.add_component(&entity, upgrades);

    log::info!(
        "Spawned {} player {} ({})",
        if is_local { "local" } else { "remote" },
        dto.name,
        entity
    );
    Ok(entity)
}
