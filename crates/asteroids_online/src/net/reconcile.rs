//! Server state reconciliation
//!
//! Applies decoded server events and request responses to the world. Every
//! mutation goes through the factories or the entities' own components.

use super::client::PendingRequest;
use crate::components::{AsteroidComponent, PickupComponent, PlayerComponent, UpgradesComponent, WeaponComponent};
use crate::dto::{AsteroidDto, HitDto, PickupDto, PickupKind, PlayerDto, ValidationError};
use crate::factories::{create_asteroid, create_pickup, create_player, SpawnContext};
use crate::protocol::{decode_response, EventName, ProtocolError, ResponseFailure, ServerEvent};
use arcade_engine::prelude::*;

/// Animation played on a ship that took damage
pub const HIT_ANIMATION: &str = "hit";

/// World access while reconciling
pub struct ReconcileContext<'a> {
    /// Factories' collaborators
    pub spawn: SpawnContext<'a>,

    /// Entity id of the protagonist, once known
    pub local_player: &'a mut Option<EntityId>,
}

/// Result of applying one response
#[derive(Debug)]
pub enum ResponseResult {
    /// Success payload applied
    Applied,

    /// Server refused the request; nothing changed
    Failed(ResponseFailure),

    /// Body could not be decoded; nothing changed
    Malformed(ProtocolError),
}

/// Apply a server event, returning the DTOs that failed validation
///
/// A rejected DTO only skips its own spawn; the rest of a batch still applies.
pub fn apply_event(ctx: &mut ReconcileContext<'_>, event: ServerEvent) -> Vec<ValidationError> {
    let mut rejected = Vec::new();
    let mut keep = |result: Result<(), ValidationError>| {
        if let Err(error) = result {
            log::warn!("Skipping invalid DTO: {}", error);
            rejected.push(error);
        }
    };

    match event {
        ServerEvent::PlayerJoined(dto) => {
            let is_local = is_local_id(ctx, &dto.id);
            keep(upsert_player(ctx, &dto, is_local));
        }
        ServerEvent::Protagonist(dto) => {
            *ctx.local_player = Some(EntityId::new(dto.id.as_str()));
            keep(upsert_player(ctx, &dto, true));
        }
        ServerEvent::Players(players) => {
            for dto in &players {
                let is_local = is_local_id(ctx, &dto.id);
                keep(upsert_player(ctx, dto, is_local));
            }
        }
        ServerEvent::PlayerQuit(dto) => remove_player(ctx, &dto),
        ServerEvent::PlayerHit(hit) => apply_hit(ctx, &hit),
        ServerEvent::Drop(pickup) => keep(create_pickup(&mut ctx.spawn, &pickup).map(drop)),
        ServerEvent::AsteroidCreated(dto) => keep(upsert_asteroid(ctx, &dto)),
        ServerEvent::AsteroidCoordinates(asteroids) => {
            for dto in &asteroids {
                keep(upsert_asteroid(ctx, dto));
            }
        }
        ServerEvent::AsteroidDestroyed(dto) => destroy_asteroid(ctx, &dto),
    }

    rejected
}

/// Apply the response to a pending request
pub fn apply_response(ctx: &mut ReconcileContext<'_>, pending: &PendingRequest, body: &str) -> ResponseResult {
    let outcome = match pending.event {
        EventName::PlayerPickup => decode_response::<PickupDto>(body).map(|response| {
            response
                .into_result()
                .map(|dto| claim_pickup(ctx, pending.target.as_ref(), &dto))
        }),
        EventName::AsteroidHit => decode_response::<AsteroidDto>(body).map(|response| {
            response
                .into_result()
                .map(|dto| sync_asteroid_health(ctx, pending.target.as_ref(), &dto))
        }),
        EventName::PlayerAuthenticate => decode_response::<PlayerDto>(body).map(|response| {
            response.into_result().map(|dto| {
                log::info!("Authenticated as {} ({})", dto.name, dto.id);
                *ctx.local_player = Some(EntityId::new(dto.id));
            })
        }),
        other => {
            log::warn!("Response to {} which expects none", other);
            return ResponseResult::Applied;
        }
    };

    match outcome {
        Ok(Ok(())) => ResponseResult::Applied,
        Ok(Err(failure)) => {
            log::info!("{} refused: {}", pending.event, failure);
            ResponseResult::Failed(failure)
        }
        Err(error) => {
            log::warn!("Malformed {} response: {}", pending.event, error);
            ResponseResult::Malformed(error)
        }
    }
}

fn is_local_id(ctx: &ReconcileContext<'_>, id: &str) -> bool {
    ctx.local_player.as_ref().is_some_and(|local| local.as_str() == id)
}

fn upsert_player(ctx: &mut ReconcileContext<'_>, dto: &PlayerDto, is_local: bool) -> Result<(), ValidationError> {
    let entity = EntityId::new(dto.id.as_str());
    let world = &mut *ctx.spawn.world;

    match world.get_component::<PlayerComponent>(&entity).map(|p| p.is_local) {
        Some(was_local) if was_local == is_local => {
            update_player(world, &entity, dto, is_local);
            Ok(())
        }
        Some(_) => {
            dto.validate()?;
            world.remove_entity(&entity);
            create_player(&mut ctx.spawn, dto, is_local).map(drop)
        }
        None => create_player(&mut ctx.spawn, dto, is_local).map(drop),
    }
}

fn update_player(world: &mut World, entity: &EntityId, dto: &PlayerDto, is_local: bool) {
    // The protagonist's pose is simulated locally
    if !is_local {
        if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
            if let (Some(x), Some(y)) = (dto.x, dto.y) {
                transform.set_position(Vec2::new(x, y));
            }
            if dto.rotation.is_finite() {
                transform.set_rotation(dto.rotation);
            }
        }
    }

    if let Some(player) = world.get_component_mut::<PlayerComponent>(entity) {
        if !dto.name.is_empty() {
            player.name.clone_from(&dto.name);
        }
        if dto.max_health > 0 {
            player.max_health = dto.max_health;
            player.set_health(dto.health);
        }
        player.coins = dto.coins;
    }
    if let Some(weapon) = &dto.weapon {
        world.add_component(entity, WeaponComponent::new(weapon.clone()));
    }
    if let Some(levels) = &dto.upgrades {
        if let Some(upgrades) = world.get_component_mut::<UpgradesComponent>(entity) {
            upgrades.sync_levels(levels);
        }
    }
}

fn remove_player(ctx: &mut ReconcileContext<'_>, dto: &PlayerDto) {
    let entity = EntityId::new(dto.id.as_str());
    if ctx.spawn.world.remove_entity(&entity) {
        log::info!("Player {} left", entity);
    }
    if ctx.local_player.as_ref() == Some(&entity) {
        *ctx.local_player = None;
    }
}

fn apply_hit(ctx: &mut ReconcileContext<'_>, hit: &HitDto) {
    let entity = EntityId::new(hit.player_id.as_str());
    let world = &mut *ctx.spawn.world;

    let Some(player) = world.get_component_mut::<PlayerComponent>(&entity) else {
        log::debug!("Hit for unknown player {}", entity);
        return;
    };
    player.damage(hit.damage);
    log::debug!("Player {} hit for {}, health {}", entity, hit.damage, player.health);

    if let Some(transform) = world.get_component_mut::<TransformComponent>(&entity) {
        transform.play_animation(HIT_ANIMATION);
    }
}

fn upsert_asteroid(ctx: &mut ReconcileContext<'_>, dto: &AsteroidDto) -> Result<(), ValidationError> {
    let entity = EntityId::new(dto.id.as_str());
    let world = &mut *ctx.spawn.world;

    if !world.has_component::<AsteroidComponent>(&entity) {
        return create_asteroid(&mut ctx.spawn, dto).map(drop);
    }

    dto.validate()?;
    if let Some(transform) = world.get_component_mut::<TransformComponent>(&entity) {
        transform.set_position(dto.position());
        transform.set_velocity(dto.velocity());
    }
    if let Some(movement) = world.get_component_mut::<MovementComponent>(&entity) {
        movement.velocity = dto.velocity();
    }
    if let Some(asteroid) = world.get_component_mut::<AsteroidComponent>(&entity) {
        asteroid.max_health = dto.max_health;
        asteroid.set_health(dto.health);
    }
    Ok(())
}

fn destroy_asteroid(ctx: &mut ReconcileContext<'_>, dto: &AsteroidDto) {
    let entity = EntityId::new(dto.id.as_str());
    let world = &mut *ctx.spawn.world;

    if let Some(animation) = dto.cause_of_death.destroy_animation() {
        if let Some(transform) = world.get_component_mut::<TransformComponent>(&entity) {
            transform.play_animation(animation);
        }
    }
    if world.remove_entity(&entity) {
        log::debug!("Asteroid {} destroyed ({:?})", entity, dto.cause_of_death);
    }
}

fn claim_pickup(ctx: &mut ReconcileContext<'_>, target: Option<&EntityId>, dto: &PickupDto) {
    let world = &mut *ctx.spawn.world;

    match ctx.local_player.as_ref() {
        Some(local) => apply_pickup(world, local, dto.kind),
        None => log::warn!("Pickup {} granted with no local player", dto.id),
    }

    let pickup = target.cloned().unwrap_or_else(|| EntityId::new(dto.id.as_str()));
    if world.has_component::<PickupComponent>(&pickup) {
        world.remove_entity(&pickup);
    }
}

fn apply_pickup(world: &mut World, player: &EntityId, kind: PickupKind) {
    match kind {
        PickupKind::Ammo { amount } => {
            if let Some(weapon) = world.get_component_mut::<WeaponComponent>(player) {
                let added = (0..amount).take_while(|_| weapon.weapon.add_ammo()).count();
                log::debug!("Added {} ammo packs, ammo {}", added, weapon.weapon.ammo());
            }
        }
        PickupKind::Health { amount } => {
            if let Some(state) = world.get_component_mut::<PlayerComponent>(player) {
                state.heal(amount);
            }
        }
        PickupKind::Coin { points } => {
            if let Some(state) = world.get_component_mut::<PlayerComponent>(player) {
                state.coins = state.coins.saturating_add(points);
            }
        }
    }
}

fn sync_asteroid_health(ctx: &mut ReconcileContext<'_>, target: Option<&EntityId>, dto: &AsteroidDto) {
    let entity = target.cloned().unwrap_or_else(|| EntityId::new(dto.id.as_str()));
    if let Some(asteroid) = ctx.spawn.world.get_component_mut::<AsteroidComponent>(&entity) {
        asteroid.set_health(dto.health);
    }
}
