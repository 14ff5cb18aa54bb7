//! Pickup factory

use super::{unclaimed_id, SpawnContext};
use crate::components::PickupComponent;
use crate::dto::{PickupDto, ValidationError};
use arcade_engine::foundation::math::{heading, Vec2};
use arcade_engine::prelude::*;

/// Spawn a pickup dropped at its DTO position
///
/// Non-currency pickups are launched in a random direction at a random speed
/// from the configured range; coins stay put.
pub fn create_pickup(ctx: &mut SpawnContext<'_>, dto: &PickupDto) -> Result<EntityId, ValidationError> {
    let position = dto.validate()?;
    let entity = unclaimed_id(ctx.world, dto, &dto.id)?;
    let kind = dto.pickup_type();

    let (angle, speed) = if kind.is_currency() {
        (0.0, 0.0)
    } else {
        let settings = &ctx.config.pickups;
        let angle = ctx.rng.angle_uniform();
        let speed = ctx.rng.uniform(settings.launch_speed_min, settings.launch_speed_max);
        (angle, speed)
    };
    let velocity = if speed > 0.0 { heading(angle) * speed } else { Vec2::zeros() };

    let handle = ctx.renderer.create_sprite(position.x, position.y, kind.visual_key());
    let mut transform = TransformComponent::new(handle);
    transform.set_velocity(velocity);

    ctx.world.create_entity(Some(entity.clone()));
    ctx.world.add_component(&entity, transform);
    ctx.world.add_component(
        &entity,
        MovementComponent::drifting(velocity, ctx.config.pickups.drag).with_target_rotation(angle),
    );
    ctx.world.add_component(
        &entity,
        PickupComponent {
            kind,
            value: dto.value(),
        },
    );
    ctx.world.add_component(&entity, BoundsComponent::despawn());
    ctx.world.add_component(&entity, AnimationComponent::playing(kind.idle_animation()));

    log::debug!("Spawned {} pickup {} at ({}, {})", kind.literal(), entity, position.x, position.y);
    Ok(entity)
}
