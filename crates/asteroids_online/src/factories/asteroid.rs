//! Asteroid factory

use super::{unclaimed_id, SpawnContext};
use crate::components::AsteroidComponent;
use crate::dto::{AsteroidDto, ValidationError};
use arcade_engine::prelude::*;

/// Spawn an asteroid under its server id
pub fn create_asteroid(ctx: &mut SpawnContext<'_>, dto: &AsteroidDto) -> Result<EntityId, ValidationError> {
    dto.validate()?;
    let entity = unclaimed_id(ctx.world, dto, &dto.id)?;

    let handle = ctx.renderer.create_sprite(dto.x, dto.y, dto.size.visual_key());
    let mut transform = TransformComponent::new(handle);
    transform.set_velocity(dto.velocity());

    ctx.world.create_entity(Some(entity.clone()));
    ctx.world.add_component(&entity, transform);
    ctx.world.add_component(&entity, MovementComponent::drifting(dto.velocity(), 1.0));
    ctx.world.add_component(
        &entity,
        AsteroidComponent::new(dto.size, dto.health, dto.max_health),
    );
    ctx.world.add_component(&entity, BoundsComponent::wrap());

    log::debug!("Spawned {:?} asteroid {}", dto.size, entity);
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::dto::{AsteroidInit, AsteroidSize};

    #[test]
    fn test_asteroid_is_assembled() {
        let mut world = World::new();
        let mut renderer = HeadlessRenderer::new();
        let mut rng = StdRandom::seeded(3);
        let config = GameConfig::default();
        let mut ctx = SpawnContext {
            world: &mut world,
            renderer: &mut renderer,
            rng: &mut rng,
            config: &config,
        };
        let dto = AsteroidDto::new(
            AsteroidInit::new(100.0, 200.0, 50, AsteroidSize::Large)
                .with_id("a1")
                .with_velocity(3.0, -4.0),
        );

        let entity = create_asteroid(&mut ctx, &dto).unwrap();

        assert_eq!(entity.as_str(), "a1");
        let asteroid = world.get_component::<AsteroidComponent>(&entity).unwrap();
        assert_eq!((asteroid.health, asteroid.max_health), (50, 50));

        let movement = world.get_component::<MovementComponent>(&entity).unwrap();
        assert_eq!(movement.velocity, Vec2::new(3.0, -4.0));
        assert_eq!(movement.drag, 1.0);
        assert!(!movement.can_move);

        let bounds = world.get_component::<BoundsComponent>(&entity).unwrap();
        assert_eq!(bounds.action, OutOfBoundsAction::Wrap);

        let sprite = renderer.last_sprite().unwrap();
        assert_eq!(sprite.visual_key, "asteroid-large");
        assert_eq!(sprite.velocity, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_invalid_asteroid_spawns_nothing() {
        let mut world = World::new();
        let mut renderer = HeadlessRenderer::new();
        let mut rng = StdRandom::seeded(3);
        let config = GameConfig::default();
        let mut ctx = SpawnContext {
            world: &mut world,
            renderer: &mut renderer,
            rng: &mut rng,
            config: &config,
        };
        let dto = AsteroidDto::new(AsteroidInit::new(f32::NAN, 0.0, 5, AsteroidSize::Small));

        assert!(create_asteroid(&mut ctx, &dto).is_err());
        assert!(world.is_empty());
        assert_eq!(renderer.created_count(), 0);
    }
}
