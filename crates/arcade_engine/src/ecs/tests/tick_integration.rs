//! Full-tick tests: movement, bounds and render sync through the scheduler

use crate::ecs::components::{
    AnimationComponent, BoundsComponent, MovementComponent, TransformComponent,
};
use crate::ecs::systems::{BoundsSystem, MovementSystem, RenderSyncSystem};
use crate::ecs::{EntityId, Scheduler, World};
use crate::foundation::math::{Bounds, Vec2};
use crate::render::{HeadlessRenderer, RenderEngine};

fn scheduler(bounds: Bounds) -> Scheduler {
    let mut scheduler = Scheduler::new();
    // Registered out of order on purpose
    scheduler.add_system(Box::new(RenderSyncSystem::new()));
    scheduler.add_system(Box::new(BoundsSystem::new(bounds, 0.0)));
    scheduler.add_system(Box::new(MovementSystem::new()));
    scheduler
}

fn spawn_drifter(
    world: &mut World,
    renderer: &mut HeadlessRenderer,
    position: Vec2,
    velocity: Vec2,
) -> EntityId {
    let id = world.create_entity(None);
    world.add_component(
        &id,
        TransformComponent::new(renderer.create_sprite(position.x, position.y, "pickup")),
    );
    world.add_component(&id, MovementComponent::drifting(velocity, 1.0));
    world.add_component(&id, BoundsComponent::despawn());
    id
}

#[test]
fn test_movement_runs_before_bounds_in_one_tick() {
    let mut world = World::new();
    let mut renderer = HeadlessRenderer::new();
    let id = spawn_drifter(
        &mut world,
        &mut renderer,
        Vec2::new(95.0, 50.0),
        Vec2::new(10.0, 0.0),
    );

    scheduler(Bounds::new(100.0, 100.0)).run_tick(&mut world, 1.0);

    // Moved to x = 105 and reaped in the same tick
    assert!(!world.contains(&id));
    assert_eq!(renderer.live_count(), 0);
}

#[test]
fn test_animation_requested_after_spawn_plays_same_tick() {
    let mut world = World::new();
    let mut renderer = HeadlessRenderer::new();
    let id = spawn_drifter(&mut world, &mut renderer, Vec2::new(10.0, 10.0), Vec2::zeros());
    world.add_component(&id, AnimationComponent::playing("idle"));

    scheduler(Bounds::new(100.0, 100.0)).run_tick(&mut world, 0.016);

    assert_eq!(renderer.last_sprite().unwrap().animations, vec!["idle".to_string()]);
}

#[test]
fn test_many_entities_only_escapees_removed() {
    let mut world = World::new();
    let mut renderer = HeadlessRenderer::new();
    let mut scheduler = scheduler(Bounds::new(100.0, 100.0));

    let stay: Vec<_> = (0..5)
        .map(|i| {
            let x = 10.0 + i as f32 * 10.0;
            spawn_drifter(&mut world, &mut renderer, Vec2::new(x, 50.0), Vec2::zeros())
        })
        .collect();
    let leave = spawn_drifter(&mut world, &mut renderer, Vec2::new(50.0, 99.0), Vec2::new(0.0, 5.0));

    scheduler.run_tick(&mut world, 1.0);

    assert!(stay.iter().all(|id| world.contains(id)));
    assert!(!world.contains(&leave));
    assert_eq!(world.len(), 5);
}
