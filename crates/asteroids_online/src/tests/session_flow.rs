//! Full round trips: server frames in, ticks, requests out, responses in

use crate::components::{AsteroidComponent, PickupComponent, PlayerComponent, WeaponComponent};
use crate::config::GameConfig;
use crate::dto::{
    AmmoType, AsteroidDto, AsteroidInit, AsteroidSize, HitDto, PickupDto, PlayerDto, UpgradeKind, ValidationError,
    WeaponDto,
};
use crate::net::{DropReason, LoopbackTransport, OutboundFrame, SyncClient, SyncOutcome};
use crate::protocol::{decode_request, encode_request, encode_response, EventName, SocketRequest, SocketResponse};
use crate::session::{GameSession, SessionError};
use arcade_engine::prelude::*;
use serde::Serialize;

const HERO: &str = "hero";

struct Harness {
    session: GameSession<HeadlessRenderer>,
    server: LoopbackTransport,
}

impl Harness {
    fn new() -> Self {
        let (client, server) = SyncClient::with_transport(LoopbackTransport::new);
        let session = GameSession::new(
            GameConfig::default(),
            client,
            HeadlessRenderer::new(),
            Box::new(StdRandom::seeded(11)),
        );
        Self { session, server }
    }

    fn send<T: Serialize>(&self, event: EventName, request: &SocketRequest<T>) {
        assert!(self.server.deliver_event(event.as_str(), encode_request(request).unwrap()));
    }

    fn respond<T: Serialize>(&self, id: u64, response: &SocketResponse<T>) {
        assert!(self.server.deliver_response(id, encode_response(response).unwrap()));
    }

    fn tick(&mut self) -> Vec<SyncOutcome> {
        self.session.tick(0.0)
    }

    fn login(&mut self) -> EntityId {
        let hero = PlayerDto::new(HERO, "ada", 100)
            .with_position(640.0, 360.0)
            .with_weapon(WeaponDto::new(AmmoType::Bullet));
        self.send(EventName::PlayerProtagonist, &SocketRequest::one(hero));
        self.tick();
        EntityId::new(HERO)
    }

    fn drop_pickup(&mut self, pickup: PickupDto) -> EntityId {
        let id = EntityId::new(pickup.id.as_str());
        self.send(EventName::GameDrop, &SocketRequest::one(pickup));
        self.tick();
        id
    }

    fn player(&self, id: &EntityId) -> &PlayerComponent {
        self.session.world().get_component::<PlayerComponent>(id).unwrap()
    }

    fn ammo(&self, id: &EntityId) -> u32 {
        self.session.world().get_component::<WeaponComponent>(id).unwrap().weapon.ammo()
    }
}

#[test]
fn test_network_mutation_is_visible_to_same_tick() {
    let mut harness = Harness::new();
    let asteroid = AsteroidDto::new(
        AsteroidInit::new(10.0, 10.0, 3, AsteroidSize::Small)
            .with_id("a1")
            .with_velocity(60.0, 0.0),
    );
    harness.send(EventName::AsteroidCreate, &SocketRequest::one(asteroid));

    let outcomes = harness.session.tick(0.5);

    assert!(matches!(outcomes.as_slice(), [SyncOutcome::Applied(EventName::AsteroidCreate)]));
    let transform = harness
        .session
        .world()
        .get_component::<TransformComponent>(&EntityId::new("a1"))
        .unwrap();
    assert_eq!(transform.x(), 40.0);
}

#[test]
fn test_protagonist_is_local_and_driven() {
    let mut harness = Harness::new();
    let hero = harness.login();

    assert_eq!(harness.session.local_player(), Some(&hero));
    assert!(harness.player(&hero).is_local);
    assert_eq!(harness.session.renderer().last_sprite().unwrap().visual_key, "ship");

    harness.session.steer(1.0, true).unwrap();
    let movement = harness.session.world().get_component::<MovementComponent>(&hero).unwrap();
    assert!(movement.thrust);
    assert_eq!(movement.target_rotation, 1.0);
}

#[test]
fn test_actions_need_a_protagonist() {
    let mut harness = Harness::new();
    assert!(matches!(harness.session.steer(0.0, true), Err(SessionError::NoProtagonist)));
    assert!(matches!(harness.session.fire(), Err(SessionError::NoProtagonist)));
}

#[test]
fn test_pickup_success_applies_to_local_player() {
    let mut harness = Harness::new();
    let hero = harness.login();
    let pickup = harness.drop_pickup(PickupDto::ammo("p1", 640.0, 360.0, 2));
    assert_eq!(harness.ammo(&hero), 50);

    let request = harness.session.claim_pickup(&pickup).unwrap();
    harness.respond(request, &SocketResponse::success(PickupDto::ammo("p1", 640.0, 360.0, 2)));
    let outcomes = harness.tick();

    assert!(outcomes
        .iter()
        .any(|o| matches!(o, SyncOutcome::Responded { event: EventName::PlayerPickup, .. })));
    assert_eq!(harness.ammo(&hero), 90);
    assert!(!harness.session.world().contains(&pickup));
    assert_eq!(harness.session.client().pending_count(), 0);
}

#[test]
fn test_pickup_failure_leaves_state_unchanged() {
    let mut harness = Harness::new();
    let hero = harness.login();
    let pickup = harness.drop_pickup(PickupDto::health("h1", 640.0, 360.0, 30));
    harness.session.world_mut().get_component_mut::<PlayerComponent>(&hero).unwrap().damage(50);

    let request = harness.session.claim_pickup(&pickup).unwrap();
    harness.respond(request, &SocketResponse::<PickupDto>::failure(Some(409), "taken"));
    let outcomes = harness.tick();

    let failure = outcomes.iter().find_map(|o| match o {
        SyncOutcome::Failed { failure, .. } => Some(failure.clone()),
        _ => None,
    });
    assert_eq!(failure.unwrap().status, Some(409));
    assert_eq!(harness.player(&hero).health, 50);
    assert!(harness.session.world().contains(&pickup));
}

#[test]
fn test_late_response_after_disconnect_is_ignored() {
    let mut harness = Harness::new();
    let hero = harness.login();
    let pickup = harness.drop_pickup(PickupDto::ammo("p1", 640.0, 360.0, 2));
    let request = harness.session.claim_pickup(&pickup).unwrap();

    harness.server.disconnect();
    let outcomes = harness.tick();
    assert!(outcomes
        .iter()
        .any(|o| matches!(o, SyncOutcome::Disconnected { abandoned: 1 })));

    harness.respond(request, &SocketResponse::success(PickupDto::ammo("p1", 640.0, 360.0, 2)));
    let outcomes = harness.tick();

    assert!(outcomes.iter().any(|o| matches!(
        o,
        SyncOutcome::Dropped { reason: DropReason::Abandoned, .. }
    )));
    assert_eq!(harness.ammo(&hero), 50);
    assert!(harness.session.world().contains(&pickup));
}

#[test]
fn test_request_sent_after_quick_reconnect_survives() {
    let mut harness = Harness::new();
    let hero = harness.login();
    let coin = harness.drop_pickup(PickupDto::coin("c1", 640.0, 360.0, 15));

    harness.server.disconnect();
    harness.server.reconnect();
    let request = harness.session.claim_pickup(&coin).unwrap();
    harness.respond(request, &SocketResponse::success(PickupDto::coin("c1", 640.0, 360.0, 15)));
    let outcomes = harness.tick();

    assert!(matches!(
        outcomes.as_slice(),
        [
            SyncOutcome::Disconnected { abandoned: 0 },
            SyncOutcome::Connected,
            SyncOutcome::Responded { event: EventName::PlayerPickup, .. },
        ]
    ));
    assert_eq!(harness.player(&hero).coins, 15);
    assert!(!harness.session.world().contains(&coin));
}

#[test]
fn test_requests_fail_while_disconnected() {
    let mut harness = Harness::new();
    harness.login();
    harness.server.disconnect();
    harness.tick();

    assert!(matches!(harness.session.authenticate("ada"), Err(SessionError::Sync(_))));
    assert_eq!(harness.session.client().pending_count(), 0);
}

#[test]
fn test_response_for_destroyed_target_is_dropped() {
    let mut harness = Harness::new();
    let asteroid = AsteroidDto::new(AsteroidInit::new(100.0, 100.0, 10, AsteroidSize::Large).with_id("a1"));
    harness.send(EventName::AsteroidCreate, &SocketRequest::one(asteroid.clone()));
    harness.tick();

    let request = harness.session.report_asteroid_hit(&EntityId::new("a1"), 3).unwrap();
    harness.send(EventName::AsteroidDestroy, &SocketRequest::one(asteroid.clone()));
    harness.respond(request, &SocketResponse::success(asteroid));
    let outcomes = harness.tick();

    assert!(outcomes.iter().any(|o| matches!(
        o,
        SyncOutcome::Dropped { reason: DropReason::TargetGone, .. }
    )));
    assert!(harness.session.world().is_empty());
    assert_eq!(harness.session.renderer().live_count(), 0);
}

#[test]
fn test_asteroid_hit_response_updates_health() {
    let mut harness = Harness::new();
    let asteroid = AsteroidDto::new(AsteroidInit::new(100.0, 100.0, 10, AsteroidSize::Medium).with_id("a1"));
    harness.send(EventName::AsteroidCreate, &SocketRequest::one(asteroid));
    harness.tick();
    let a1 = EntityId::new("a1");

    let request = harness.session.report_asteroid_hit(&a1, 3).unwrap();
    let damaged = AsteroidDto::new(
        AsteroidInit::new(100.0, 100.0, 10, AsteroidSize::Medium)
            .with_id("a1")
            .with_health(7),
    );
    harness.respond(request, &SocketResponse::success(damaged));
    harness.tick();

    let component = harness.session.world().get_component::<AsteroidComponent>(&a1).unwrap();
    assert_eq!(component.health, 7);
}

#[test]
fn test_asteroid_coordinates_overwrite_and_create() {
    let mut harness = Harness::new();
    let a1 = AsteroidDto::new(AsteroidInit::new(100.0, 100.0, 10, AsteroidSize::Small).with_id("a1"));
    harness.send(EventName::AsteroidCreate, &SocketRequest::one(a1));
    harness.tick();

    let moved = AsteroidDto::new(
        AsteroidInit::new(300.0, 200.0, 10, AsteroidSize::Small)
            .with_id("a1")
            .with_health(4),
    );
    let fresh = AsteroidDto::new(AsteroidInit::new(5.0, 5.0, 10, AsteroidSize::Large).with_id("a2"));
    harness.send(EventName::AsteroidCoordinates, &SocketRequest::many(vec![moved, fresh]));
    harness.tick();

    let world = harness.session.world();
    let transform = world.get_component::<TransformComponent>(&EntityId::new("a1")).unwrap();
    assert_eq!(transform.position(), Vec2::new(300.0, 200.0));
    assert_eq!(world.get_component::<AsteroidComponent>(&EntityId::new("a1")).unwrap().health, 4);
    assert!(world.contains(&EntityId::new("a2")));
    assert_eq!(harness.session.renderer().created_count(), 2);
}

#[test]
fn test_destroy_plays_explosion_and_releases_sprite() {
    let mut harness = Harness::new();
    let asteroid = AsteroidDto::new(AsteroidInit::new(1.0, 1.0, 10, AsteroidSize::Small).with_id("a1"));
    harness.send(EventName::AsteroidCreate, &SocketRequest::one(asteroid.clone()));
    harness.tick();

    let mut destroyed = asteroid;
    destroyed.cause_of_death = crate::dto::CauseOfDeath::Hit;
    harness.send(EventName::AsteroidDestroy, &SocketRequest::one(destroyed));
    harness.tick();

    let sprite = harness.session.renderer().last_sprite().unwrap();
    assert!(sprite.destroyed);
    assert_eq!(sprite.animations, vec!["explode".to_string()]);
}

#[test]
fn test_players_upsert_and_quit() {
    let mut harness = Harness::new();
    let p2 = PlayerDto::new("p2", "bob", 100).with_position(1.0, 1.0);
    let p3 = PlayerDto::new("p3", "cy", 100).with_position(2.0, 2.0);
    harness.send(EventName::PlayerPlayers, &SocketRequest::many(vec![p2.clone(), p3.clone()]));
    harness.tick();

    harness.send(EventName::PlayerPlayers, &SocketRequest::many(vec![p2.with_position(5.0, 5.0)]));
    harness.send(EventName::PlayerQuit, &SocketRequest::one(p3));
    harness.tick();

    let world = harness.session.world();
    let transform = world.get_component::<TransformComponent>(&EntityId::new("p2")).unwrap();
    assert_eq!(transform.position(), Vec2::new(5.0, 5.0));
    assert!(!world.contains(&EntityId::new("p3")));

    let renderer = harness.session.renderer();
    assert_eq!(renderer.created_count(), 2);
    assert_eq!(renderer.live_count(), 1);
    assert!(renderer.sprites().iter().all(|sprite| sprite.visual_key == "ship-remote"));
}

#[test]
fn test_invalid_dto_in_batch_only_skips_itself() {
    let mut harness = Harness::new();
    let valid = PlayerDto::new("p2", "bob", 100).with_position(1.0, 1.0);
    let missing_position = PlayerDto::new("p3", "cy", 100);
    harness.send(EventName::PlayerPlayers, &SocketRequest::many(vec![missing_position, valid]));

    let outcomes = harness.tick();

    assert!(outcomes.iter().any(|o| matches!(o, SyncOutcome::Rejected { .. })));
    assert!(harness.session.world().contains(&EntityId::new("p2")));
    assert!(!harness.session.world().contains(&EntityId::new("p3")));
    assert_eq!(harness.session.renderer().created_count(), 1);
}

#[test]
fn test_invalid_drop_spawns_nothing() {
    let mut harness = Harness::new();
    let mut pickup = PickupDto::coin("c1", 0.0, 0.0, 5);
    pickup.y = None;
    harness.send(EventName::GameDrop, &SocketRequest::one(pickup));

    let outcomes = harness.tick();

    assert!(outcomes.iter().any(|o| matches!(o, SyncOutcome::Rejected { event: EventName::GameDrop, .. })));
    assert!(harness.session.world().is_empty());
    assert_eq!(harness.session.renderer().created_count(), 0);
}

#[test]
fn test_drop_cannot_take_over_a_live_player() {
    let mut harness = Harness::new();
    let hero = harness.login();

    harness.send(EventName::GameDrop, &SocketRequest::one(PickupDto::ammo(HERO, 1.0, 1.0, 2)));
    harness.send(
        EventName::AsteroidCreate,
        &SocketRequest::one(AsteroidDto::new(AsteroidInit::new(1.0, 1.0, 5, AsteroidSize::Small).with_id(HERO))),
    );
    let outcomes = harness.tick();

    let duplicates = outcomes
        .iter()
        .filter(|o| {
            matches!(
                o,
                SyncOutcome::Rejected { error: ValidationError::DuplicateId { id, .. }, .. } if id == HERO
            )
        })
        .count();
    assert_eq!(duplicates, 2);

    let world = harness.session.world();
    assert!(world.get_component::<PickupComponent>(&hero).is_none());
    assert!(world.get_component::<AsteroidComponent>(&hero).is_none());
    assert!(world.get_component::<MovementComponent>(&hero).unwrap().can_move);
    assert!(harness.player(&hero).is_local);

    let renderer = harness.session.renderer();
    assert_eq!(renderer.created_count(), 1);
    assert_eq!(renderer.live_count(), 1);
}

#[test]
fn test_hit_reduces_health_saturating() {
    let mut harness = Harness::new();
    let hero = harness.login();

    harness.send(EventName::PlayerHit, &SocketRequest::one(HitDto::new(HERO, 30).with_shooter("p2")));
    harness.tick();
    assert_eq!(harness.player(&hero).health, 70);

    harness.send(EventName::PlayerHit, &SocketRequest::one(HitDto::new(HERO, 500)));
    harness.tick();
    assert!(harness.player(&hero).is_dead());
    assert!(harness
        .session
        .renderer()
        .last_sprite()
        .unwrap()
        .animations
        .contains(&"hit".to_string()));
}

#[test]
fn test_coordinates_are_reported_on_interval() {
    let mut harness = Harness::new();
    harness.login();
    harness.server.take_sent();

    harness.tick();
    assert!(harness.server.take_sent().is_empty());
    harness.tick();

    let sent = harness.server.take_sent();
    assert_eq!(sent.len(), 1);
    let OutboundFrame::Notify { event, body } = &sent[0] else {
        panic!("expected a notification, got {:?}", sent[0]);
    };
    assert_eq!(*event, "player:coordinates");
    let player = decode_request::<PlayerDto>(body)
        .unwrap()
        .into_single(EventName::PlayerCoordinates)
        .unwrap();
    assert_eq!(player.id, HERO);
    assert_eq!((player.x, player.y), (Some(640.0), Some(360.0)));
}

#[test]
fn test_authenticate_records_local_player() {
    let mut harness = Harness::new();
    let request = harness.session.authenticate("ada").unwrap();

    let sent = harness.server.take_sent();
    assert!(matches!(&sent[0], OutboundFrame::Request { id, event: "player:authenticate", .. } if *id == request));

    harness.respond(request, &SocketResponse::success(PlayerDto::new("srv-1", "ada", 100)));
    harness.tick();
    assert_eq!(harness.session.local_player(), Some(&EntityId::new("srv-1")));
}

#[test]
fn test_coins_buy_upgrades_until_broke() {
    let mut harness = Harness::new();
    let hero = harness.login();
    let coin = harness.drop_pickup(PickupDto::coin("c1", 640.0, 360.0, 15));
    let request = harness.session.claim_pickup(&coin).unwrap();
    harness.respond(request, &SocketResponse::success(PickupDto::coin("c1", 640.0, 360.0, 15)));
    harness.tick();
    assert_eq!(harness.player(&hero).coins, 15);

    let speed = harness.session.world().get_component::<MovementComponent>(&hero).unwrap().speed;
    assert!(harness.session.buy_upgrade(UpgradeKind::Speed).unwrap());
    assert!(!harness.session.buy_upgrade(UpgradeKind::Speed).unwrap());

    assert_eq!(harness.player(&hero).coins, 5);
    let upgraded = harness.session.world().get_component::<MovementComponent>(&hero).unwrap().speed;
    assert_eq!(upgraded, speed + harness.session.config().ship.speed_per_upgrade);
}

#[test]
fn test_max_health_upgrade_saturates() {
    let mut harness = Harness::new();
    let hero = harness.login();
    {
        let player = harness.session.world_mut().get_component_mut::<PlayerComponent>(&hero).unwrap();
        player.max_health = u32::MAX - 5;
        player.coins = 10;
    }

    assert!(harness.session.buy_upgrade(UpgradeKind::MaxHealth).unwrap());

    assert_eq!(harness.player(&hero).max_health, u32::MAX);
    assert_eq!(harness.player(&hero).coins, 0);
}

#[test]
fn test_switching_ammo_and_firing() {
    let mut harness = Harness::new();
    harness.login();
    harness.session.switch_ammo(AmmoType::Rocket).unwrap();

    let shots: Vec<_> = (0..4).map(|_| harness.session.fire().unwrap()).collect();

    assert!(shots[..3].iter().all(|shot| shot.is_some_and(|s| s.damage == 5)));
    assert_eq!(shots[3], None);
}

#[test]
fn test_claiming_a_non_pickup_fails() {
    let mut harness = Harness::new();
    let hero = harness.login();
    assert!(matches!(
        harness.session.claim_pickup(&hero),
        Err(SessionError::UnknownEntity(id)) if id == hero
    ));
    assert!(harness.session.world().get_component::<PickupComponent>(&hero).is_none());
}
