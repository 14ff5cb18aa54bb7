//! Headless demo
//!
//! Runs a session against a scripted in-process server: log in, receive a
//! protagonist, watch asteroids drift and pick up whatever the server drops.

use arcade_engine::foundation::logging;
use arcade_engine::prelude::*;
use asteroids_online::dto::AsteroidHitDto;
use asteroids_online::net::OutboundFrame;
use asteroids_online::prelude::*;
use asteroids_online::protocol::{decode_request, encode_request, encode_response};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const CONFIG_PATH: &str = "asteroids_online.toml";
const TICKS: u32 = 240;
const DELTA_TIME: f32 = 1.0 / 60.0;

/// Plays the server side over a loopback transport
struct ScriptedServer {
    transport: LoopbackTransport,
    rng: StdRng,
    bounds: Bounds,
    next_id: u32,
}

impl ScriptedServer {
    fn new(transport: LoopbackTransport, bounds: Bounds) -> Self {
        Self {
            transport,
            rng: StdRng::seed_from_u64(2024),
            bounds,
            next_id: 0,
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn random_point(&mut self) -> (f32, f32) {
        (
            self.rng.gen_range(0.0..self.bounds.width),
            self.rng.gen_range(0.0..self.bounds.height),
        )
    }

    fn broadcast<T: serde::Serialize>(&self, event: EventName, dto: T) -> Result<(), Box<dyn std::error::Error>> {
        self.transport
            .deliver_event(event.as_str(), encode_request(&SocketRequest::one(dto))?);
        Ok(())
    }

    fn spawn_asteroid(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (x, y) = self.random_point();
        let size = match self.rng.gen_range(0..3) {
            0 => AsteroidSize::Small,
            1 => AsteroidSize::Medium,
            _ => AsteroidSize::Large,
        };
        let id = self.fresh_id("asteroid");
        let dto = AsteroidDto::new(
            AsteroidInit::new(x, y, 10, size)
                .with_id(id)
                .with_velocity(self.rng.gen_range(-80.0..80.0), self.rng.gen_range(-80.0..80.0)),
        );
        self.broadcast(EventName::AsteroidCreate, dto)
    }

    fn drop_pickup(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (x, y) = self.random_point();
        let id = self.fresh_id("pickup");
        let dto = match self.rng.gen_range(0..3) {
            0 => PickupDto::ammo(id, x, y, 2),
            1 => PickupDto::health(id, x, y, 25),
            _ => PickupDto::coin(id, x, y, 15),
        };
        self.broadcast(EventName::GameDrop, dto)
    }

    /// Answer every request the client sent since the last call
    fn respond(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for frame in self.transport.take_sent() {
            let OutboundFrame::Request { id, event, body } = frame else {
                continue;
            };

            let response = match EventName::parse(event)? {
                EventName::PlayerAuthenticate => {
                    let mut player = decode_request::<PlayerDto>(&body)?.into_single(EventName::PlayerAuthenticate)?;
                    player.id = self.fresh_id("player");
                    let (x, y) = (self.bounds.width * 0.5, self.bounds.height * 0.5);
                    let player = player.with_position(x, y).with_weapon(WeaponDto::new(AmmoType::Bullet));
                    self.broadcast(EventName::PlayerProtagonist, player.clone())?;
                    encode_response(&SocketResponse::success(player))?
                }
                EventName::PlayerPickup => {
                    let pickup = decode_request::<PickupDto>(&body)?.into_single(EventName::PlayerPickup)?;
                    if self.rng.gen_bool(0.8) {
                        encode_response(&SocketResponse::success(pickup))?
                    } else {
                        encode_response(&SocketResponse::<PickupDto>::failure(Some(409), "already claimed"))?
                    }
                }
                EventName::AsteroidHit => {
                    let hit = decode_request::<AsteroidHitDto>(&body)?.into_single(EventName::AsteroidHit)?;
                    let asteroid = AsteroidDto::new(
                        AsteroidInit::new(0.0, 0.0, 10, AsteroidSize::Small)
                            .with_id(hit.asteroid_id)
                            .with_health(10u32.saturating_sub(hit.damage)),
                    );
                    encode_response(&SocketResponse::success(asteroid))?
                }
                other => {
                    log::warn!("Server ignores {}", other);
                    continue;
                }
            };
            self.transport.deliver_response(id, response);
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting Asteroids Online headless demo");

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let (client, transport) = SyncClient::with_transport(LoopbackTransport::new);
    let mut server = ScriptedServer::new(transport, config.world.bounds);
    let mut session = GameSession::new(config, client, HeadlessRenderer::new(), Box::new(StdRandom::from_entropy()));

    session.authenticate("pilot")?;
    for _ in 0..4 {
        server.spawn_asteroid()?;
    }

    let mut claimed = HashSet::new();
    for tick in 0..TICKS {
        server.respond()?;
        if tick % 60 == 30 {
            server.drop_pickup()?;
        }

        for outcome in session.tick(DELTA_TIME) {
            log::debug!("tick {}: {:?}", tick, outcome);
        }

        if session.local_player().is_some() {
            session.steer(tick as f32 * 0.02, tick % 2 == 0)?;
            if tick % 20 == 0 {
                if let Some(shot) = session.fire()? {
                    log::debug!("Fired {:?}", shot);
                }
            }
        }

        for pickup in session.world().query_ids(&[ComponentKind::of::<PickupComponent>()]) {
            if claimed.insert(pickup.clone()) {
                session.claim_pickup(&pickup)?;
            }
        }

        let asteroids = session.world().query_ids(&[ComponentKind::of::<AsteroidComponent>()]);
        if tick % 45 == 0 {
            if let Some(asteroid) = asteroids.first() {
                session.report_asteroid_hit(asteroid, 3)?;
            }
        }
    }

    match session.protagonist_dto() {
        Some(player) => log::info!(
            "Finished: {} at ({:.1}, {:.1}), health {}/{}, coins {}, ammo {}",
            player.name,
            player.x.unwrap_or_default(),
            player.y.unwrap_or_default(),
            player.health,
            player.max_health,
            player.coins,
            player.weapon.map_or(0, |weapon| weapon.ammo()),
        ),
        None => log::warn!("Finished without a protagonist"),
    }
    log::info!(
        "{} entities alive, {} sprites created",
        session.world().len(),
        session.renderer().created_count()
    );
    Ok(())
}
