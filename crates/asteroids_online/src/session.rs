//! Game session
//!
//! Owns the world and everything that mutates it. One call to
//! [`GameSession::tick`] drains the network inbox, runs the systems in phase
//! order and reports the protagonist's position on its configured cadence.

use crate::components::{AsteroidComponent, PickupComponent, PlayerComponent, UpgradesComponent, WeaponComponent};
use crate::config::GameConfig;
use crate::dto::{AmmoType, AsteroidHitDto, PickupDto, PickupKind, PlayerDto, Shot, UpgradeKind, ValidationError};
use crate::factories::SpawnContext;
use crate::net::{ReconcileContext, RequestId, SyncClient, SyncError, SyncOutcome};
use crate::protocol::{EventName, SocketRequest};
use arcade_engine::prelude::*;
use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// No protagonist has been assigned yet
    #[error("No local player")]
    NoProtagonist,

    /// Entity is missing or of the wrong kind
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Network error
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Invalid DTO
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Client-side game session
pub struct GameSession<R: RenderEngine> {
    config: GameConfig,
    world: World,
    scheduler: Scheduler,
    client: SyncClient,
    renderer: R,
    rng: Box<dyn RandomSource>,
    local_player: Option<EntityId>,
    ticks: u64,
}

impl<R: RenderEngine> GameSession<R> {
    /// Create a session with the standard systems registered
    pub fn new(config: GameConfig, client: SyncClient, renderer: R, rng: Box<dyn RandomSource>) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Box::new(MovementSystem::new()));
        scheduler.add_system(Box::new(BoundsSystem::new(
            config.world.bounds,
            config.world.out_of_bounds_threshold,
        )));
        scheduler.add_system(Box::new(RenderSyncSystem::new()));
        log::debug!("Systems: {:?}", scheduler.execution_order());

        Self {
            config,
            world: World::new(),
            scheduler,
            client,
            renderer,
            rng,
            local_player: None,
            ticks: 0,
        }
    }

    /// The world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The render engine
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The sync client
    pub fn client(&self) -> &SyncClient {
        &self.client
    }

    /// Game settings
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Entity id of the protagonist, once known
    pub fn local_player(&self) -> Option<&EntityId> {
        self.local_player.as_ref()
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Advance the session by `delta_time` seconds
    ///
    /// Every frame received since the previous tick is applied before any
    /// system runs.
    pub fn tick(&mut self, delta_time: f32) -> Vec<SyncOutcome> {
        let outcomes = {
            let mut ctx = ReconcileContext {
                spawn: SpawnContext {
                    world: &mut self.world,
                    renderer: &mut self.renderer,
                    rng: self.rng.as_mut(),
                    config: &self.config,
                },
                local_player: &mut self.local_player,
            };
            self.client.drain(&mut ctx)
        };

        self.scheduler.run_tick(&mut self.world, delta_time);
        self.ticks += 1;

        let interval = u64::from(self.config.network.coordinates_interval_ticks);
        if interval > 0 && self.ticks % interval == 0 {
            self.report_coordinates();
        }

        outcomes
    }

    fn report_coordinates(&mut self) {
        if !self.client.is_connected() {
            return;
        }
        let Some(dto) = self.protagonist_dto() else {
            return;
        };
        if let Err(error) = self.client.notify(EventName::PlayerCoordinates, &SocketRequest::one(dto)) {
            log::warn!("Could not report coordinates: {}", error);
        }
    }

    fn protagonist(&self) -> Result<EntityId, SessionError> {
        self.local_player
            .clone()
            .filter(|id| self.world.has_component::<PlayerComponent>(id))
            .ok_or(SessionError::NoProtagonist)
    }

    /// Snapshot of the protagonist as the server sees it
    pub fn protagonist_dto(&self) -> Option<PlayerDto> {
        let entity = self.protagonist().ok()?;
        let player = self.world.get_component::<PlayerComponent>(&entity)?;
        let transform = self.world.get_component::<TransformComponent>(&entity)?;

        let mut dto = PlayerDto::new(entity.as_str(), player.name.as_str(), player.max_health)
            .with_position(transform.x(), transform.y())
            .with_rotation(transform.rotation());
        dto.health = player.health;
        dto.coins = player.coins;
        dto.weapon = self
            .world
            .get_component::<WeaponComponent>(&entity)
            .map(|weapon| weapon.weapon.clone());
        dto.upgrades = self
            .world
            .get_component::<UpgradesComponent>(&entity)
            .map(UpgradesComponent::levels);
        Some(dto)
    }

    /// Steer the protagonist
    pub fn steer(&mut self, target_rotation: f32, thrust: bool) -> Result<(), SessionError> {
        let entity = self.protagonist()?;
        let movement = self
            .world
            .get_component_mut::<MovementComponent>(&entity)
            .ok_or(SessionError::UnknownEntity(entity))?;
        movement.steer(target_rotation, thrust);
        Ok(())
    }

    /// Ask the server for a pickup
    ///
    /// The pickup is applied when the success response is drained.
    pub fn claim_pickup(&mut self, pickup: &EntityId) -> Result<RequestId, SessionError> {
        let component = *self
            .world
            .get_component::<PickupComponent>(pickup)
            .ok_or_else(|| SessionError::UnknownEntity(pickup.clone()))?;
        let transform = self
            .world
            .get_component::<TransformComponent>(pickup)
            .ok_or_else(|| SessionError::UnknownEntity(pickup.clone()))?;

        let dto = PickupDto::new(
            pickup.as_str(),
            transform.x(),
            transform.y(),
            PickupKind::with_value(component.kind, component.value),
        );

        Ok(self
            .client
            .request(EventName::PlayerPickup, &SocketRequest::one(dto), Some(pickup.clone()))?)
    }

    /// Report damage dealt to an asteroid
    pub fn report_asteroid_hit(&mut self, asteroid: &EntityId, damage: u32) -> Result<RequestId, SessionError> {
        if !self.world.has_component::<AsteroidComponent>(asteroid) {
            return Err(SessionError::UnknownEntity(asteroid.clone()));
        }
        let shooter = self.local_player.as_ref().map(ToString::to_string);
        let dto = AsteroidHitDto::new(asteroid.as_str(), damage, shooter);
        dto.validate()?;

        Ok(self
            .client
            .request(EventName::AsteroidHit, &SocketRequest::one(dto), Some(asteroid.clone()))?)
    }

    /// Log in under a display name
    pub fn authenticate(&mut self, name: &str) -> Result<RequestId, SessionError> {
        let id = self.local_player.as_ref().map(ToString::to_string).unwrap_or_default();
        let dto = PlayerDto::new(id, name, self.config.ship.max_health);
        Ok(self
            .client
            .request(EventName::PlayerAuthenticate, &SocketRequest::one(dto), None)?)
    }

    /// Fire the protagonist's weapon
    ///
    /// Returns `None` when out of ammo. Damage upgrades add to the shot.
    pub fn fire(&mut self) -> Result<Option<Shot>, SessionError> {
        let entity = self.protagonist()?;
        let bonus = self
            .world
            .get_component::<UpgradesComponent>(&entity)
            .map_or(0, |upgrades| upgrades.level(UpgradeKind::Damage));
        let weapon = self
            .world
            .get_component_mut::<WeaponComponent>(&entity)
            .ok_or(SessionError::UnknownEntity(entity))?;

        Ok(weapon.weapon.fire().map(|mut shot| {
            shot.damage = shot.damage.saturating_add(u32::from(bonus));
            shot
        }))
    }

    /// Switch the protagonist's ammo type
    pub fn switch_ammo(&mut self, ammo_type: AmmoType) -> Result<(), SessionError> {
        let entity = self.protagonist()?;
        let weapon = self
            .world
            .get_component_mut::<WeaponComponent>(&entity)
            .ok_or(SessionError::UnknownEntity(entity))?;
        weapon.weapon.switch_ammo_type(ammo_type);
        Ok(())
    }

    /// Spend coins on one upgrade level
    ///
    /// Returns false, with no change, when the kind is at its cap or the
    /// protagonist cannot afford it.
    pub fn buy_upgrade(&mut self, kind: UpgradeKind) -> Result<bool, SessionError> {
        let entity = self.protagonist()?;
        let cost = self.config.upgrades.cost;

        let affordable = self
            .world
            .get_component::<PlayerComponent>(&entity)
            .is_some_and(|player| player.coins >= cost);
        let upgradable = self
            .world
            .get_component::<UpgradesComponent>(&entity)
            .is_some_and(|upgrades| upgrades.can_upgrade(kind));
        if !affordable || !upgradable {
            return Ok(false);
        }

        if let Some(upgrades) = self.world.get_component_mut::<UpgradesComponent>(&entity) {
            upgrades.upgrade(kind);
        }
        if let Some(player) = self.world.get_component_mut::<PlayerComponent>(&entity) {
            player.coins -= cost;
            if kind == UpgradeKind::MaxHealth {
                player.max_health = player.max_health.saturating_add(self.config.ship.health_per_upgrade);
                player.heal(self.config.ship.health_per_upgrade);
            }
        }
        if kind == UpgradeKind::Speed {
            if let Some(movement) = self.world.get_component_mut::<MovementComponent>(&entity) {
                movement.speed += self.config.ship.speed_per_upgrade;
            }
        }

        log::info!("Bought {:?} upgrade", kind);
        Ok(true)
    }
}
