//! # Asteroids Online
//!
//! Client core of a multiplayer asteroids game, built on `arcade_engine`.
//!
//! Server state arrives as DTOs wrapped in socket envelopes. The sync client
//! queues inbound frames and applies them at the start of each tick, so the
//! systems always see every mutation the network delivered before that tick.
//!
//! ```
//! use arcade_engine::prelude::*;
//! use asteroids_online::prelude::*;
//!
//! let (client, server) = SyncClient::with_transport(LoopbackTransport::new);
//! let mut session = GameSession::new(
//!     GameConfig::default(),
//!     client,
//!     HeadlessRenderer::new(),
//!     Box::new(StdRandom::seeded(1)),
//! );
//!
//! server.deliver_event(
//!     "asteroid:create",
//!     r#"{"dto":{"id":"a1","x":10,"y":10,"maxHealth":3,"size":"SMALL","dx":60}}"#,
//! );
//! session.tick(0.5);
//!
//! let asteroid = session.world().get_component::<TransformComponent>(&EntityId::new("a1")).unwrap();
//! assert_eq!(asteroid.x(), 40.0);
//! ```

pub mod components;
pub mod config;
pub mod dto;
pub mod factories;
pub mod net;
pub mod protocol;
pub mod session;

#[cfg(test)]
mod tests;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        components::{AsteroidComponent, PickupComponent, PlayerComponent, UpgradesComponent, WeaponComponent},
        config::GameConfig,
        dto::{
            AmmoType, AsteroidDto, AsteroidHitDto, AsteroidInit, AsteroidSize, CauseOfDeath, HitDto, PickupDto,
            PickupKind, PickupType, PlayerDto, UpgradeKind, ValidationError, WeaponDto,
        },
        net::{LoopbackTransport, SyncClient, SyncOutcome, Transport},
        protocol::{EventName, SocketRequest, SocketResponse},
        session::{GameSession, SessionError},
    };
}
