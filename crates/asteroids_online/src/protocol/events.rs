//! Event catalogue
//!
//! One immutable table describes every event the client knows: its wire name,
//! domain, direction and payload.

use super::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// Every named socket event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// A remote player entered the game
    PlayerJoined,
    /// The server assigned this client's player
    PlayerProtagonist,
    /// Snapshot of every player
    PlayerPlayers,
    /// A player left the game
    PlayerQuit,
    /// A player took damage
    PlayerHit,
    /// Claim a pickup
    PlayerPickup,
    /// Local player position report
    PlayerCoordinates,
    /// Log in with a display name
    PlayerAuthenticate,
    /// An item was dropped into the world
    GameDrop,
    /// An asteroid entered play
    AsteroidCreate,
    /// Asteroid position snapshot
    AsteroidCoordinates,
    /// An asteroid left play
    AsteroidDestroy,
    /// Report damage dealt to an asteroid
    AsteroidHit,
}

/// Event domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Player lifecycle and state
    Player,
    /// World spawns
    Game,
    /// Asteroid lifecycle
    Asteroid,
}

/// Who sends an event and whether it is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Server to client
    Downstream,
    /// Client to server, answered by a response envelope
    Request,
    /// Client to server, never answered
    Notify,
}

/// DTO carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// `PlayerDto`
    Player,
    /// `HitDto`
    Hit,
    /// `PickupDto`
    Pickup,
    /// `AsteroidDto`
    Asteroid,
    /// `AsteroidHitDto`, answered with `AsteroidDto`
    AsteroidHit,
}

/// Catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpec {
    /// Event
    pub name: EventName,
    /// Wire string
    pub wire: &'static str,
    /// Domain
    pub domain: Domain,
    /// Direction
    pub direction: Direction,
    /// Payload DTO
    pub payload: PayloadKind,
    /// Whether the payload is normally a batch
    pub batch: bool,
}

const fn entry(
    name: EventName,
    wire: &'static str,
    domain: Domain,
    direction: Direction,
    payload: PayloadKind,
    batch: bool,
) -> EventSpec {
    EventSpec {
        name,
        wire,
        domain,
        direction,
        payload,
        batch,
    }
}

/// Every known event, in declaration order of [`EventName`]
pub static EVENT_CATALOGUE: [EventSpec; 13] = [
    entry(EventName::PlayerJoined, "player:joined", Domain::Player, Direction::Downstream, PayloadKind::Player, false),
    entry(EventName::PlayerProtagonist, "player:protagonist", Domain::Player, Direction::Downstream, PayloadKind::Player, false),
    entry(EventName::PlayerPlayers, "player:players", Domain::Player, Direction::Downstream, PayloadKind::Player, true),
    entry(EventName::PlayerQuit, "player:quit", Domain::Player, Direction::Downstream, PayloadKind::Player, false),
    entry(EventName::PlayerHit, "player:hit", Domain::Player, Direction::Downstream, PayloadKind::Hit, false),
    entry(EventName::PlayerPickup, "player:pickup", Domain::Player, Direction::Request, PayloadKind::Pickup, false),
    entry(EventName::PlayerCoordinates, "player:coordinates", Domain::Player, Direction::Notify, PayloadKind::Player, false),
    entry(EventName::PlayerAuthenticate, "player:authenticate", Domain::Player, Direction::Request, PayloadKind::Player, false),
    entry(EventName::GameDrop, "game:drop", Domain::Game, Direction::Downstream, PayloadKind::Pickup, false),
    entry(EventName::AsteroidCreate, "asteroid:create", Domain::Asteroid, Direction::Downstream, PayloadKind::Asteroid, false),
    entry(EventName::AsteroidCoordinates, "asteroid:coordinates", Domain::Asteroid, Direction::Downstream, PayloadKind::Asteroid, true),
    entry(EventName::AsteroidDestroy, "asteroid:destroy", Domain::Asteroid, Direction::Downstream, PayloadKind::Asteroid, false),
    entry(EventName::AsteroidHit, "asteroid:hit", Domain::Asteroid, Direction::Request, PayloadKind::AsteroidHit, false),
];

impl EventName {
    /// Catalogue entry of this event
    pub fn spec(self) -> &'static EventSpec {
        &EVENT_CATALOGUE[self as usize]
    }

    /// Wire string
    pub fn as_str(self) -> &'static str {
        self.spec().wire
    }

    /// Domain
    pub fn domain(self) -> Domain {
        self.spec().domain
    }

    /// Direction
    pub fn direction(self) -> Direction {
        self.spec().direction
    }

    /// Resolve a wire string
    pub fn parse(wire: &str) -> Result<Self, ProtocolError> {
        EVENT_CATALOGUE
            .iter()
            .find(|spec| spec.wire == wire)
            .map(|spec| spec.name)
            .ok_or_else(|| ProtocolError::UnknownEvent(wire.to_string()))
    }

    /// Fail unless this event travels in `expected` direction
    pub fn expect_direction(self, expected: Direction) -> Result<Self, ProtocolError> {
        let actual = self.direction();
        if actual == expected {
            Ok(self)
        } else {
            Err(ProtocolError::WrongDirection {
                event: self,
                actual,
                expected,
            })
        }
    }
}

impl FromStr for EventName {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_is_indexed_by_name() {
        for (index, spec) in EVENT_CATALOGUE.iter().enumerate() {
            assert_eq!(spec.name as usize, index);
            assert_eq!(spec.name.spec(), spec);
        }
    }

    #[test]
    fn test_wire_names_resolve() {
        for spec in &EVENT_CATALOGUE {
            assert_eq!(EventName::parse(spec.wire).unwrap(), spec.name);
        }
        assert_eq!("game:drop".parse::<EventName>().unwrap(), EventName::GameDrop);
    }

    #[test]
    fn test_wire_names_match_domain_prefix() {
        for spec in &EVENT_CATALOGUE {
            let prefix = match spec.domain {
                Domain::Player => "player:",
                Domain::Game => "game:",
                Domain::Asteroid => "asteroid:",
            };
            assert!(spec.wire.starts_with(prefix), "{}", spec.wire);
        }
    }

    #[test]
    fn test_unknown_event() {
        assert!(matches!(
            EventName::parse("player:dance"),
            Err(ProtocolError::UnknownEvent(name)) if name == "player:dance"
        ));
    }

    #[test]
    fn test_direction_check() {
        assert!(EventName::PlayerPickup.expect_direction(Direction::Request).is_ok());
        assert!(matches!(
            EventName::AsteroidCreate.expect_direction(Direction::Request),
            Err(ProtocolError::WrongDirection { actual: Direction::Downstream, .. })
        ));
    }
}
