//! JSON wire codec

use super::envelope::RawResponse;
use super::{Direction, EventName, ProtocolError, SocketRequest, SocketResponse};
use crate::dto::{AsteroidDto, HitDto, PickupDto, PlayerDto};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a request envelope
pub fn encode_request<T: Serialize>(request: &SocketRequest<T>) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(request)?)
}

/// Decode a request envelope
pub fn decode_request<T: DeserializeOwned>(body: &str) -> Result<SocketRequest<T>, ProtocolError> {
    Ok(serde_json::from_str(body)?)
}

/// Encode a response envelope
pub fn encode_response<T: Serialize>(response: &SocketResponse<T>) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(response)?)
}

/// Decode a response envelope
///
/// `ok: true` without a dto is reported as [`ProtocolError::MissingResponseDto`].
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<SocketResponse<T>, ProtocolError> {
    let raw: RawResponse<T> = serde_json::from_str(body)?;
    SocketResponse::try_from(raw)
}

/// A decoded downstream event
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// `player:joined`
    PlayerJoined(PlayerDto),
    /// `player:protagonist`
    Protagonist(PlayerDto),
    /// `player:players`
    Players(Vec<PlayerDto>),
    /// `player:quit`
    PlayerQuit(PlayerDto),
    /// `player:hit`
    PlayerHit(HitDto),
    /// `game:drop`
    Drop(PickupDto),
    /// `asteroid:create`
    AsteroidCreated(AsteroidDto),
    /// `asteroid:coordinates`
    AsteroidCoordinates(Vec<AsteroidDto>),
    /// `asteroid:destroy`
    AsteroidDestroyed(AsteroidDto),
}

impl ServerEvent {
    /// Event this value was decoded from
    pub fn name(&self) -> EventName {
        match self {
            Self::PlayerJoined(_) => EventName::PlayerJoined,
            Self::Protagonist(_) => EventName::PlayerProtagonist,
            Self::Players(_) => EventName::PlayerPlayers,
            Self::PlayerQuit(_) => EventName::PlayerQuit,
            Self::PlayerHit(_) => EventName::PlayerHit,
            Self::Drop(_) => EventName::GameDrop,
            Self::AsteroidCreated(_) => EventName::AsteroidCreate,
            Self::AsteroidCoordinates(_) => EventName::AsteroidCoordinates,
            Self::AsteroidDestroyed(_) => EventName::AsteroidDestroy,
        }
    }
}

fn single<T: DeserializeOwned>(event: EventName, body: &str) -> Result<T, ProtocolError> {
    decode_request::<T>(body)?.into_single(event)
}

fn batch<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ProtocolError> {
    Ok(decode_request::<T>(body)?.into_vec())
}

/// Decode a downstream event body by its wire name
pub fn decode_server_event(event: &str, body: &str) -> Result<ServerEvent, ProtocolError> {
    let name = EventName::parse(event)?.expect_direction(Direction::Downstream)?;

    let decoded = match name {
        EventName::PlayerJoined => ServerEvent::PlayerJoined(single(name, body)?),
        EventName::PlayerProtagonist => ServerEvent::Protagonist(single(name, body)?),
        EventName::PlayerPlayers => ServerEvent::Players(batch(body)?),
        EventName::PlayerQuit => ServerEvent::PlayerQuit(single(name, body)?),
        EventName::PlayerHit => ServerEvent::PlayerHit(single(name, body)?),
        EventName::GameDrop => ServerEvent::Drop(single(name, body)?),
        EventName::AsteroidCreate => ServerEvent::AsteroidCreated(single(name, body)?),
        EventName::AsteroidCoordinates => ServerEvent::AsteroidCoordinates(batch(body)?),
        EventName::AsteroidDestroy => ServerEvent::AsteroidDestroyed(single(name, body)?),
        EventName::PlayerPickup
        | EventName::PlayerCoordinates
        | EventName::PlayerAuthenticate
        | EventName::AsteroidHit => {
            return Err(ProtocolError::WrongDirection {
                event: name,
                actual: name.direction(),
                expected: Direction::Downstream,
            })
        }
    };
    Ok(decoded)
}
