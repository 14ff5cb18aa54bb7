//! Socket protocol
//!
//! Named events, request/response envelopes and the JSON codec that turns
//! wire bodies into typed values.

pub mod codec;
pub mod envelope;
pub mod events;

pub use codec::{
    decode_request, decode_response, decode_server_event, encode_request, encode_response,
    ServerEvent,
};
pub use envelope::{OneOrMany, ResponseFailure, SocketRequest, SocketResponse};
pub use events::{Direction, Domain, EventName, EventSpec, PayloadKind, EVENT_CATALOGUE};

use thiserror::Error;

/// Protocol errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Body is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Event name not in the catalogue
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Event used against its catalogued direction
    #[error("Event {event} is {actual:?}, expected {expected:?}")]
    WrongDirection {
        /// Event involved
        event: EventName,
        /// Direction in the catalogue
        actual: Direction,
        /// Direction required by the caller
        expected: Direction,
    },

    /// A success response without payload
    #[error("Success response carries no dto")]
    MissingResponseDto,

    /// Batch payload on an event that carries a single DTO
    #[error("Event {event} expects a single dto, got {count}")]
    ExpectedSingle {
        /// Event involved
        event: EventName,
        /// Number of DTOs received
        count: usize,
    },
}
