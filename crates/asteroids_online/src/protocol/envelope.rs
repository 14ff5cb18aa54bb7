//! Request and response envelopes
//!
//! A request wraps one DTO or a batch. A response is either a success, which
//! always carries a DTO, or a failure, whose DTO is optional and informational.

use super::{EventName, ProtocolError};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single DTO or a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Batch
    Many(Vec<T>),
    /// Single DTO
    One(T),
}

impl<T> OneOrMany<T> {
    /// Number of DTOs
    pub fn len(&self) -> usize {
        match self {
            Self::Many(items) => items.len(),
            Self::One(_) => 1,
        }
    }

    /// Whether this is an empty batch
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every DTO, in order
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Request envelope: `{ dto: T | T[], message? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketRequest<T> {
    /// Payload
    pub dto: OneOrMany<T>,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> SocketRequest<T> {
    /// Envelope around one DTO
    pub fn one(dto: T) -> Self {
        Self {
            dto: OneOrMany::One(dto),
            message: None,
        }
    }

    /// Envelope around a batch
    pub fn many(dtos: Vec<T>) -> Self {
        Self {
            dto: OneOrMany::Many(dtos),
            message: None,
        }
    }

    /// Builder pattern: Set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Every DTO, in order
    pub fn into_vec(self) -> Vec<T> {
        self.dto.into_vec()
    }

    /// The only DTO of an event that carries one
    ///
    /// A batch of exactly one is accepted.
    pub fn into_single(self, event: EventName) -> Result<T, ProtocolError> {
        match self.dto {
            OneOrMany::One(dto) => Ok(dto),
            OneOrMany::Many(mut items) if items.len() == 1 => Ok(items.remove(0)),
            OneOrMany::Many(items) => Err(ProtocolError::ExpectedSingle {
                event,
                count: items.len(),
            }),
        }
    }
}

/// Failure half of a response
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error(
    "request failed (status {}): {}",
    .status.map_or_else(|| "none".to_string(), |s| s.to_string()),
    .message.as_deref().unwrap_or("no message")
)]
pub struct ResponseFailure {
    /// Status code
    pub status: Option<u16>,

    /// Human-readable reason
    pub message: Option<String>,
}

/// Response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum SocketResponse<T> {
    /// `ok: true`
    Success {
        /// Authoritative payload
        dto: T,
        /// Status code
        status: Option<u16>,
        /// Human-readable note
        message: Option<String>,
    },

    /// `ok: false`
    Failure {
        /// Informational payload, never applied
        dto: Option<T>,
        /// Why the request failed
        failure: ResponseFailure,
    },
}

impl<T> SocketResponse<T> {
    /// Successful response
    pub fn success(dto: T) -> Self {
        Self::Success {
            dto,
            status: None,
            message: None,
        }
    }

    /// Failed response without payload
    pub fn failure(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Failure {
            dto: None,
            failure: ResponseFailure {
                status,
                message: Some(message.into()),
            },
        }
    }

    /// Whether this is a success
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Authoritative payload, or the failure
    pub fn into_result(self) -> Result<T, ResponseFailure> {
        match self {
            Self::Success { dto, .. } => Ok(dto),
            Self::Failure { failure, .. } => Err(failure),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawResponse<T> {
    ok: bool,
    dto: Option<T>,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct RawResponseRef<'a, T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    dto: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<T> TryFrom<RawResponse<T>> for SocketResponse<T> {
    type Error = ProtocolError;

    fn try_from(raw: RawResponse<T>) -> Result<Self, Self::Error> {
        match (raw.ok, raw.dto) {
            (true, Some(dto)) => Ok(Self::Success {
                dto,
                status: raw.status,
                message: raw.message,
            }),
            (true, None) => Err(ProtocolError::MissingResponseDto),
            (false, dto) => Ok(Self::Failure {
                dto,
                failure: ResponseFailure {
                    status: raw.status,
                    message: raw.message,
                },
            }),
        }
    }
}

impl<T: Serialize> Serialize for SocketResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            Self::Success { dto, status, message } => RawResponseRef {
                ok: true,
                dto: Some(dto),
                status: *status,
                message: message.as_deref(),
            },
            Self::Failure { dto, failure } => RawResponseRef {
                ok: false,
                dto: dto.as_ref(),
                status: failure.status,
                message: failure.message.as_deref(),
            },
        };
        raw.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SocketResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawResponse::<T>::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}
