//! Network sync client
//!
//! Owns the outbound transport, the inbound frame queue and the table of
//! requests waiting for a response. Frames queue up between ticks and are
//! applied together by [`SyncClient::drain`] before the systems run.

use super::reconcile::{apply_event, apply_response, ReconcileContext, ResponseResult};
use super::transport::{InboundFrame, OutboundFrame, RequestId, Transport, TransportError};
use crate::dto::ValidationError;
use crate::protocol::{decode_server_event, encode_request, Direction, EventName, ProtocolError, ResponseFailure, SocketRequest};
use arcade_engine::prelude::EntityId;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use thiserror::Error;

/// Sync client errors
#[derive(Error, Debug)]
pub enum SyncError {
    /// Encoding or catalogue error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Socket error
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A request waiting for its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Event the request was sent as
    pub event: EventName,

    /// Transport generation the request was emitted on
    pub epoch: u64,

    /// Entity the response applies to, if any
    pub target: Option<EntityId>,
}

/// Why a response was dropped without effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No request with this id was ever sent
    Unknown,

    /// The request was abandoned by a disconnect
    Abandoned,

    /// The entity the response targets is gone
    TargetGone,
}

/// What happened to one inbound frame
#[derive(Debug)]
pub enum SyncOutcome {
    /// Server event applied
    Applied(EventName),

    /// One DTO of a server event failed validation and was skipped
    Rejected {
        /// Event carrying the DTO
        event: EventName,
        /// Validation failure
        error: ValidationError,
    },

    /// Event could not be decoded
    Malformed {
        /// Wire event name as received
        event: String,
        /// Decode failure
        error: ProtocolError,
    },

    /// Response applied
    Responded {
        /// Request id
        id: RequestId,
        /// Request event
        event: EventName,
    },

    /// Server refused a request
    Failed {
        /// Request id
        id: RequestId,
        /// Request event
        event: EventName,
        /// Status and message
        failure: ResponseFailure,
    },

    /// Response ignored
    Dropped {
        /// Request id
        id: RequestId,
        /// Why
        reason: DropReason,
    },

    /// Socket connected
    Connected,

    /// Socket dropped
    Disconnected {
        /// Requests abandoned
        abandoned: usize,
    },
}

/// Client side of the socket protocol
pub struct SyncClient {
    transport: Box<dyn Transport>,
    inbox: Receiver<InboundFrame>,
    pending: HashMap<RequestId, PendingRequest>,
    next_id: RequestId,
    epoch: u64,
    epoch_start: RequestId,
}

impl SyncClient {
    /// Client reading frames from `inbox`
    pub fn new(transport: Box<dyn Transport>, inbox: Receiver<InboundFrame>) -> Self {
        Self {
            transport,
            inbox,
            pending: HashMap::new(),
            next_id: 1,
            epoch: 0,
            epoch_start: 1,
        }
    }

    /// Client over a transport built around a fresh inbox
    pub fn with_transport<T, F>(make_transport: F) -> (Self, T)
    where
        T: Transport + Clone + 'static,
        F: FnOnce(Sender<InboundFrame>) -> T,
    {
        let (sender, receiver) = mpsc::channel();
        let transport = make_transport(sender);
        (Self::new(Box::new(transport.clone()), receiver), transport)
    }

    /// Whether the transport is connected
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Number of disconnects drained so far
    ///
    /// Pending requests emitted on an earlier generation than this are dead.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of requests waiting for a response
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending request with this id
    pub fn pending(&self, id: RequestId) -> Option<&PendingRequest> {
        self.pending.get(&id)
    }

    /// Send a request and remember it until its response arrives
    ///
    /// `target` names the entity the response applies to; the response is
    /// dropped if that entity is gone by then.
    pub fn request<T: Serialize>(
        &mut self,
        event: EventName,
        envelope: &SocketRequest<T>,
        target: Option<EntityId>,
    ) -> Result<RequestId, SyncError> {
        event.expect_direction(Direction::Request)?;
        let body = encode_request(envelope)?;

        let id = self.next_id;
        let epoch = self.transport.generation();
        self.transport.emit(OutboundFrame::Request {
            id,
            event: event.as_str(),
            body,
        })?;
        self.next_id += 1;
        self.pending.insert(
            id,
            PendingRequest { event, epoch, target },
        );

        log::debug!("Request {} sent as {}", id, event);
        Ok(id)
    }

    /// Send a fire-and-forget message
    pub fn notify<T: Serialize>(&mut self, event: EventName, envelope: &SocketRequest<T>) -> Result<(), SyncError> {
        event.expect_direction(Direction::Notify)?;
        let body = encode_request(envelope)?;
        self.transport.emit(OutboundFrame::Notify {
            event: event.as_str(),
            body,
        })?;
        Ok(())
    }

    /// Apply every queued frame, in arrival order
    pub fn drain(&mut self, ctx: &mut ReconcileContext<'_>) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::new();

        loop {
            let frame = match self.inbox.try_recv() {
                Ok(frame) => frame,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::trace!("Inbox closed");
                    break;
                }
            };

            match frame {
                InboundFrame::Event { event, body } => self.on_event(ctx, event, &body, &mut outcomes),
                InboundFrame::Response { id, body } => outcomes.push(self.on_response(ctx, id, &body)),
                InboundFrame::Connected => {
                    log::info!("Connected (epoch {})", self.epoch);
                    outcomes.push(SyncOutcome::Connected);
                }
                InboundFrame::Disconnected => outcomes.push(self.on_disconnect()),
            }
        }

        outcomes
    }

    fn on_event(&mut self, ctx: &mut ReconcileContext<'_>, event: String, body: &str, outcomes: &mut Vec<SyncOutcome>) {
        match decode_server_event(&event, body) {
            Ok(decoded) => {
                let name = decoded.name();
                log::trace!("<- {}", name);
                outcomes.extend(
                    apply_event(ctx, decoded)
                        .into_iter()
                        .map(|error| SyncOutcome::Rejected { event: name, error }),
                );
                outcomes.push(SyncOutcome::Applied(name));
            }
            Err(error) => {
                log::warn!("Dropping {} event: {}", event, error);
                outcomes.push(SyncOutcome::Malformed { event, error });
            }
        }
    }

    fn on_response(&mut self, ctx: &mut ReconcileContext<'_>, id: RequestId, body: &str) -> SyncOutcome {
        let Some(pending) = self.pending.remove(&id) else {
            let reason = if id < self.epoch_start {
                DropReason::Abandoned
            } else {
                DropReason::Unknown
            };
            log::debug!("Dropping response {} ({:?})", id, reason);
            return SyncOutcome::Dropped { id, reason };
        };

        if pending.epoch < self.epoch {
            return SyncOutcome::Dropped {
                id,
                reason: DropReason::Abandoned,
            };
        }
        if let Some(target) = &pending.target {
            if !ctx.spawn.world.contains(target) {
                log::debug!("Dropping response {}, {} is gone", id, target);
                return SyncOutcome::Dropped {
                    id,
                    reason: DropReason::TargetGone,
                };
            }
        }

        match apply_response(ctx, &pending, body) {
            ResponseResult::Applied => SyncOutcome::Responded { id, event: pending.event },
            ResponseResult::Failed(failure) => SyncOutcome::Failed {
                id,
                event: pending.event,
                failure,
            },
            ResponseResult::Malformed(error) => SyncOutcome::Malformed {
                event: pending.event.as_str().to_string(),
                error,
            },
        }
    }

    fn on_disconnect(&mut self) -> SyncOutcome {
        self.epoch += 1;
        self.epoch_start = self.next_id;

        // Requests emitted after a reconnect that is still queued survive
        let before = self.pending.len();
        let epoch = self.epoch;
        self.pending.retain(|_, pending| pending.epoch >= epoch);
        let abandoned = before - self.pending.len();

        log::warn!("Disconnected, abandoned {} pending requests", abandoned);
        SyncOutcome::Disconnected { abandoned }
    }
}
