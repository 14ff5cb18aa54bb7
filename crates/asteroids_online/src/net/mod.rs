//! Network synchronization

pub mod client;
pub mod reconcile;
pub mod transport;

pub use client::{DropReason, PendingRequest, SyncClient, SyncError, SyncOutcome};
pub use reconcile::{apply_event, apply_response, ReconcileContext, ResponseResult};
pub use transport::{InboundFrame, LoopbackTransport, OutboundFrame, RequestId, Transport, TransportError};
