//! Transport seam
//!
//! The socket itself lives outside the crate. Outbound frames go through
//! [`Transport::emit`]; inbound frames are pushed by the socket into the
//! client's inbox and drained once per tick.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Correlates a request with its response
pub type RequestId = u64;

/// Frame sent to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Request expecting a response with the same id
    Request {
        /// Correlation id
        id: RequestId,
        /// Wire event name
        event: &'static str,
        /// Encoded request envelope
        body: String,
    },

    /// Fire-and-forget message
    Notify {
        /// Wire event name
        event: &'static str,
        /// Encoded request envelope
        body: String,
    },
}

impl OutboundFrame {
    /// Wire event name
    pub fn event(&self) -> &'static str {
        match self {
            Self::Request { event, .. } | Self::Notify { event, .. } => event,
        }
    }

    /// Encoded envelope
    pub fn body(&self) -> &str {
        match self {
            Self::Request { body, .. } | Self::Notify { body, .. } => body,
        }
    }
}

/// Frame received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Server-initiated event
    Event {
        /// Wire event name
        event: String,
        /// Encoded envelope
        body: String,
    },

    /// Answer to an earlier request
    Response {
        /// Correlation id of the request
        id: RequestId,
        /// Encoded response envelope
        body: String,
    },

    /// Socket (re)connected
    Connected,

    /// Socket dropped
    Disconnected,
}

/// Transport errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Emit attempted while disconnected
    #[error("Transport is disconnected, dropped {event}")]
    Disconnected {
        /// Event that could not be sent
        event: &'static str,
    },

    /// The socket refused the frame
    #[error("Transport failed: {0}")]
    Failed(String),
}

/// Outbound half of a socket
pub trait Transport {
    /// Send a frame
    fn emit(&mut self, frame: OutboundFrame) -> Result<(), TransportError>;

    /// Whether frames can currently be sent
    fn is_connected(&self) -> bool;

    /// Connection generation
    ///
    /// Starts at 0 and goes up by one each time the socket drops, in step with
    /// the [`InboundFrame::Disconnected`] frames it delivers. A request emitted
    /// on the current connection carries the current generation.
    fn generation(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
struct Link {
    connected: bool,
    generation: u64,
}

/// In-memory transport
///
/// Records every emitted frame and can push inbound frames into a client's
/// inbox. Clones share state, so a test or demo keeps one clone as the
/// "server side" while the client owns the other.
#[derive(Clone)]
pub struct LoopbackTransport {
    sent: Arc<Mutex<Vec<OutboundFrame>>>,
    link: Arc<Mutex<Link>>,
    inbox: Sender<InboundFrame>,
}

impl LoopbackTransport {
    /// Connected transport delivering into `inbox`
    pub fn new(inbox: Sender<InboundFrame>) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            link: Arc::new(Mutex::new(Link {
                connected: true,
                generation: 0,
            })),
            inbox,
        }
    }

    /// Take every frame emitted so far
    pub fn take_sent(&self) -> Vec<OutboundFrame> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Deliver a frame to the client
    ///
    /// Returns false when the client side has been dropped.
    pub fn deliver(&self, frame: InboundFrame) -> bool {
        self.inbox.send(frame).is_ok()
    }

    /// Deliver a server event
    pub fn deliver_event(&self, event: &str, body: impl Into<String>) -> bool {
        self.deliver(InboundFrame::Event {
            event: event.to_string(),
            body: body.into(),
        })
    }

    /// Deliver a response
    pub fn deliver_response(&self, id: RequestId, body: impl Into<String>) -> bool {
        self.deliver(InboundFrame::Response { id, body: body.into() })
    }

    /// Drop the connection, notifying the client
    pub fn disconnect(&self) {
        {
            let mut link = self.link();
            link.connected = false;
            link.generation += 1;
        }
        self.deliver(InboundFrame::Disconnected);
    }

    /// Restore the connection, notifying the client
    pub fn reconnect(&self) {
        self.link().connected = true;
        self.deliver(InboundFrame::Connected);
    }

    fn link(&self) -> MutexGuard<'_, Link> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for LoopbackTransport {
    fn emit(&mut self, frame: OutboundFrame) -> Result<(), TransportError> {
        if !self.is_connected() {
            return Err(TransportError::Disconnected { event: frame.event() });
        }
        log::trace!("-> {} {}", frame.event(), frame.body());
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(frame);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.link().connected
    }

    fn generation(&self) -> u64 {
        self.link().generation
    }
}
