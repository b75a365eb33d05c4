//! Per-connection session state.
//!
//! A [`Session`] is what the registry knows about a live connection: where it
//! came from, its nickname once set, and the handles needed to reach it. The
//! socket itself stays with the connection task.

use crate::error::DeliveryError;
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Outbound line queue for one connection.
pub type Outbox = mpsc::Sender<Arc<str>>;

/// Mutable state attached to a registered connection.
#[derive(Debug)]
pub struct Session {
    /// Remote peer address.
    pub peer: SocketAddr,
    /// Nickname, `None` until the first successful `/nick`.
    pub nick: Option<String>,
    /// When the connection was accepted.
    pub connected_at: DateTime<Utc>,
    /// Queue drained to the socket by the connection task.
    outbox: Outbox,
    /// Fired when another task tears the connection down.
    closer: CancellationToken,
}

impl Session {
    pub fn new(peer: SocketAddr, outbox: Outbox, closer: CancellationToken) -> Self {
        Self {
            peer,
            nick: None,
            connected_at: Utc::now(),
            outbox,
            closer,
        }
    }

    /// Enqueue a line without waiting.
    pub fn deliver(&self, line: Arc<str>) -> Result<(), DeliveryError> {
        self.outbox.try_send(line).map_err(DeliveryError::from)
    }

    /// Signal the owning connection task to stop.
    pub fn close(&self) {
        self.closer.cancel();
    }

    /// Nickname or a placeholder for logs.
    pub fn display_nick(&self) -> &str {
        self.nick.as_deref().unwrap_or("(unnamed)")
    }
}
