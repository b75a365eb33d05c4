//! The Hub - process-wide shared state for the chat server.
//!
//! The Hub owns the [`Roster`] behind one `parking_lot` mutex, so the
//! registry and nickname directory always change together. The lock is
//! never held across an `.await`.

use crate::config::{Config, LimitsConfig};
use crate::error::RosterError;
use crate::state::{ConnId, ConnIdGenerator, Outbox, Roster, Session};
use asyncchat_proto::reply;
use chrono::Utc;
use parking_lot::Mutex;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Central shared state, one per server process.
pub struct Hub {
    /// Registry and directory under a single lock.
    pub(super) roster: Mutex<Roster>,
    /// Id generator for accepted connections.
    conn_ids: ConnIdGenerator,
    /// Name shown in the welcome banner.
    pub server_name: String,
    /// Per-connection limits.
    pub limits: LimitsConfig,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        Self {
            roster: Mutex::new(Roster::new()),
            conn_ids: ConnIdGenerator::new(),
            server_name: config.server.name.clone(),
            limits: config.limits.clone(),
        }
    }

    /// Allocate an id for a freshly accepted connection.
    pub fn next_conn_id(&self) -> ConnId {
        self.conn_ids.next()
    }

    /// Register a connection with no nickname.
    pub fn register(
        &self,
        id: ConnId,
        peer: SocketAddr,
        outbox: Outbox,
        closer: CancellationToken,
    ) {
        let session = Session::new(peer, outbox, closer);
        self.roster.lock().register(id, session);
    }

    pub fn nickname(&self, id: ConnId) -> Option<String> {
        self.roster.lock().nickname(id).map(str::to_owned)
    }

    /// Install a nickname, returning the one it replaced.
    pub fn set_nickname(&self, id: ConnId, nick: &str) -> Result<Option<String>, RosterError> {
        self.roster.lock().set_nickname(id, nick)
    }

    pub fn lookup(&self, nick: &str) -> Result<ConnId, RosterError> {
        self.roster.lock().lookup(nick)
    }

    /// Current nicknames, sorted case-insensitively.
    pub fn nicknames(&self) -> Vec<String> {
        self.roster.lock().nicknames()
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.roster.lock().len()
    }

    /// Tear a connection down.
    ///
    /// Removes it from the roster, fires its close signal and, if it had a
    /// nickname, tells everyone else it left. Returns `false` when the
    /// connection was already gone, in which case nothing happens.
    pub fn disconnect(&self, id: ConnId, reason: &str) -> bool {
        let Some(session) = self.roster.lock().remove(id) else {
            return false;
        };
        session.close();

        info!(
            conn = %id,
            peer = %session.peer,
            nick = session.display_nick(),
            reason,
            online_secs = (Utc::now() - session.connected_at).num_seconds(),
            "Connection closed"
        );

        if let Some(nick) = &session.nick {
            self.broadcast(&reply::left_body(nick, reason), &[]);
        }
        true
    }
}
