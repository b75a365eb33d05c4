//! Connection registry and nickname directory.
//!
//! The [`Roster`] keeps both indexes in one structure so a single lock covers
//! them. Invariant: a session has `nick == Some(n)` exactly when the directory
//! maps `fold_nick(n)` to that session's id.

use crate::error::RosterError;
use crate::state::{ConnId, Session};
use asyncchat_proto::fold_nick;
use std::collections::HashMap;

/// Registry of live connections plus the nickname directory.
#[derive(Debug, Default)]
pub struct Roster {
    /// Registry: connection -> session.
    sessions: HashMap<ConnId, Session>,
    /// Directory: folded nickname -> connection.
    nicks: HashMap<String, ConnId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection. Any nickname carried by `session` is ignored.
    pub fn register(&mut self, id: ConnId, mut session: Session) {
        session.nick = None;
        if let Some(stale) = self.sessions.insert(id, session) {
            self.forget_nick(&stale);
        }
    }

    /// Install `nick` for `id`, replacing its previous nickname.
    ///
    /// Returns the previous nickname, `None` on a first set. Fails with
    /// [`RosterError::NameTaken`] if any connection (including `id` itself)
    /// holds a case-insensitive match.
    pub fn set_nickname(&mut self, id: ConnId, nick: &str) -> Result<Option<String>, RosterError> {
        let key = fold_nick(nick);
        if self.nicks.contains_key(&key) {
            return Err(RosterError::NameTaken(nick.to_string()));
        }
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(RosterError::UnknownConnection(id))?;

        let previous = session.nick.replace(nick.to_string());
        if let Some(old) = &previous {
            self.nicks.remove(&fold_nick(old));
        }
        self.nicks.insert(key, id);
        Ok(previous)
    }

    /// Resolve a nickname to its connection.
    ///
    /// Only the stored spelling matches: uniqueness ignores case, lookup
    /// does not.
    pub fn lookup(&self, nick: &str) -> Result<ConnId, RosterError> {
        self.nicks
            .get(&fold_nick(nick))
            .copied()
            .filter(|id| self.nickname(*id) == Some(nick))
            .ok_or_else(|| RosterError::NotFound(nick.to_string()))
    }

    /// Remove a connection from both indexes. `None` if already gone.
    pub fn remove(&mut self, id: ConnId) -> Option<Session> {
        let session = self.sessions.remove(&id)?;
        self.forget_nick(&session);
        Some(session)
    }

    fn forget_nick(&mut self, session: &Session) {
        if let Some(nick) = &session.nick {
            self.nicks.remove(&fold_nick(nick));
        }
    }

    pub fn session(&self, id: ConnId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn nickname(&self, id: ConnId) -> Option<&str> {
        self.sessions.get(&id).and_then(|s| s.nick.as_deref())
    }

    /// All nicknames, sorted case-insensitively.
    pub fn nicknames(&self) -> Vec<String> {
        let mut nicks: Vec<String> = self
            .sessions
            .values()
            .filter_map(|s| s.nick.clone())
            .collect();
        nicks.sort_by_cached_key(|n| fold_nick(n));
        nicks
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConnId, &Session)> {
        self.sessions.iter().map(|(id, s)| (*id, s))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Panic if the registry and directory disagree.
    #[cfg(test)]
    pub fn assert_consistent(&self) {
        for (id, session) in &self.sessions {
            if let Some(nick) = &session.nick {
                assert_eq!(
                    self.nicks.get(&fold_nick(nick)),
                    Some(id),
                    "directory entry for {nick} does not point at {id}"
                );
            }
        }
        for (key, id) in &self.nicks {
            let session = self
                .sessions
                .get(id)
                .unwrap_or_else(|| panic!("directory entry {key} points at missing {id}"));
            assert_eq!(session.nick.as_deref().map(fold_nick).as_ref(), Some(key));
        }
    }
}
