//! Unified error handling for asyncchatd.
//!
//! This module provides the error hierarchy for the chat server: handler
//! errors (user-visible or connection-ending), roster errors from the
//! registry/directory, and delivery errors from the outbound queues.

use crate::state::ConnId;
use asyncchat_proto::{NickError, reply};
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Malformed arguments; carries the usage line to send back.
    #[error("usage: {}", .0.trim_end())]
    Usage(&'static str),

    #[error("nickname contains whitespace")]
    NickWhitespace,

    #[error("nickname longer than {0} characters")]
    NickTooLong(usize),

    #[error("not registered")]
    NotRegistered,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("send error: {0}")]
    Send(#[from] DeliveryError),

    #[error("client quit")]
    Quit,
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::NickWhitespace => "nick_whitespace",
            Self::NickTooLong(_) => "nick_too_long",
            Self::NotRegistered => "not_registered",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Send(_) => "send_error",
            Self::Quit => "quit",
        }
    }

    /// Convert to the one-line reply shown to the issuing client.
    ///
    /// Returns `None` for errors that end the connection instead
    /// (send failures and quit).
    pub fn to_reply(&self) -> Option<String> {
        let text = match self {
            Self::Usage(usage) => (*usage).to_string(),
            Self::NickWhitespace => reply::NICK_NO_SPACES.to_string(),
            Self::NickTooLong(max) => reply::nick_too_long(*max),
            Self::NotRegistered => reply::SET_NICK_FIRST.to_string(),
            Self::NicknameInUse(_) => reply::NICK_IN_USE.to_string(),
            Self::NoSuchNick(target) => reply::user_not_found(target),
            Self::UnknownCommand(_) => reply::UNKNOWN_COMMAND.to_string(),

            // These errors don't get client-visible replies
            Self::Send(_) => return None,
            Self::Quit => return None,
        };
        Some(text)
    }

    /// The disconnect reason if this error ends the connection.
    pub fn disconnect_reason(&self) -> Option<&'static str> {
        match self {
            Self::Quit => Some("quit"),
            Self::Send(_) => Some("send failed"),
            _ => None,
        }
    }
}

impl From<NickError> for HandlerError {
    fn from(e: NickError) -> Self {
        match e {
            NickError::Empty => Self::Usage(reply::NICK_USAGE),
            NickError::Whitespace => Self::NickWhitespace,
            NickError::TooLong { max } => Self::NickTooLong(max),
        }
    }
}

impl From<RosterError> for HandlerError {
    fn from(e: RosterError) -> Self {
        match e {
            RosterError::NameTaken(nick) => Self::NicknameInUse(nick),
            RosterError::NotFound(nick) => Self::NoSuchNick(nick),
            // Another task already tore this connection down.
            RosterError::UnknownConnection(_) => Self::Send(DeliveryError::Gone),
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Roster Errors (registry / directory)
// ============================================================================

/// Registry and directory failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A case-insensitive match already owns the nickname.
    #[error("nickname already taken: {0}")]
    NameTaken(String),

    /// No connection owns the nickname.
    #[error("no such nickname: {0}")]
    NotFound(String),

    /// The connection is not (or no longer) registered.
    #[error("unknown connection {0}")]
    UnknownConnection(ConnId),
}

// ============================================================================
// Delivery Errors (outbound queues)
// ============================================================================

/// Failure to hand a line to a connection's outbound queue.
///
/// There is no retry: either variant means the recipient is treated as dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("connection is gone")]
    Gone,

    #[error("outbound queue is full")]
    Backlogged,
}

impl<T> From<TrySendError<T>> for DeliveryError {
    fn from(e: TrySendError<T>) -> Self {
        match e {
            TrySendError::Full(_) => Self::Backlogged,
            TrySendError::Closed(_) => Self::Gone,
        }
    }
}
