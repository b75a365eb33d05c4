//! Error classification for connection reads.

use asyncchat_proto::ProtocolError;
use std::io::ErrorKind;

/// What a read error means for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ReadErrorAction {
    /// The peer went away mid-stream. Close with "transport error".
    Transport,
    /// Anything else. Close with "server error".
    Fault,
}

impl ReadErrorAction {
    pub(super) fn reason(self) -> &'static str {
        match self {
            Self::Transport => "transport error",
            Self::Fault => "server error",
        }
    }
}

/// Classify a codec read error into an actionable category.
pub(super) fn classify_read_error(e: &ProtocolError) -> ReadErrorAction {
    match e.io_kind() {
        ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::UnexpectedEof
        | ErrorKind::BrokenPipe
        | ErrorKind::NotConnected => ReadErrorAction::Transport,
        _ => ReadErrorAction::Fault,
    }
}
