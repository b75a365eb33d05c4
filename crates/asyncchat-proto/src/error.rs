//! Error types for the protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Protocol-level errors.
///
/// Decoding never fails on content: invalid UTF-8 is replaced and overlong
/// lines are reported as a [`Frame`](crate::Frame), so the only failure left is
/// the underlying transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An I/O error occurred on the underlying stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    /// The I/O error kind, for classifying transport failures.
    pub fn io_kind(&self) -> std::io::ErrorKind {
        match self {
            Self::Io(e) => e.kind(),
        }
    }
}
