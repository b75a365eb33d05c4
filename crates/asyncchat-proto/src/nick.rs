//! Nickname validation.
//!
//! A nickname is any non-empty run of non-whitespace characters up to a
//! server-configured length. Uniqueness is a server concern, see
//! [`fold_nick`](crate::fold_nick).

use thiserror::Error;

/// Default maximum nickname length, in characters.
pub const DEFAULT_NICK_MAX_LEN: usize = 32;

/// Why a requested nickname was rejected before any uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NickError {
    /// Nothing but whitespace was given.
    #[error("empty nickname")]
    Empty,
    /// The nickname contains a space or other whitespace.
    #[error("nickname contains whitespace")]
    Whitespace,
    /// The nickname is longer than the limit.
    #[error("nickname longer than {max} characters")]
    TooLong {
        /// The configured limit.
        max: usize,
    },
}

/// Validate a requested nickname, returning it trimmed.
///
/// # Examples
///
/// ```
/// use asyncchat_proto::{validate_nick, NickError};
///
/// assert_eq!(validate_nick("  alice ", 32), Ok("alice"));
/// assert_eq!(validate_nick("   ", 32), Err(NickError::Empty));
/// assert_eq!(validate_nick("al ice", 32), Err(NickError::Whitespace));
/// ```
pub fn validate_nick(requested: &str, max_len: usize) -> Result<&str, NickError> {
    let nick = requested.trim();
    if nick.is_empty() {
        return Err(NickError::Empty);
    }
    if nick.chars().any(char::is_whitespace) {
        return Err(NickError::Whitespace);
    }
    if nick.chars().count() > max_len {
        return Err(NickError::TooLong { max: max_len });
    }
    Ok(nick)
}
