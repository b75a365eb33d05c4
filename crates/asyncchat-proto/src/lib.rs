//! # asyncchat-proto
//!
//! The AsyncChat wire protocol: newline-delimited UTF-8 text where a line
//! starting with `/` is a command and anything else is public chat.
//!
//! ## Features
//!
//! - Closed [`Command`] enum parsed once per line
//! - Nickname case folding and validation
//! - Canonical reply texts shared by the server and its tests
//! - Optional Tokio line codec with lossy UTF-8 decoding and a length cap
//!
//! ## Quick Start
//!
//! ```rust
//! use asyncchat_proto::Command;
//!
//! assert_eq!(Command::parse("/nick alice"), Command::Nick("alice"));
//! assert_eq!(
//!     Command::parse("/MSG bob hi there"),
//!     Command::Msg { target: Some("bob"), text: Some("hi there") },
//! );
//! assert_eq!(Command::parse("hello"), Command::Chat("hello"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod command;
pub mod error;
pub mod format;
#[cfg(feature = "tokio")]
pub mod line;
pub mod nick;
pub mod reply;

pub use self::casemap::fold_nick;
pub use self::command::{Command, COMMAND_PREFIX};
pub use self::error::ProtocolError;
pub use self::format::{clock, stamped};
#[cfg(feature = "tokio")]
pub use self::line::{Frame, LineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::nick::{validate_nick, NickError, DEFAULT_NICK_MAX_LEN};
