//! Chat command handlers.
//!
//! Each inbound line is parsed once into a [`Command`] and routed here by
//! [`dispatch`]. Handlers run synchronously: every state change happens under
//! the Hub lock and every write is a non-blocking enqueue, so there is nothing
//! to await.

mod connection;
mod messaging;
mod server_query;

pub use crate::error::{HandlerError, HandlerResult};

use crate::state::{ConnId, Hub};
use asyncchat_proto::Command;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The issuing connection.
    pub id: ConnId,
    /// Shared server state.
    pub hub: &'a Hub,
    /// Remote address of the client.
    pub peer: SocketAddr,
}

impl<'a> Context<'a> {
    pub fn new(id: ConnId, hub: &'a Hub, peer: SocketAddr) -> Self {
        Self { id, hub, peer }
    }

    /// Send a direct (unprefixed) reply to the issuing connection.
    pub fn reply(&self, text: impl Into<Arc<str>>) -> HandlerResult {
        self.hub.unicast(self.id, text)?;
        Ok(())
    }

    /// The issuing connection's nickname, if set.
    pub fn nick(&self) -> Option<String> {
        self.hub.nickname(self.id)
    }

    /// The nickname, or [`HandlerError::NotRegistered`].
    pub fn require_nick(&self) -> Result<String, HandlerError> {
        self.nick().ok_or(HandlerError::NotRegistered)
    }
}

/// Route a parsed line to its handler.
pub fn dispatch(ctx: &Context<'_>, command: Command<'_>) -> HandlerResult {
    if command.is_command() {
        info!(
            cmd = command.name(),
            args = ?command.args(),
            nick = ?ctx.nick(),
            "Command"
        );
    }

    match command {
        Command::Empty => Ok(()),
        Command::Chat(text) => messaging::handle_chat(ctx, text),
        Command::Help => server_query::handle_help(ctx),
        Command::Quit => connection::handle_quit(ctx),
        Command::Nick(name) => connection::handle_nick(ctx, name),
        Command::List => server_query::handle_list(ctx),
        Command::Msg { target, text } => messaging::handle_msg(ctx, target, text),
        Command::Me(action) => messaging::handle_me(ctx, action),
        Command::Unknown(token) => Err(HandlerError::UnknownCommand(token.to_string())),
    }
}
