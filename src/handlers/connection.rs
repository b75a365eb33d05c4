//! Connection-level commands: `/nick` and `/quit`.

use super::{Context, HandlerError, HandlerResult};
use asyncchat_proto::{reply, validate_nick};
use tracing::info;

/// `/nick <name>`: set or change the issuing connection's nickname.
pub fn handle_nick(ctx: &Context<'_>, requested: &str) -> HandlerResult {
    let nick = validate_nick(requested, ctx.hub.limits.max_nick_len)?;

    match ctx.hub.set_nickname(ctx.id, nick)? {
        Some(old) => {
            info!(old = %old, new = %nick, "Nick change");
            ctx.hub.broadcast(&reply::renamed_body(&old, nick), &[]);
        }
        None => {
            info!(new = %nick, "Nick set");
            ctx.reply(reply::nick_confirmed(nick))?;
            ctx.hub.broadcast(&reply::joined_body(nick), &[ctx.id]);
        }
    }
    Ok(())
}

/// `/quit`: end the session.
pub fn handle_quit(ctx: &Context<'_>) -> HandlerResult {
    info!(conn = %ctx.id, nick = ?ctx.nick(), "Client quit");
    Err(HandlerError::Quit)
}
