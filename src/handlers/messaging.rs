//! Message commands: public chat, `/msg` and `/me`.

use super::{Context, HandlerError, HandlerResult};
use crate::error::RosterError;
use asyncchat_proto::{reply, stamped};
use chrono::Local;
use tracing::{debug, info};

/// Characters of a public message kept in the log preview.
const PREVIEW_CHARS: usize = 80;

/// A non-command line: broadcast to everyone, sender included.
pub fn handle_chat(ctx: &Context<'_>, text: &str) -> HandlerResult {
    let nick = ctx.require_nick()?;

    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    info!(from = %nick, len = text.len(), preview = %preview, "Public message");

    ctx.hub.broadcast(&reply::chat_body(&nick, text), &[]);
    Ok(())
}

/// `/msg <user> <text>`
///
/// Delivery to the target is best effort. Only the echo to the sender can
/// fail the request.
pub fn handle_msg(ctx: &Context<'_>, target: Option<&str>, text: Option<&str>) -> HandlerResult {
    let (Some(target), Some(text)) = (target, text) else {
        return Err(HandlerError::Usage(reply::MSG_USAGE));
    };
    let sender = ctx.require_nick()?;

    let recipient = match ctx.hub.lookup(target) {
        Ok(id) => id,
        Err(e @ RosterError::NotFound(_)) => {
            info!(from = %sender, to = %target, "PM target not found");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let line = stamped(&Local::now(), &reply::pm_body(&sender, text));
    if let Err(e) = ctx.hub.unicast(recipient, line) {
        debug!(to = %target, error = %e, "PM delivery dropped");
    }

    ctx.reply(reply::pm_echo(target, text))?;
    info!(from = %sender, to = %target, len = text.len(), "PM sent");
    Ok(())
}

/// `/me <action>`: emote to everyone, sender included.
pub fn handle_me(ctx: &Context<'_>, action: &str) -> HandlerResult {
    if action.is_empty() {
        return Err(HandlerError::Usage(reply::ME_USAGE));
    }
    let nick = ctx.require_nick()?;

    info!(nick = %nick, action = %action, "Emote");
    ctx.hub.broadcast(&reply::emote_body(&nick, action), &[]);
    Ok(())
}
