//! Read-only queries: `/help` and `/list`.

use super::{Context, HandlerResult};
use asyncchat_proto::reply;

/// `/help`
pub fn handle_help(ctx: &Context<'_>) -> HandlerResult {
    ctx.reply(reply::HELP)
}

/// `/list`: nicknames sorted case-insensitively, with a count.
pub fn handle_list(ctx: &Context<'_>) -> HandlerResult {
    let nicks = ctx.hub.nicknames();
    ctx.reply(reply::user_list(&nicks))
}
