//! Reply texts.
//!
//! Direct replies go only to the issuing client and carry no timestamp.
//! Broadcast bodies are returned without the `[HH:MM] ` prefix and newline,
//! which [`stamped`](crate::stamped) adds at delivery time.

/// Command summary returned by `/help`.
pub const HELP: &str = "\nCommands:\n\
/nick <name>       Set or change your nickname\n\
/list              List connected users\n\
/msg <user> <txt>  Send a private message\n\
/me <action>       Emote (e.g., /me waves)\n\
/quit              Disconnect\n";

/// Sent to unnamed clients trying to talk.
pub const SET_NICK_FIRST: &str = "Set your nickname first: /nick <name>\n";
/// `/nick` without a name.
pub const NICK_USAGE: &str = "Usage: /nick <name>\n";
/// `/msg` missing a target or body.
pub const MSG_USAGE: &str = "Usage: /msg <user> <message>\n";
/// `/me` without an action.
pub const ME_USAGE: &str = "Usage: /me <action>\n";
/// Nickname contains whitespace.
pub const NICK_NO_SPACES: &str = "Nickname cannot contain spaces.\n";
/// Nickname collides with a connected user.
pub const NICK_IN_USE: &str = "Nickname already in use. Try another.\n";
/// Fallback for unrecognised commands.
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type /help\n";
/// Inbound line exceeded the server limit and was dropped.
pub const LINE_TOO_LONG: &str = "Line too long.\n";

/// Greeting sent on connect.
pub fn welcome(server_name: &str) -> String {
    format!(
        "Welcome to {server_name}!\n\
         Type /help for commands.\n\
         First, set your nickname with: /nick <name>\n"
    )
}

/// Nickname exceeds the configured length.
pub fn nick_too_long(max: usize) -> String {
    format!("Nickname too long (max {max} characters).\n")
}

/// Private confirmation of a first nickname.
pub fn nick_confirmed(nick: &str) -> String {
    format!("OK. You are now '{nick}'.\n")
}

/// `/list` output.
pub fn user_list(nicks: &[String]) -> String {
    format!("Users ({}): {}\n", nicks.len(), nicks.join(", "))
}

/// `/msg` target is not connected.
pub fn user_not_found(target: &str) -> String {
    format!("User '{target}' not found.\n")
}

/// Echo of a private message back to its sender.
pub fn pm_echo(target: &str, text: &str) -> String {
    format!("[PM -> {target}] {text}\n")
}

/// Private message body as seen by the recipient.
pub fn pm_body(sender: &str, text: &str) -> String {
    format!("[PM] <{sender}> {text}")
}

/// Public chat body.
pub fn chat_body(sender: &str, text: &str) -> String {
    format!("<{sender}> {text}")
}

/// Emote body.
pub fn emote_body(nick: &str, action: &str) -> String {
    format!("* {nick} {action}")
}

/// First nickname announced to others.
pub fn joined_body(nick: &str) -> String {
    format!("* {nick} joined the chat")
}

/// Rename announced to everyone.
pub fn renamed_body(old: &str, new: &str) -> String {
    format!("* {old} is now known as {new}")
}

/// Departure announced to the remaining users.
pub fn left_body(nick: &str, reason: &str) -> String {
    format!("* {nick} left ({reason})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_has_three_lines() {
        let text = welcome("AsyncChat");
        assert!(text.starts_with("Welcome to AsyncChat!\n"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("/nick <name>\n"));
    }

    #[test]
    fn test_help_lists_every_command() {
        for cmd in ["/nick", "/list", "/msg", "/me", "/quit"] {
            assert!(HELP.contains(cmd), "missing {cmd}");
        }
        assert!(HELP.starts_with("\nCommands:\n"));
    }

    #[test]
    fn test_user_list() {
        let nicks = vec!["alice".to_string(), "Bob".to_string()];
        assert_eq!(user_list(&nicks), "Users (2): alice, Bob\n");
        assert_eq!(user_list(&[]), "Users (0): \n");
    }
}
