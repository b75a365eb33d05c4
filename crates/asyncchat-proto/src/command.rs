//! Command parsing.
//!
//! Every inbound line maps to exactly one [`Command`]. Parsing borrows from
//! the line and never fails: malformed arguments are carried through so the
//! handler can answer with the right usage hint.

/// Prefix marking a line as a command.
pub const COMMAND_PREFIX: char = '/';

/// A parsed client line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Empty line; ignored.
    Empty,
    /// Public chat text (the whole line, verbatim).
    Chat(&'a str),
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// `/nick <name>` with the rest of the line, trimmed. May be empty.
    Nick(&'a str),
    /// `/list`
    List,
    /// `/msg <user> <text>`; either part may be missing.
    Msg {
        /// Target nickname.
        target: Option<&'a str>,
        /// Message body (remainder of the line).
        text: Option<&'a str>,
    },
    /// `/me <action>` with the rest of the line, trimmed. May be empty.
    Me(&'a str),
    /// Any other `/token`, as typed.
    Unknown(&'a str),
}

/// Split off the first whitespace-delimited word.
///
/// Returns the word and the remainder with leading whitespace removed.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl<'a> Command<'a> {
    /// Parse a line with its terminator already stripped.
    pub fn parse(line: &'a str) -> Self {
        if line.is_empty() {
            return Command::Empty;
        }
        if !line.starts_with(COMMAND_PREFIX) {
            return Command::Chat(line);
        }

        let (token, rest) = split_word(line);
        let name = &token[COMMAND_PREFIX.len_utf8()..];

        if name.eq_ignore_ascii_case("help") {
            Command::Help
        } else if name.eq_ignore_ascii_case("quit") {
            Command::Quit
        } else if name.eq_ignore_ascii_case("nick") {
            Command::Nick(rest.trim())
        } else if name.eq_ignore_ascii_case("list") {
            Command::List
        } else if name.eq_ignore_ascii_case("msg") {
            let (target, text) = split_word(rest);
            Command::Msg {
                target: non_empty(target),
                text: non_empty(text),
            }
        } else if name.eq_ignore_ascii_case("me") {
            Command::Me(rest.trim())
        } else {
            Command::Unknown(token)
        }
    }

    /// Canonical command name for logging (`/nick`, `chat`, ...).
    pub fn name(&self) -> &'a str {
        match *self {
            Command::Empty => "",
            Command::Chat(_) => "chat",
            Command::Help => "/help",
            Command::Quit => "/quit",
            Command::Nick(_) => "/nick",
            Command::List => "/list",
            Command::Msg { .. } => "/msg",
            Command::Me(_) => "/me",
            Command::Unknown(token) => token,
        }
    }

    /// Arguments as given, for logging.
    pub fn args(&self) -> Vec<&'a str> {
        match *self {
            Command::Nick(name) => non_empty(name).into_iter().collect(),
            Command::Me(action) => non_empty(action).into_iter().collect(),
            Command::Msg { target, text } => target.into_iter().chain(text).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether this line is a slash command (as opposed to chat or nothing).
    pub fn is_command(&self) -> bool {
        !matches!(self, Command::Empty | Command::Chat(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_chat() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("hello"), Command::Chat("hello"));
        assert_eq!(Command::parse("   "), Command::Chat("   "));
        // Only a leading slash makes a command.
        assert_eq!(Command::parse(" /nick x"), Command::Chat(" /nick x"));
    }

    #[test]
    fn test_token_is_case_insensitive() {
        assert_eq!(Command::parse("/HELP"), Command::Help);
        assert_eq!(Command::parse("/Quit"), Command::Quit);
        assert_eq!(Command::parse("/LiSt"), Command::List);
    }

    #[test]
    fn test_nick_takes_rest_of_line() {
        assert_eq!(Command::parse("/nick"), Command::Nick(""));
        assert_eq!(Command::parse("/nick   "), Command::Nick(""));
        assert_eq!(Command::parse("/nick alice"), Command::Nick("alice"));
        assert_eq!(Command::parse("/nick al ice"), Command::Nick("al ice"));
    }

    #[test]
    fn test_msg_arguments() {
        assert_eq!(
            Command::parse("/msg"),
            Command::Msg { target: None, text: None }
        );
        assert_eq!(
            Command::parse("/msg bob"),
            Command::Msg { target: Some("bob"), text: None }
        );
        assert_eq!(
            Command::parse("/msg bob   "),
            Command::Msg { target: Some("bob"), text: None }
        );
        assert_eq!(
            Command::parse("/msg  bob   hi  there "),
            Command::Msg { target: Some("bob"), text: Some("hi  there ") }
        );
    }

    #[test]
    fn test_me_and_unknown() {
        assert_eq!(Command::parse("/me waves hello"), Command::Me("waves hello"));
        assert_eq!(Command::parse("/me"), Command::Me(""));
        assert_eq!(Command::parse("/dance now"), Command::Unknown("/dance"));
        assert_eq!(Command::parse("/"), Command::Unknown("/"));
        assert_eq!(Command::parse("/nickname bob"), Command::Unknown("/nickname"));
    }

    #[test]
    fn test_log_args() {
        assert_eq!(Command::parse("/msg bob hi there").args(), vec!["bob", "hi there"]);
        assert_eq!(Command::parse("/nick").args(), Vec::<&str>::new());
        assert_eq!(Command::parse("/msg bob").name(), "/msg");
    }

    proptest! {
        #[test]
        fn parse_never_panics(line in "\\PC*") {
            let _ = Command::parse(&line);
        }

        #[test]
        fn non_slash_lines_are_chat(line in "[^/\\s][^\\r\\n]*") {
            prop_assert_eq!(Command::parse(&line), Command::Chat(&line));
        }

        #[test]
        fn msg_body_is_preserved(target in "[a-z]{1,8}", body in "[a-z][a-z ]{0,20}") {
            let line = format!("/msg {target} {body}");
            prop_assert_eq!(
                Command::parse(&line),
                Command::Msg { target: Some(target.as_str()), text: Some(body.as_str()) }
            );
        }
    }
}
