//! Nickname case folding.
//!
//! Nicknames are stored as typed but compared case-insensitively. Folding
//! uses full Unicode lowercase mapping so `ÉLODIE` and `élodie` collide.

/// Fold a nickname to its canonical comparison key.
pub fn fold_nick(nick: &str) -> String {
    nick.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_nick() {
        assert_eq!(fold_nick("Alice"), "alice");
        assert_eq!(fold_nick("BOB_42"), "bob_42");
        assert_eq!(fold_nick("ÉLODIE"), "élodie");
    }
}
