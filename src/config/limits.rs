//! Per-connection limits configuration.

use asyncchat_proto::{DEFAULT_MAX_LINE_LEN, DEFAULT_NICK_MAX_LEN};
use serde::Deserialize;

/// Per-connection limits.
///
/// These bound the memory a single client can pin: the inbound line buffer
/// and the outbound queue. A client whose queue fills up is treated as dead.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum inbound line length in bytes (default: 65536).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Maximum nickname length in characters (default: 32).
    #[serde(default = "default_max_nick_len")]
    pub max_nick_len: usize,
    /// Outbound lines buffered per connection (default: 256).
    #[serde(default = "default_send_queue")]
    pub send_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            max_nick_len: default_max_nick_len(),
            send_queue: default_send_queue(),
        }
    }
}

fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_max_nick_len() -> usize {
    DEFAULT_NICK_MAX_LEN
}

fn default_send_queue() -> usize {
    256
}
