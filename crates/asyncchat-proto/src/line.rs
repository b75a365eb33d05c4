//! Line-based codec for tokio.
//!
//! Reads `\n`-terminated lines (tolerating a trailing `\r`) and decodes them
//! as UTF-8, replacing invalid sequences rather than failing. Lines over the
//! configured limit are skipped up to their terminator and reported once as
//! [`Frame::Overlong`], so the stream stays usable.

use std::cmp;

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Default maximum inbound line length in bytes (terminator excluded).
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// One decoded unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete line with its terminator stripped.
    Line(String),
    /// A line exceeded the limit and is being discarded.
    Overlong {
        /// The limit that was exceeded.
        limit: usize,
    },
}

/// Line-based codec that handles newline-terminated text.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Skipping the tail of an overlong line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    fn strip_cr(bytes: &[u8]) -> &[u8] {
        bytes.strip_suffix(b"\r").unwrap_or(bytes)
    }

    fn to_line(bytes: &[u8]) -> String {
        String::from_utf8_lossy(Self::strip_cr(bytes)).into_owned()
    }
}

impl Decoder for LineCodec {
    type Item = Frame;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Frame>> {
        loop {
            // Room for the limit plus an optional `\r` and the `\n`
            let read_to = cmp::min(self.max_len.saturating_add(2), src.len());
            let newline = src[self.next_index..read_to]
                .iter()
                .position(|b| *b == b'\n');

            match (self.discarding, newline) {
                (true, Some(offset)) => {
                    // End of the overlong line; resume normal decoding
                    src.advance(self.next_index + offset + 1);
                    self.discarding = false;
                    self.next_index = 0;
                }
                (true, None) => {
                    src.advance(read_to);
                    self.next_index = 0;
                    if src.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let end = self.next_index + offset;
                    self.next_index = 0;
                    let line = src.split_to(end + 1);
                    let body = Self::strip_cr(&line[..end]);
                    if body.len() > self.max_len {
                        return Ok(Some(Frame::Overlong {
                            limit: self.max_len,
                        }));
                    }
                    return Ok(Some(Frame::Line(Self::to_line(body))));
                }
                (false, None) if src.len() > self.max_len.saturating_add(1) => {
                    self.discarding = true;
                    self.next_index = 0;
                    return Ok(Some(Frame::Overlong {
                        limit: self.max_len,
                    }));
                }
                (false, None) => {
                    // No complete line yet - remember where we stopped
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Frame>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if self.discarding || src.is_empty() {
            src.clear();
            self.discarding = false;
            self.next_index = 0;
            return Ok(None);
        }
        // Unterminated final line
        let rest = src.split();
        self.next_index = 0;
        if Self::strip_cr(&rest).len() > self.max_len {
            return Ok(Some(Frame::Overlong {
                limit: self.max_len,
            }));
        }
        Ok(Some(Frame::Line(Self::to_line(&rest))))
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, text: T, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(text.as_ref().as_bytes());
        Ok(())
    }
}
