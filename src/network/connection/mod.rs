//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!            ┌──────────────────────────────────────────┐
//!            │           Connection Task                │
//!            │                                          │
//!  socket ──▶│ FramedRead<LineCodec> ─▶ dispatch ─▶ Hub │
//!            │                                          │
//!            │      tokio::select! (biased)             │
//!            │        1. close signal                   │
//!            │        2. outbox  ─▶ FramedWrite ───────▶│──▶ socket
//!            │        3. next line                      │
//!            └──────────────────────────────────────────┘
//! ```
//!
//! Other tasks never touch the socket. They enqueue on the outbox and, to
//! tear the connection down, remove it from the Hub and fire its close signal.

mod error_handling;

use error_handling::{ReadErrorAction, classify_read_error};

use crate::handlers::{Context, dispatch};
use crate::state::{ConnId, Hub};
use asyncchat_proto::{Command, Frame, LineCodec, reply};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// A client connection handler.
pub struct Connection {
    id: ConnId,
    peer: SocketAddr,
    stream: TcpStream,
    hub: Arc<Hub>,
}

impl Connection {
    pub fn new(id: ConnId, stream: TcpStream, peer: SocketAddr, hub: Arc<Hub>) -> Self {
        Self {
            id,
            peer,
            stream,
            hub,
        }
    }

    /// Run the connection until the client leaves or is closed.
    #[instrument(skip(self), fields(conn = %self.id, peer = %self.peer), name = "connection")]
    pub async fn run(self) {
        let Self {
            id,
            peer,
            stream,
            hub,
        } = self;

        let (read_half, write_half) = stream.into_split();
        let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(hub.limits.max_line_len));
        let mut writer = FramedWrite::new(write_half, LineCodec::new());

        let (outbox, mut inbox) = mpsc::channel::<Arc<str>>(hub.limits.send_queue);
        let closer = CancellationToken::new();

        hub.register(id, peer, outbox, closer.clone());
        info!(conn = %id, peer = %peer, online = hub.len(), "Connection open");

        let ctx = Context::new(id, &hub, peer);

        let reason = match ctx.reply(reply::welcome(&hub.server_name)) {
            Ok(()) => {
                Self::event_loop(&ctx, &mut reader, &mut writer, &mut inbox, &closer).await
            }
            Err(_) => Some("send failed"),
        };

        // `None` means another task already removed us.
        if let Some(reason) = reason {
            if reason != "broken pipe" {
                Self::flush_pending(&mut writer, &mut inbox).await;
            }
            hub.disconnect(id, reason);
        }
    }

    /// Write out whatever is still queued, ignoring failures.
    async fn flush_pending(
        writer: &mut FramedWrite<OwnedWriteHalf, LineCodec>,
        inbox: &mut mpsc::Receiver<Arc<str>>,
    ) {
        while let Ok(line) = inbox.try_recv() {
            if writer.feed(line).await.is_err() {
                return;
            }
        }
        let _ = SinkExt::<Arc<str>>::flush(writer).await;
    }

    /// Multiplex the close signal, the outbox and the socket.
    ///
    /// Returns the disconnect reason, or `None` if the connection was closed
    /// from outside.
    async fn event_loop(
        ctx: &Context<'_>,
        reader: &mut FramedRead<OwnedReadHalf, LineCodec>,
        writer: &mut FramedWrite<OwnedWriteHalf, LineCodec>,
        inbox: &mut mpsc::Receiver<Arc<str>>,
        closer: &CancellationToken,
    ) -> Option<&'static str> {
        loop {
            tokio::select! {
                biased;

                _ = closer.cancelled() => {
                    Self::flush_pending(writer, inbox).await;
                    return None;
                }

                Some(line) = inbox.recv() => {
                    if let Err(e) = writer.send(line).await {
                        debug!(conn = %ctx.id, error = %e, "Write failed");
                        return Some("broken pipe");
                    }
                }

                frame = reader.next() => {
                    let frame = match frame {
                        None => return Some("client closed"),
                        Some(Ok(frame)) => frame,
                        Some(Err(e)) => {
                            let action = classify_read_error(&e);
                            match action {
                                ReadErrorAction::Transport => {
                                    warn!(conn = %ctx.id, error = %e, "Transport error");
                                }
                                ReadErrorAction::Fault => {
                                    error!(conn = %ctx.id, error = %e, "Unexpected error");
                                }
                            }
                            return Some(action.reason());
                        }
                    };

                    if let Some(reason) = Self::handle_frame(ctx, frame) {
                        return Some(reason);
                    }
                }
            }
        }
    }

    /// Process one inbound frame. Returns a disconnect reason to stop.
    fn handle_frame(ctx: &Context<'_>, frame: Frame) -> Option<&'static str> {
        let line = match frame {
            Frame::Line(line) => line,
            Frame::Overlong { limit } => {
                debug!(conn = %ctx.id, limit, "Line too long");
                return ctx.reply(reply::LINE_TOO_LONG).err().map(|_| "send failed");
            }
        };

        debug!(conn = %ctx.id, nick = ?ctx.nick(), line = %line, "Line received");

        let err = match dispatch(ctx, Command::parse(&line)) {
            Ok(()) => return None,
            Err(err) => err,
        };

        if let Some(reason) = err.disconnect_reason() {
            debug!(conn = %ctx.id, code = err.error_code(), "Closing after handler");
            return Some(reason);
        }

        debug!(conn = %ctx.id, code = err.error_code(), "Command rejected");
        let text = err.to_reply()?;
        ctx.reply(text).err().map(|_| "send failed")
    }
}
