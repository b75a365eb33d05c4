//! Test chat client.
//!
//! Line-oriented client for integration testing that can send commands
//! and assert on received lines.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// Remove a leading `[HH:MM] ` stamp, if present.
pub fn strip_stamp(line: &str) -> &str {
    let b = line.as_bytes();
    if b.len() >= 8 && b[0] == b'[' && b[3] == b':' && b[6] == b']' && b[7] == b' ' {
        &line[8..]
    } else {
        line
    }
}

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect and consume the three-line welcome banner.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let mut client = Self::connect_raw(address).await?;
        let banner = client.recv_lines(3).await?;
        anyhow::ensure!(
            banner[0].starts_with("Welcome to "),
            "unexpected banner: {banner:?}"
        );
        Ok(client)
    }

    /// Connect without reading anything.
    pub async fn connect_raw(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer,
        })
    }

    /// Send one line; a `\n` terminator is added.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send raw bytes as-is.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// `/nick` and wait for the confirmation.
    pub async fn set_nick(&mut self, nick: &str) -> anyhow::Result<()> {
        self.send(&format!("/nick {nick}")).await?;
        self.expect(&format!("OK. You are now '{nick}'.")).await
    }

    /// Receive one line (terminator and stamp removed).
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n > 0, "connection closed");
        let line = line.trim_end_matches('\n');
        Ok(strip_stamp(line).to_string())
    }

    /// Receive exactly `n` lines.
    pub async fn recv_lines(&mut self, n: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(n);
        for _ in 0..n {
            lines.push(self.recv().await?);
        }
        Ok(lines)
    }

    /// Receive the next line and assert it equals `expected`.
    pub async fn expect(&mut self, expected: &str) -> anyhow::Result<()> {
        let line = self.recv().await?;
        anyhow::ensure!(line == expected, "expected {expected:?}, got {line:?}");
        Ok(())
    }

    /// Assert nothing arrives within a short window.
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(200)).await {
            Ok(line) => anyhow::bail!("unexpected line {line:?}"),
            Err(_) => Ok(()),
        }
    }

    /// Wait for the server to close the stream.
    ///
    /// A reset counts as closed: the server may drop unread input.
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        let mut seen = 0;
        loop {
            let mut line = String::new();
            match timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await? {
                Ok(0) => return Ok(()),
                Ok(n) => seen += n,
                Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => return Ok(()),
                Err(e) => return Err(e.into()),
            }
            anyhow::ensure!(seen < 64 * 1024, "stream never closed");
        }
    }
}
