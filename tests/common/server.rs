//! Test server management.
//!
//! Spawns and manages asyncchatd instances for integration testing.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    data_dir: TempDir,
}

impl TestServer {
    /// Spawn a server on a free local port.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(|_| String::new()).await
    }

    /// Spawn a server writing its audit log to `audit.jsonl` in the data dir.
    pub async fn spawn_with_audit() -> anyhow::Result<Self> {
        Self::spawn_with(|dir| {
            format!(
                "\n[audit]\npath = \"{}\"\n",
                dir.join("audit.jsonl").display()
            )
        })
        .await
    }

    /// Spawn a server, appending `extra(data_dir)` to the generated config.
    pub async fn spawn_with<F>(extra: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&Path) -> String,
    {
        let data_dir = tempfile::tempdir()?;
        let port = free_port()?;

        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "TestChat"

[listen]
address = "127.0.0.1:{port}"

[limits]
max_line_len = 1024
max_nick_len = 16
{extra}"#,
            extra = extra(data_dir.path())
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_asyncchatd"))
            .arg("--config")
            .arg(&config_path)
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            data_dir,
        };

        server.wait_until_ready().await?;
        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Path of the audit log, if the server was spawned with one.
    pub fn audit_path(&self) -> PathBuf {
        self.data_dir.path().join("audit.jsonl")
    }

    /// Connect a client and consume the welcome banner.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address()).await
    }

    /// Connect a client and claim `nick`.
    pub async fn connect_as(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect().await?;
        client.set_nick(nick).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Ask the OS for an unused port.
fn free_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
