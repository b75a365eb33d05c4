//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket and spawns a Connection task for each
//! incoming client, plus a small supervisor that cleans up if that task dies.

use crate::network::Connection;
use crate::state::{ConnId, Hub};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let bind = listener.local_addr()?;
        info!(%bind, "Listening");
        Ok(Self { listener, hub })
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// In-flight connection tasks are left running; they end with the runtime.
    #[instrument(skip_all, name = "gateway")]
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let id = self.hub.next_conn_id();
                        let connection = Connection::new(id, stream, peer, Arc::clone(&self.hub));
                        let handle = tokio::spawn(connection.run());
                        tokio::spawn(supervise(id, Arc::clone(&self.hub), handle));
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                    }
                },
            }
        }
    }
}

/// Wait for a connection task and clean up after a panic.
async fn supervise(id: ConnId, hub: Arc<Hub>, handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        error!(conn = %id, error = %e, "Unexpected error");
        hub.disconnect(id, "server error");
    }
}
