use anyhow::Context;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::dispatcher::Dispatcher;

/// Owns the listening socket for the lifetime of the accept loop.
pub struct Server {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    max_request_bytes: usize,
}

impl Server {
    /// Binds the configured address. Failure here is fatal for the binary.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        cfg.validate()?;

        let listener = TcpListener::bind(&cfg.server.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;

        info!(
            root = %cfg.server.root.display(),
            list_file = %cfg.list_file_path().display(),
            "Listening on http://{}",
            listener.local_addr()?
        );

        Ok(Self {
            listener,
            dispatcher: Arc::new(Dispatcher::from_config(cfg)),
            max_request_bytes: cfg.server.max_request_bytes,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` completes, then closes the
    /// socket. Each connection is served on its own task.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (socket, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!("Failed to accept client connection: {}", e);
                            continue;
                        }
                    };
                    info!("Accepted connection from {}", peer);

                    let dispatcher = Arc::clone(&self.dispatcher);
                    let max_request_bytes = self.max_request_bytes;
                    tokio::spawn(async move {
                        let mut conn = Connection::new(socket, dispatcher, max_request_bytes);
                        if let Err(e) = conn.run().await {
                            error!("Connection error from {}: {}", peer, e);
                        }
                    });
                }

                _ = &mut shutdown => {
                    info!("Shutting down server");
                    break;
                }
            }
        }

        Ok(())
    }
}
