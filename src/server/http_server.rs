//! HTTP server implementation.

use std::time::Duration;

use log::{error, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::signal;

use crate::parser::parse_request;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::router::Router;
use crate::store::RecordStore;

/// An HTTP server.
///
/// Connections are accepted and served strictly one at a time: a request is
/// parsed, routed, answered, and its connection closed before the next
/// `accept()`. The record store and the static-asset root are the only state
/// shared across requests.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let store = RecordStore::new(config.db_path.clone());
        let router = Router::new(config.clone(), store);
        Self { config, router }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Handle accept errors. Returns true when the loop should stop.
    async fn handle_accept_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(Duration::from_millis(100)).await;
        false
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;

        loop {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((mut socket, addr)) => {
                            info!("[{addr}] connected");
                            // A connection-scoped failure must not take the
                            // accept loop with it.
                            if let Err(e) = self.handle_connection(&mut socket).await {
                                error!("[{addr}] error handling connection: {e}");
                            }
                            info!("[{addr}] disconnected");
                        }
                        Err(e) => {
                            if Self::handle_accept_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Handle a single connection: exactly one request, one response, then
    /// the stream is shut down.
    pub async fn handle_connection(
        &self,
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
    ) -> Result<(), Error> {
        let mut buf = vec![0; self.config.read_buffer_size];

        // Read data from the socket
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        // A parse failure abandons the connection without a response.
        let request = parse_request(&buf[..n])?;

        let response = self.router.route(&request).await?;

        socket.write_all(&response.to_bytes()).await?;
        socket.shutdown().await?;

        Ok(())
    }
}
