//! HTTP server implementation for tinyserve-rs.
//!
//! This module owns the routing state machine, the hand-built responses, and
//! the single-connection accept loop.

mod response;
mod config;
mod error;
mod media;
mod router;
mod http_server;
mod tests;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use media::guess_media_type;
pub use router::Router;
pub use http_server::HttpServer;
