//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use log::warn;

/// HTTP server configuration.
///
/// Both filesystem roots are explicit configuration handed to the server at
/// construction; nothing reads them ambiently.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// Directory serving as the base for all file-backed routes.
    pub www_root: PathBuf,
    /// Path of the persisted record sequence.
    pub db_path: PathBuf,
    /// The read buffer size.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".parse().unwrap(),
            www_root: PathBuf::from("www-data"),
            db_path: PathBuf::from("db.json"),
            read_buffer_size: 8192,
        }
    }
}

impl ServerConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `LISTEN` (socket address), `WWW_ROOT`, `DB_PATH`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(listen) = std::env::var("LISTEN") {
            match listen.parse() {
                Ok(addr) => config.addr = addr,
                Err(_) => warn!("Ignoring unparsable LISTEN address: {listen}"),
            }
        }
        if let Ok(root) = std::env::var("WWW_ROOT") {
            config.www_root = PathBuf::from(root);
        }
        if let Ok(db) = std::env::var("DB_PATH") {
            config.db_path = PathBuf::from(db);
        }

        config
    }
}
