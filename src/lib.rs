//! A minimal single-connection HTTP/1.1 file and record server.
//!
//! This library implements a tiny request-processing pipeline. One TCP
//! connection at a time is accepted; its single request is parsed, routed by
//! method and path, and answered with a hand-built response: a static file,
//! a generated listing page, or a JSON dump of a small persisted record
//! store. The connection is closed after every response.
//!
//! # Features
//!
//! - Parse HTTP requests from byte slices
//! - Route GET requests to static files, a listing page, and a JSON dump
//! - Persist user records as an append-only JSON sequence with
//!   auto-incrementing ids
//! - Exact-match multi-field record filtering
//! - Proper error handling with descriptive error messages
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use tinyserve_rs::parse_request;
//!
//! let request_bytes = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("Path: {}", request.path);
//!         println!("Version: {}", request.version);
//!         println!("Headers: {:?}", request.headers);
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Error handling
//!
//! ```
//! use tinyserve_rs::{parse_request, ParserError};
//!
//! let invalid_request = b"GET /index.html\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(invalid_request) {
//!     Ok(_) => println!("Request parsed successfully"),
//!     Err(ParserError::MalformedRequestLine(line)) => println!("Malformed request line: {}", line),
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```
//!
//! ## Running the server
//!
//! ```no_run
//! use tinyserve_rs::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = HttpServer::new(ServerConfig::default());
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the record store module
pub mod store;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use store::{Criteria, Error as StoreError, Record, RecordStore};
pub use server::{Error as ServerError, HttpResponse, HttpServer, Router, ServerConfig, StatusCode};
