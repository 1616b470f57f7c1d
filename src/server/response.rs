//! HTTP response types and utilities.

use crate::server::media::guess_media_type;

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    MovedPermanently = 301,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

/// Fixed body of every 404 response.
pub const NOT_FOUND_BODY: &str =
    "<!doctype html>\n<h1>404 Page not found</h1>\n<p>Page cannot be found.</p>\n";

/// Fixed body of every 405 response.
pub const METHOD_NOT_ALLOWED_BODY: &str =
    "<!doctype html>\n<h1>405 Method not allowed</h1>\n<p>Your browser requested a method that is not valid.</p>\n";

/// Represents an outgoing HTTP response.
///
/// Headers keep their insertion order; the diagnostic headers
/// (`html_contains`, `json_contains`) are case-sensitive and part of the
/// observable contract, so nothing here normalizes names.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The HTTP headers, in emission order
    pub headers: Vec<(String, String)>,
    /// The response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response with the given status code and no headers.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the response body. `Content-Length` is the caller's business: two
    /// routes deliberately report a length other than the body's.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Terminate the header block with `Connection: Close`, as every route
    /// does before the connection is dropped.
    pub fn closing(self) -> Self {
        self.with_header("Connection", "Close")
    }

    /// The fixed 404 response.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
            .with_header("Content-Type", "text/html")
            .closing()
            .with_body(NOT_FOUND_BODY)
    }

    /// A 200 response carrying `body` as a file of the given target path.
    pub fn file(target: &str, body: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", guess_media_type(target))
            .with_header("Content-Length", body.len().to_string())
            .closing()
            .with_body(body)
    }

    /// Convert the response to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        // Add the status line
        let status_line = format!("HTTP/1.1 {} {}\r\n", self.status as u16, self.status.reason_phrase());
        bytes.extend_from_slice(status_line.as_bytes());

        // Add the headers
        for (name, value) in &self.headers {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        // Add the empty line that separates headers from body
        bytes.extend_from_slice(b"\r\n");

        // Add the body
        bytes.extend_from_slice(&self.body);

        bytes
    }
}
