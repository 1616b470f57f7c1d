//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, possibly carrying a query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers, keys stored exactly as received
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    pub fn new(method: Method, path: String, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
        }
    }

    /// Get a header value.
    ///
    /// Lookup is exact-case; headers are stored as received.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The `Host` header value, if the client sent one.
    ///
    /// Routes that build absolute `Location` values require it.
    pub fn host(&self) -> Option<&str> {
        self.get_header("Host")
    }

    /// The first segment of the request path, i.e. `"app-index"` for
    /// `/app-index/all`. Empty for the root path `/`.
    pub fn first_segment(&self) -> &str {
        self.path.split('/').nth(1).unwrap_or_default()
    }
}

/// Parse an HTTP request head from a byte slice.
///
/// The request line must split on whitespace into exactly three tokens;
/// header lines run until the first blank line, each with exactly one `:`
/// separator. Duplicate header keys: the last occurrence wins. The body, if
/// any, is not consumed; no route reads one.
///
/// # Arguments
///
/// * `input` - A byte slice containing the HTTP request to parse
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    // Convert the input to a string
    let input_str = match std::str::from_utf8(input) {
        Ok(s) => s,
        Err(_) => return Err(Error::MalformedRequestLine("Invalid UTF-8".to_string())),
    };

    // Split the input into lines
    let mut lines = input_str.lines();

    // Parse the request line
    let request_line = match lines.next() {
        Some(line) => line,
        None => return Err(Error::EmptyRequest),
    };

    // Split the request line into method, path, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    // Parse the method
    let method = Method::from_str(parts[0])?;

    // Parse the path
    let path = parts[1].to_string();

    // Parse the version
    let version = HttpVersion::from_str(parts[2])?;

    // Parse the headers
    let mut headers = HashMap::new();
    for line in lines {
        // Empty line indicates the end of headers
        if line.is_empty() {
            break;
        }

        // Split the line into name and value
        let (name, value) = line.split_once(':').ok_or(Error::InvalidHeaderFormat)?;

        // Trim whitespace and add the header to the map
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    // Create the request
    Ok(HttpRequest::new(method, path, version, headers))
}
