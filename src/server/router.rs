//! Method and path routing.

use std::path::PathBuf;

use log::info;

use crate::parser::{HttpRequest, HttpVersion, Method};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::media::guess_media_type;
use crate::server::response::{HttpResponse, StatusCode, METHOD_NOT_ALLOWED_BODY};
use crate::store::{Criteria, RecordStore};

/// Dispatches one parsed request to a response-generation strategy.
///
/// The dispatch order is fixed: version guard, then method, then the first
/// path segment. Every response carries `Connection: Close`; the connection
/// never outlives its request.
pub struct Router {
    config: ServerConfig,
    store: RecordStore,
}

impl Router {
    /// Create a router over a configuration and a record store.
    pub fn new(config: ServerConfig, store: RecordStore) -> Self {
        Self { config, store }
    }

    /// Build the response for `request`.
    ///
    /// Errors are fatal to the connection: no response bytes exist for them.
    pub async fn route(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        info!("{method} {path}", method = request.method, path = request.path);

        // The version guard short-circuits: anything but HTTP/1.1 gets a 400
        // and no further routing.
        if request.version != HttpVersion::Http11 {
            return Ok(HttpResponse::new(StatusCode::BadRequest)
                .with_header("Location", format!("http://{target}", target = request.path))
                .closing());
        }

        if request.method != Method::GET {
            return self.method_not_allowed(request).await;
        }

        match request.first_segment() {
            "app-index" => self.app_index().await,
            "app-json" => self.app_json(),
            _ if request.path == "/" => self.redirect_to_index(request).await,
            _ => self.serve_file(&request.path).await,
        }
    }

    /// GET `app-index`: the listing page plus an `html_contains` diagnostic
    /// header carrying the full record sequence.
    async fn app_index(&self) -> Result<HttpResponse, Error> {
        let page = match tokio::fs::read(self.config.www_root.join("app_list.html")).await {
            Ok(page) => page,
            Err(_) => return Ok(HttpResponse::not_found()),
        };
        let records = serde_json::to_string(&self.store.query(&Criteria::new()))?;

        // The listing page is announced as form-urlencoded; the value is part
        // of the wire contract, not a description of the body.
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_header("Content-Length", page.len().to_string())
            .with_header("html_contains", records)
            .closing()
            .with_body(page))
    }

    /// GET `app-json`: no body; the record sequence travels in the
    /// `json_contains` diagnostic header.
    fn app_json(&self) -> Result<HttpResponse, Error> {
        let records = serde_json::to_string(&self.store.query(&Criteria::new()))?;

        Ok(HttpResponse::new(StatusCode::Ok)
            .with_header("Content-Type", "application/json")
            .with_header("Content-Length", records.len().to_string())
            .with_header("json_contains", records)
            .closing())
    }

    /// GET `/`: a 301 pointing the client at `/index.html`, with the file
    /// bytes already in the body.
    async fn redirect_to_index(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let body = match tokio::fs::read(self.config.www_root.join("index.html")).await {
            Ok(body) => body,
            Err(_) => return Ok(HttpResponse::not_found()),
        };
        let host = request
            .host()
            .ok_or_else(|| Error::MissingHeader("Host".to_string()))?;

        Ok(HttpResponse::new(StatusCode::MovedPermanently)
            .with_header("Location", format!("http://{host}/index.html"))
            .closing()
            .with_body(body))
    }

    /// GET anything else: serve the file under the static-asset root.
    async fn serve_file(&self, target: &str) -> Result<HttpResponse, Error> {
        match tokio::fs::read(self.file_path(target)).await {
            Ok(body) => Ok(HttpResponse::file(target, body)),
            Err(_) => Ok(HttpResponse::not_found()),
        }
    }

    /// Any non-GET method: a 405 describing the file that would have been
    /// served.
    async fn method_not_allowed(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let file = match tokio::fs::read(self.file_path(&request.path)).await {
            Ok(file) => file,
            Err(_) => return Ok(HttpResponse::not_found()),
        };
        let host = request
            .host()
            .ok_or_else(|| Error::MissingHeader("Host".to_string()))?;

        // Content-Length reports the file that would have been served, not
        // the notice body.
        Ok(HttpResponse::new(StatusCode::MethodNotAllowed)
            .with_header("Location", format!("http://{host}{target}", target = request.path))
            .with_header("Content-Type", guess_media_type(&request.path))
            .with_header("Content-Length", file.len().to_string())
            .closing()
            .with_body(METHOD_NOT_ALLOWED_BODY))
    }

    fn file_path(&self, target: &str) -> PathBuf {
        self.config.www_root.join(target.trim_start_matches('/'))
    }
}
