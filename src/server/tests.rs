//! Tests for the HTTP server implementation.

#[cfg(test)]
mod server_tests {
    use std::fs;
    use std::io::{self, Cursor};
    use std::path::PathBuf;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use crate::parser::Error as ParserError;
    use crate::server::{Error, HttpServer, ServerConfig, guess_media_type};
    use crate::store::{Record, RecordStore};

    // Mock TcpStream for testing
    struct MockTcpStream {
        read_data: Cursor<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(read_data: Vec<u8>) -> Self {
            Self {
                read_data: Cursor::new(read_data),
                write_data: Vec::new(),
            }
        }

        fn written_data(&self) -> &[u8] {
            &self.write_data
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
            buf.advance(n);
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = self.get_mut();
            this.write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    /// A fresh www root and db path under /tmp, unique per test.
    fn fixture(name: &str) -> ServerConfig {
        let www_root = PathBuf::from(format!("/tmp/tinyserve_www_{name}"));
        let db_path = PathBuf::from(format!("/tmp/tinyserve_db_{name}.json"));
        let _ = fs::remove_dir_all(&www_root);
        let _ = fs::remove_file(&db_path);
        fs::create_dir_all(&www_root).unwrap();

        ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            www_root,
            db_path,
            read_buffer_size: 8192,
        }
    }

    fn cleanup(config: &ServerConfig) {
        let _ = fs::remove_dir_all(&config.www_root);
        let _ = fs::remove_file(&config.db_path);
    }

    /// Drive one connection carrying `raw` and return the handler result plus
    /// everything written to the socket.
    async fn run(config: &ServerConfig, raw: &[u8]) -> (Result<(), Error>, Vec<u8>) {
        let server = HttpServer::new(config.clone());
        let mut stream = MockTcpStream::new(raw.to_vec());
        let result = server.handle_connection(&mut stream).await;
        (result, stream.written_data().to_vec())
    }

    /// Extract the value of a response header, if present.
    fn header_value(response: &str, name: &str) -> Option<String> {
        let head = response.split("\r\n\r\n").next()?;
        head.lines()
            .find_map(|line| line.strip_prefix(&format!("{name}: ")))
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_get_existing_file() {
        let config = fixture("get_file");
        let content = b"Hello from a static file.\n";
        fs::write(config.www_root.join("foo.txt"), content).unwrap();

        let (result, written) =
            run(&config, b"GET /foo.txt HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.contains(&format!("Content-Length: {}\r\n", content.len())));
        assert!(response.contains("Connection: Close\r\n"));
        // The body is byte-identical to the file.
        assert!(written.ends_with(content));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_get_file_in_subdirectory() {
        let config = fixture("get_subdir");
        fs::create_dir_all(config.www_root.join("css")).unwrap();
        fs::write(config.www_root.join("css/site.css"), b"body {}\n").unwrap();

        let (result, written) =
            run(&config, b"GET /css/site.css HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/css\r\n"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_get_missing_file_is_404() {
        let config = fixture("get_missing");

        let (result, written) =
            run(&config, b"GET /nope.html HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let expected = "HTTP/1.1 404 Not Found\r\n\
            Content-Type: text/html\r\n\
            Connection: Close\r\n\
            \r\n\
            <!doctype html>\n<h1>404 Page not found</h1>\n<p>Page cannot be found.</p>\n";
        assert_eq!(String::from_utf8_lossy(&written), expected);

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_root_redirects_to_index() {
        let config = fixture("root_redirect");
        let index = b"<html><body>home</body></html>\n";
        fs::write(config.www_root.join("index.html"), index).unwrap();

        let (result, written) =
            run(&config, b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
        assert_eq!(
            header_value(&response, "Location").as_deref(),
            Some("http://example.com/index.html")
        );
        assert!(response.contains("Connection: Close\r\n"));
        assert!(written.ends_with(index));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_root_without_index_is_404() {
        let config = fixture("root_no_index");

        let (result, written) =
            run(&config, b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_root_without_host_is_connection_error() {
        let config = fixture("root_no_host");
        fs::write(config.www_root.join("index.html"), b"<html></html>").unwrap();

        let (result, written) = run(&config, b"GET / HTTP/1.1\r\n\r\n").await;

        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
        // The failure abandons the response; nothing reaches the wire.
        assert!(written.is_empty());

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_non_get_is_405_with_file_length() {
        let config = fixture("post_405");
        let content = b"some file content";
        fs::write(config.www_root.join("foo.txt"), content).unwrap();

        let (result, written) =
            run(&config, b"POST /foo.txt HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
        assert_eq!(
            header_value(&response, "Location").as_deref(),
            Some("http://example.com/foo.txt")
        );
        assert_eq!(
            header_value(&response, "Content-Type").as_deref(),
            Some("text/plain")
        );
        // Content-Length reports the file that would have been served.
        assert_eq!(
            header_value(&response, "Content-Length").as_deref(),
            Some(content.len().to_string().as_str())
        );
        assert!(response.contains("<h1>405 Method not allowed</h1>"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_non_get_missing_file_is_404() {
        let config = fixture("post_missing");

        let (result, written) =
            run(&config, b"DELETE /gone.txt HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_bad_version_short_circuits() {
        let config = fixture("bad_version");
        fs::write(config.www_root.join("index.html"), b"<html></html>").unwrap();

        let (result, written) =
            run(&config, b"GET /index.html HTTP/1.0\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        // Exactly one 400 response, headers only, and no routing after it,
        // even though the file exists.
        let expected = "HTTP/1.1 400 Bad Request\r\n\
            Location: http:///index.html\r\n\
            Connection: Close\r\n\
            \r\n";
        assert_eq!(String::from_utf8_lossy(&written), expected);

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_app_index_lists_records() {
        let config = fixture("app_index");
        let page = b"<html><body><table></table></body></html>\n";
        fs::write(config.www_root.join("app_list.html"), page).unwrap();
        RecordStore::new(config.db_path.clone())
            .append("Mick", "Jagger")
            .unwrap();

        let (result, written) =
            run(&config, b"GET /app-index HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: application/x-www-form-urlencoded\r\n"));
        assert!(response.contains(&format!("Content-Length: {}\r\n", page.len())));

        let diagnostic = header_value(&response, "html_contains").unwrap();
        let records: Vec<Record> = serde_json::from_str(&diagnostic).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first, "Mick");

        assert!(written.ends_with(page));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_app_index_without_page_is_404() {
        let config = fixture("app_index_missing");

        let (result, written) =
            run(&config, b"GET /app-index HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_app_json_round_trips_records() {
        let config = fixture("app_json");
        RecordStore::new(config.db_path.clone())
            .append("Mick", "Jagger")
            .unwrap();

        let (result, written) =
            run(&config, b"GET /app-json HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: application/json\r\n"));

        let diagnostic = header_value(&response, "json_contains").unwrap();
        let records: Vec<Record> = serde_json::from_str(&diagnostic).unwrap();
        assert_eq!(
            records,
            vec![Record {
                id: 1,
                first: "Mick".to_string(),
                last: "Jagger".to_string(),
            }]
        );

        // Content-Length is the byte length of the serialized payload, and
        // the response has no body.
        assert_eq!(
            header_value(&response, "Content-Length").as_deref(),
            Some(diagnostic.len().to_string().as_str())
        );
        assert!(written.ends_with(b"\r\n\r\n"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_app_json_with_empty_store() {
        let config = fixture("app_json_empty");

        let (result, written) =
            run(&config, b"GET /app-json HTTP/1.1\r\nHost: example.com\r\n\r\n").await;

        assert!(result.is_ok());
        let response = String::from_utf8_lossy(&written);
        assert_eq!(header_value(&response, "json_contains").as_deref(), Some("[]"));
        assert_eq!(header_value(&response, "Content-Length").as_deref(), Some("2"));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_malformed_request_line_writes_nothing() {
        let config = fixture("bad_request_line");

        let (result, written) = run(&config, b"GET /index.html\r\n\r\n").await;

        assert!(matches!(
            result,
            Err(Error::Parse(ParserError::MalformedRequestLine(_)))
        ));
        assert!(written.is_empty());

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_malformed_header_writes_nothing() {
        let config = fixture("bad_header");

        let (result, written) =
            run(&config, b"GET /index.html HTTP/1.1\r\nNoColonHere\r\n\r\n").await;

        assert!(matches!(
            result,
            Err(Error::Parse(ParserError::InvalidHeaderFormat))
        ));
        assert!(written.is_empty());

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_empty_connection_is_clean() {
        let config = fixture("empty_conn");

        let (result, written) = run(&config, b"").await;

        assert!(result.is_ok());
        assert!(written.is_empty());

        cleanup(&config);
    }

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type("/index.html"), "text/html");
        assert_eq!(guess_media_type("/pics/logo.png"), "image/png");
        assert_eq!(guess_media_type("/notes.txt"), "text/plain");
        assert_eq!(guess_media_type("/archive.bin"), "application/octet-stream");
        assert_eq!(guess_media_type("/no-extension"), "application/octet-stream");
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.www_root, PathBuf::from("www-data"));
        assert_eq!(config.db_path, PathBuf::from("db.json"));
    }
}
