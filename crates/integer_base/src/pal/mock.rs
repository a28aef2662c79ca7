use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU16, Ordering};

use crate::IntegerError;
use crate::IntegerResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::http::{HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle, HttpService};
use super::traits::{Pal, ReadSeek};

/* 📖 # Why does MockPal keep services instead of sockets?

Starting a server on MockPal only records the service under a port number. Tests then call
`simulate_request` to run a request through exactly the code path RealPal would use, minus
the network. This keeps API tests fast, deterministic and free of port conflicts.
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use integer_base::{FilePath, MockPal, Pal};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("integer_server.toml"), b"[server]\nport = 8080\n".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("integer_server.toml")).unwrap();
/// assert!(content.contains("8080"));
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    http_servers: Arc<Mutex<HashMap<u16, HttpServerInfo>>>,
    next_port: Arc<AtomicU16>,
}

/// Information about a registered HTTP server.
#[derive(Debug)]
struct HttpServerInfo {
    service: Box<dyn HttpService>,
    _config: HttpServerConfig,
}

impl MockPal {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            http_servers: Arc::new(Mutex::new(HashMap::new())),
            next_port: Arc::new(AtomicU16::new(10000)),
        }
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Run a request through the service registered on `port`.
    ///
    /// The service's own result is returned unchanged, so tests can observe both the
    /// responses it builds and the errors it propagates.
    pub fn simulate_request(
        &self,
        port: u16,
        request: HttpRequest,
    ) -> IntegerResult<HttpResponse> {
        let servers = self.http_servers.lock().unwrap();
        let server_info = servers
            .get(&port)
            .ok_or_else(|| crate::err!("No HTTP server registered on port {}", port))?;

        server_info.service.handle_request(request)
    }

    /// Get the number of registered HTTP servers.
    pub fn http_server_count(&self) -> usize {
        self.http_servers.lock().unwrap().len()
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> IntegerResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> IntegerResult<Box<dyn ReadSeek + 'static>> {
        let files = self.files.lock().unwrap();
        let content = files
            .get(path)
            .ok_or_else(|| {
                Box::new(IntegerError::new(ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                }))
            })?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> IntegerResult<HttpServerHandle> {
        let port = match config.port {
            Some(p) if p != 0 => p,
            _ => self.next_port.fetch_add(1, Ordering::SeqCst),
        };

        let server_info = HttpServerInfo {
            service,
            _config: config,
        };
        self.http_servers.lock().unwrap().insert(port, server_info);

        Ok(HttpServerHandle::new(port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::http::{HttpMethod, HttpStatusCode};

    #[derive(Debug)]
    struct EchoPathService;

    impl HttpService for EchoPathService {
        fn handle_request(&self, request: HttpRequest) -> IntegerResult<HttpResponse> {
            match request.path_without_query() {
                "/fail" => Err(crate::err!("service failure")),
                path => Ok(HttpResponse::text(path)),
            }
        }
    }

    #[test]
    fn test_file_exists() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("integer_server.toml"), b"".to_vec());

        assert!(pal.file_exists(&FilePath::from("integer_server.toml")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("other.toml")).unwrap());
    }

    #[test]
    fn test_read_file_not_found() {
        let pal = MockPal::new();

        let result = pal.read_file(&FilePath::from("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_start_http_server_auto_port() {
        let pal = MockPal::new();
        let first = pal
            .start_http_server(Box::new(EchoPathService), HttpServerConfig::default())
            .unwrap();
        let second = pal
            .start_http_server(Box::new(EchoPathService), HttpServerConfig::default())
            .unwrap();

        assert!(first.port() >= 10000);
        assert_ne!(first.port(), second.port());
        assert_eq!(pal.http_server_count(), 2);
    }

    #[test]
    fn test_simulate_request() {
        let pal = MockPal::new();
        let config = HttpServerConfig::new("127.0.0.1").with_port(5000);
        let handle = pal
            .start_http_server(Box::new(EchoPathService), config)
            .unwrap();
        assert_eq!(handle.port(), 5000);

        let response = pal
            .simulate_request(5000, HttpRequest::new(HttpMethod::Get, "/echo?x=1"))
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::Ok);
        assert_eq!(response.body().as_string(), Some("/echo".to_string()));
    }

    #[test]
    fn test_simulate_request_propagates_service_error() {
        let pal = MockPal::new();
        let config = HttpServerConfig::default().with_port(5001);
        pal.start_http_server(Box::new(EchoPathService), config)
            .unwrap();

        let result = pal.simulate_request(5001, HttpRequest::new(HttpMethod::Get, "/fail"));
        assert_eq!(result.unwrap_err().to_string(), "service failure");
    }

    #[test]
    fn test_simulate_request_unknown_port() {
        let pal = MockPal::new();

        let result = pal.simulate_request(9999, HttpRequest::new(HttpMethod::Get, "/"));
        assert!(result.is_err());
    }
}
