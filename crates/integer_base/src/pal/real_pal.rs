use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::{IntegerError, IntegerResult, error::ErrorKind};

use super::FilePath;
use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle};
use super::http::{HttpService, HttpStatusCode};
use super::traits::{Pal, ReadSeek};

/// How often the accept loop checks the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/* 📖 # Why tiny_http and plain threads instead of an async stack?

Every request is a short, CPU-bound computation with no I/O behind it. A synchronous server
with one thread per request keeps the whole call path a plain function call, and the only
shared state (the happy number cache) is protected by its own lock.

Request threads are not pooled or capped. A request for a very large index keeps its thread
busy until the computation finishes, and many such requests at once mean as many threads.
Bounding that is left to whatever sits in front of the server.
*/

/// Concrete PAL implementation using the real filesystem and a tiny_http server.
///
/// File paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> IntegerResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> IntegerResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(IntegerError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self, service), fields(address = %config.address()))]
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> IntegerResult<HttpServerHandle> {
        let address = config.address();
        let server = tiny_http::Server::http(address.as_str())
            .map_err(|e| crate::err!("Failed to bind HTTP server to {}: {}", address, e))?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .ok_or_else(|| crate::err!("HTTP server on {} has no IP address", address))?;

        let handle = HttpServerHandle::new(port);
        let shutdown = Arc::clone(handle.shutdown_flag());
        let service: Arc<dyn HttpService> = Arc::from(service);
        let server_name = config.server_name.clone();

        thread::Builder::new()
            .name(format!("http-accept-{}", port))
            .spawn(move || accept_loop(server, service, shutdown, server_name))
            .map_err(|e| crate::err!("Failed to spawn HTTP accept thread: {}", e))?;

        info!(host = %config.host, port, "HTTP server listening");
        Ok(handle)
    }
}

fn accept_loop(
    server: tiny_http::Server,
    service: Arc<dyn HttpService>,
    shutdown: Arc<AtomicBool>,
    server_name: String,
) {
    while !shutdown.load(Ordering::SeqCst) {
        match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => {
                let service = Arc::clone(&service);
                let server_name = server_name.clone();
                let spawned = thread::Builder::new()
                    .name("http-request".to_string())
                    .spawn(move || respond(request, service.as_ref(), &server_name));
                if let Err(e) = spawned {
                    error!(error = %e, "failed to spawn request thread");
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "failed to receive HTTP request");
            }
        }
    }
    info!("HTTP server stopped");
}

fn respond(mut request: tiny_http::Request, service: &dyn HttpService, server_name: &str) {
    let response = match to_http_request(&mut request) {
        Some(http_request) => {
            debug!(method = %http_request.method(), path = http_request.path(), "handling request");
            service.handle_request(http_request).unwrap_or_else(|e| {
                error!(error = ?e, "HTTP service failed");
                let status = HttpStatusCode::InternalServerError;
                HttpResponse::text(status.reason_phrase()).with_status(status)
            })
        }
        None => {
            debug!(method = %request.method(), "unsupported HTTP method");
            let status = HttpStatusCode::MethodNotAllowed;
            HttpResponse::text(status.reason_phrase()).with_status(status)
        }
    };

    let status = response.status();
    let mut headers: Vec<tiny_http::Header> = response
        .headers()
        .iter()
        .filter_map(|(key, value)| {
            tiny_http::Header::from_bytes(key.as_bytes(), value.as_bytes())
                .map_err(|()| warn!(header = %key, "dropping invalid response header"))
                .ok()
        })
        .collect();
    if let Ok(header) = tiny_http::Header::from_bytes(&b"Server"[..], server_name.as_bytes()) {
        headers.push(header);
    }

    let body = response.into_body().into_bytes();
    let length = body.len();
    let tiny_response = tiny_http::Response::new(
        tiny_http::StatusCode(status.as_u16()),
        headers,
        Cursor::new(body),
        Some(length),
        None,
    );
    if let Err(e) = request.respond(tiny_response) {
        warn!(error = %e, status = status.as_u16(), "failed to write HTTP response");
    }
}

/// Convert a tiny_http request, `None` if the method is not one we understand.
fn to_http_request(request: &mut tiny_http::Request) -> Option<HttpRequest> {
    let method = HttpMethod::parse(request.method().as_str())?;
    let mut http_request = HttpRequest::new(method, request.url());
    for header in request.headers() {
        http_request = http_request.with_header(header.field.as_str().as_str(), header.value.as_str());
    }

    let mut body = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        warn!(error = %e, "failed to read request body");
    }
    Some(http_request.with_body(body))
}
