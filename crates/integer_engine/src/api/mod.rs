/* 📖 # Why an API module in integer_engine?

The api module exposes the sequence facade over HTTP. ApiService implements the HttpService
trait from integer_base, so the same service runs on RealPal (production) and MockPal (tests).

Endpoints:
- `GET /sequences/{name}/{n}`: nth element of a sequence
- `GET /sequences/{name}/first/{n}`: first n elements of a sequence
*/

mod service;

pub use service::ApiService;

use integer_base::pal::http::HttpServerHandle;
use integer_base::{IntegerResult, PalHandle, ResultExt};
use tracing::info;

use crate::cache::CacheHandle;
use crate::config::Config;
use crate::facade::SequenceFacade;

/// Build the API service from `config` and start serving it on `pal`.
///
/// All requests served through the returned handle share `cache`.
pub fn start_api_server(
    pal: &PalHandle,
    config: &Config,
    cache: CacheHandle,
) -> IntegerResult<HttpServerHandle> {
    let service = ApiService::new(SequenceFacade::new(cache))
        .with_invalid_element_status(config.invalid_element_status());
    let server_config = config.http_server_config();
    let handle = pal
        .start_http_server(Box::new(service), server_config.clone())
        .with_context(|| format!("Failed to start HTTP server on {}", server_config.address()))?;
    info!(
        address = %handle.address(&server_config.host),
        "Integer server listening"
    );
    Ok(handle)
}
