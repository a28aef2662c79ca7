/* 📖 # Why a single unified API service?

One HttpService handles every endpoint. Routing happens inside `handle_request`, so there is one
service to register, one place where failures become HTTP responses, and MockPal tests only need
to start one server.

Failures are split in two:
- Caller errors (unknown sequence, index out of range) become 4xx responses with a JSON body
  naming the problem: `{"message": ..., "code": ..., "type": "exception"}`.
- Anything else is logged in full and answered with a generic 500 body that reveals nothing
  about the failure.
*/

/* 📖 # Why use serde for JSON serialization?

Response shapes are private structs deriving Serialize. serde_json handles escaping, and field
order in the struct is the field order on the wire. All responses go through
`serialize_json_response`.
*/

use std::borrow::Cow;

use integer_base::pal::http::{HttpMethod, HttpRequest, HttpResponse, HttpService, HttpStatusCode};
use integer_base::{ErrorKind, IntegerError, IntegerResult, err};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{SequenceElement, SequenceList};
use crate::facade::SequenceFacade;
use crate::sequence::{SequenceKind, SequenceValue};

const INTERNAL_ERROR_MESSAGE: &str = "There was an internal server error. Please try again later.";

#[derive(Serialize)]
struct ElementResponse<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    sequence: SequenceKind,
    value: &'a SequenceValue,
}

#[derive(Serialize)]
struct ListResponse<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    sequence: SequenceKind,
    values: &'a [SequenceValue],
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    code: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ErrorResponse {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            kind: "exception",
        }
    }
}

/// The endpoints the service knows about.
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Element { name: Cow<'a, str>, n: i64 },
    List { name: Cow<'a, str>, n: i64 },
}

/// Unified API service serving the sequence endpoints.
pub struct ApiService {
    facade: SequenceFacade,
    invalid_element_status: HttpStatusCode,
}

impl ApiService {
    /// Create a service that answers out-of-range requests with 403.
    pub fn new(facade: SequenceFacade) -> Self {
        Self {
            facade,
            invalid_element_status: HttpStatusCode::Forbidden,
        }
    }

    /// Use `status` for requests whose index or count is outside the sequence's domain.
    pub fn with_invalid_element_status(mut self, status: HttpStatusCode) -> Self {
        self.invalid_element_status = status;
        self
    }

    pub fn facade(&self) -> &SequenceFacade {
        &self.facade
    }

    fn serialize_json_response<T: Serialize>(
        status: HttpStatusCode,
        data: &T,
    ) -> IntegerResult<HttpResponse> {
        serde_json::to_string(data)
            .map(|json| {
                HttpResponse::new(status)
                    .with_content_type("application/json")
                    .with_body(json)
            })
            .map_err(|e| err!("JSON serialization error: {}", e))
    }

    fn error_response(
        status: HttpStatusCode,
        code: &'static str,
        message: impl Into<String>,
    ) -> IntegerResult<HttpResponse> {
        Self::serialize_json_response(status, &ErrorResponse::new(code, message))
    }

    /// Turn a failed computation into the response the caller sees.
    fn failure_response(&self, failure: Box<IntegerError>) -> IntegerResult<HttpResponse> {
        match failure.kind() {
            ErrorKind::InvalidSequence { .. } => Self::error_response(
                HttpStatusCode::BadRequest,
                "invalid_sequence",
                failure.kind().to_string(),
            ),
            ErrorKind::InvalidElement { .. } => Self::error_response(
                self.invalid_element_status,
                "invalid_element",
                failure.kind().to_string(),
            ),
            _ => {
                error!(error = ?failure, "Request failed with an internal error");
                Self::error_response(
                    HttpStatusCode::InternalServerError,
                    "internal_server_error",
                    INTERNAL_ERROR_MESSAGE,
                )
            }
        }
    }

    fn handle_element_request(&self, name: &str, n: i64) -> IntegerResult<HttpResponse> {
        let SequenceElement {
            sequence, value, ..
        } = self.facade.element(name, n)?;
        Self::serialize_json_response(
            HttpStatusCode::Ok,
            &ElementResponse {
                kind: "sequence_element",
                sequence,
                value: &value,
            },
        )
    }

    fn handle_list_request(&self, name: &str, n: i64) -> IntegerResult<HttpResponse> {
        let SequenceList { sequence, values } = self.facade.list(name, n)?;
        Self::serialize_json_response(
            HttpStatusCode::Ok,
            &ListResponse {
                kind: "sequence_list",
                sequence,
                values: &values,
            },
        )
    }
}

/// Match a request path against the known routes. Query strings must already be removed.
fn route(path: &str) -> Option<Route<'_>> {
    let segments = path
        .strip_prefix('/')?
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8().ok())
        .collect::<Option<Vec<_>>>()?;

    match segments.as_slice() {
        [root, name, n] if root == "sequences" => Some(Route::Element {
            name: name.clone(),
            n: parse_index(n)?,
        }),
        [root, name, first, n] if root == "sequences" && first == "first" => Some(Route::List {
            name: name.clone(),
            n: parse_index(n)?,
        }),
        _ => None,
    }
}

/// Parse an optionally negative decimal integer. Anything else, including values that do not
/// fit an i64, is not a valid route.
fn parse_index(segment: &str) -> Option<i64> {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("cache", self.facade.cache())
            .field("invalid_element_status", &self.invalid_element_status)
            .finish()
    }
}

impl HttpService for ApiService {
    fn handle_request(&self, request: HttpRequest) -> IntegerResult<HttpResponse> {
        let path = request.path_without_query();
        debug!(method = %request.method(), path, "Handling request");

        if request.method() != &HttpMethod::Get {
            return Self::error_response(
                HttpStatusCode::MethodNotAllowed,
                "method_not_allowed",
                format!("Method not allowed: {}", request.method()),
            );
        }

        let result = match route(path) {
            Some(Route::Element { name, n }) => self.handle_element_request(&name, n),
            Some(Route::List { name, n }) => self.handle_list_request(&name, n),
            None => {
                return Self::error_response(
                    HttpStatusCode::NotFound,
                    "not_found",
                    format!("Not found: {}", path),
                );
            }
        };

        result.or_else(|failure| self.failure_response(failure))
    }
}
