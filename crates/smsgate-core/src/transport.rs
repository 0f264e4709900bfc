use async_trait::async_trait;
use url::Url;

use crate::{HttpMethod, Payload};

/// Lightweight header representation to avoid tying the core to any HTTP
/// client library.
pub type Headers = Vec<(String, String)>;

/// A fully-built outgoing request, ready for any [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// URL query parameters (GET dispatch).
    pub query: Vec<(String, String)>,
    pub headers: Headers,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Assemble a request from a template's method/URL, merged headers, and
    /// a built payload.
    pub fn new(method: HttpMethod, url: Url, headers: Headers, payload: Payload) -> Self {
        let (query, body) = match payload {
            Payload::Query(pairs) => (pairs, None),
            Payload::Form(pairs) => (Vec::new(), Some(RequestBody::Form(pairs))),
            Payload::Json(value) => (Vec::new(), Some(RequestBody::Json(value))),
        };
        Self {
            method,
            url,
            query,
            headers,
            body,
        }
    }
}

/// Request body shapes the builder can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `application/json`
    Json(serde_json::Value),
}

/// A received HTTP response, reduced to what the client records.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Network-level failure: connection error, timeout, no response.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// The seam between the request builder and the HTTP client.
///
/// Implementations are expected to be stateless connection-pooling
/// infrastructure, safe to share across concurrent sends. Any received
/// response, including 4xx/5xx, is `Ok`; `Err` means the call never
/// completed.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
