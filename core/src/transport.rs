//! Request execution and lifecycle hooks.
//!
//! # Design
//! A `Transport` performs one round-trip and reports what happened as data:
//! any response, whatever its status, is `Ok`, and only a failure to get a
//! response at all is `Err`. `request` then drives a `Lifecycle` through
//! `on_start`, exactly one of `on_success`/`on_error`, and `on_finish`, in
//! that order. Every hook has a no-op default, so a lifecycle that does not
//! override `on_error` simply has no error handler.
//!
//! The futures returned here are not `Send`. They are meant to be spawned on
//! a single-threaded event loop alongside the controller that owns them.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes an `HttpRequest` against the network.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Returns `Ok` for every response received, including 4xx and 5xx.
    /// `Err` means no response could be obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Hooks around one asynchronous request.
pub trait Lifecycle {
    /// Runs before the request is sent.
    fn on_start(&mut self) {}

    /// Receives the raw body of a 2xx response.
    fn on_success(&mut self, _body: String) {}

    /// Receives `ApiError::Http` for a non-2xx response or
    /// `ApiError::Network` when the round-trip failed.
    fn on_error(&mut self, _error: ApiError) {}

    /// Runs last, once, whatever the outcome.
    fn on_finish(&mut self) {}
}

/// Send `request` and report its outcome to `lifecycle`.
pub async fn request<T, L>(transport: &T, request: HttpRequest, lifecycle: &mut L)
where
    T: Transport,
    L: Lifecycle,
{
    lifecycle.on_start();

    let method = request.method;
    let path = request.path.clone();
    debug!(%method, %path, "sending request");

    match transport.send(request).await {
        Ok(response) if response.is_success() => {
            debug!(%method, %path, status = response.status, "request succeeded");
            lifecycle.on_success(response.body);
        }
        Ok(response) => {
            debug!(%method, %path, status = response.status, "request rejected");
            lifecycle.on_error(ApiError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Err(error) => {
            debug!(%method, %path, ?error, "request failed");
            lifecycle.on_error(error);
        }
    }

    lifecycle.on_finish();
}

/// `Transport` backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Every header is applied, in order. A request that cannot be built
    /// (e.g. an unparseable URL) never reaches the network and is reported
    /// as a network failure.
    fn build(&self, request: HttpRequest) -> Result<reqwest::Request, ApiError> {
        let mut builder = self.client.request(reqwest_method(request.method), &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        builder.build().map_err(|e| ApiError::Network(e.to_string()))
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.build(request)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
