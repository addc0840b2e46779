//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, OrdersApi, ReservationsApi, UsersApi};
use crate::error::{ApiError, ApiResult, GENERIC_ERROR_MESSAGE};
use crate::session::Session;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// How a request is authorized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// No `Authorization` header
    None,
    /// Bearer token read from the session when the request is dispatched
    Session,
    /// Bearer token supplied by the caller
    Bearer(String),
}

/// Request payload
#[derive(Debug)]
pub enum Body {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// `multipart/form-data`; the transport picks the boundary
    Multipart(Form),
}

/// A single backend call, described before it is executed
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    auth: Auth,
    body: Body,
    fallback_message: &'static str,
}

impl ApiRequest {
    /// Start a request with the given method and path (relative to the base URL)
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            auth: Auth::None,
            body: Body::Empty,
            fallback_message: GENERIC_ERROR_MESSAGE,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Authorize with the session token
    #[must_use]
    pub fn session_auth(mut self) -> Self {
        self.auth = Auth::Session;
        self
    }

    /// Authorize with an explicit bearer token
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = Auth::Bearer(token.into());
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart body
    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Message reported when a failed response carries none
    #[must_use]
    pub fn fallback_message(mut self, message: &'static str) -> Self {
        self.fallback_message = message;
        self
    }

    /// HTTP method
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Authorization mode
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }
}

/// Foodorder API client
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
/// Every operation makes exactly one attempt and surfaces any failure as an
/// [`ApiError`].
#[derive(Clone)]
pub struct FoodorderClient {
    inner: Client,
    config: Arc<ClientConfig>,
    session: Session,
}

impl FoodorderClient {
    /// Create a client configured from the environment, with the token
    /// persisted at the configured path
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a client with specific configuration and a file-backed session
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let session = Session::persistent(config.token_path.clone());
        Self::with_session(config, session)
    }

    /// Create a client with specific configuration and session
    pub fn with_session(config: ClientConfig, session: Session) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("foodorder-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(ApiError::Transport)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            session,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the session handle
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access user endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access order endpoints, scoped to the configured language
    #[must_use]
    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone(), self.config.language.clone())
    }

    /// Access reservation endpoints
    #[must_use]
    pub fn reservations(&self) -> ReservationsApi {
        ReservationsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    /// Absolute URL for a path relative to the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Execute a request once and decode the JSON response
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path, request_id))]
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let url = self.url_for(&request.path);
        let mut builder = self
            .inner
            .request(request.method, &url)
            .header(X_REQUEST_ID, &request_id);

        // The header is sent even without a stored token so the server, not
        // the client, decides how to reject the call.
        let token = match request.auth {
            Auth::None => None,
            Auth::Session => Some(self.session.token()?.unwrap_or_default()),
            Auth::Bearer(token) => Some(token),
        };
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        builder = match request.body {
            Body::Empty => builder.header(CONTENT_TYPE, "application/json"),
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(form),
        };

        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(
            status,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Response received"
        );

        decode_response(status, &text, request.fallback_message)
    }
}

/// Turn a status and raw body into a typed payload or an error
///
/// An empty body decodes as JSON `null`. Failed responses report the body's
/// `message` field when it is a non-empty string, `fallback` otherwise.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };

    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::http_status(status, message));
    }

    Ok(serde_json::from_str(body)?)
}
