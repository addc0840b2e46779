//! Authentication endpoints

use crate::client::{ApiRequest, FoodorderClient};
use crate::endpoints::users::User;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: FoodorderClient,
}

impl AuthApi {
    /// Create a new authentication API interface
    pub(crate) fn new(client: FoodorderClient) -> Self {
        Self { client }
    }

    /// Log in and remember the returned token in the session
    ///
    /// POST /auth/login
    ///
    /// The token is stored before the full login result is returned. A
    /// rejected login leaves the session untouched.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let request = ApiRequest::post("auth/login").json(credentials)?;
        let result: LoginResponse = self.client.send(request).await?;

        self.client.session().set_token(&result.token)?;
        debug!(username = %credentials.username, "Logged in");

        Ok(result)
    }
}

/// Login input; never persisted
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials from a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls
    pub token: String,
    /// The logged-in user, when the backend includes it
    #[serde(default)]
    pub user: Option<User>,
    /// Informational message
    #[serde(default)]
    pub message: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
