//! User endpoints
//!
//! Maps to the `/users` resource and to `/auth/me`:
//! - Register a new account
//! - Fetch the account behind a token
//! - Update or delete an account
//! - Replace the profile picture (multipart upload)

use crate::client::{ApiRequest, FoodorderClient};
use crate::error::{ApiError, ApiResult};
use crate::types::MessageResponse;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Users API interface
#[derive(Clone)]
pub struct UsersApi {
    client: FoodorderClient,
}

impl UsersApi {
    /// Create a new users API interface
    pub(crate) fn new(client: FoodorderClient) -> Self {
        Self { client }
    }

    /// Register a new account
    ///
    /// POST /users
    pub async fn register(&self, user: &NewUser) -> ApiResult<User> {
        let request = ApiRequest::post("users").json(user)?;
        self.client.send(request).await
    }

    /// Fetch the user that owns `token`
    ///
    /// GET /auth/me
    ///
    /// Takes the token explicitly instead of reading the session, so a token
    /// can be checked before it is persisted.
    pub async fn me(&self, token: &str) -> ApiResult<User> {
        self.client.send(ApiRequest::get("auth/me").bearer(token)).await
    }

    /// Delete an account
    ///
    /// DELETE /users/<id>
    pub async fn delete(&self, user_id: i64) -> ApiResult<MessageResponse> {
        let request = ApiRequest::delete(format!("users/{user_id}")).session_auth();
        self.client.send(request).await
    }

    /// Update account fields
    ///
    /// PUT /users/<id>
    ///
    /// Fails with a validation error, without contacting the server, when
    /// `update.id` is missing.
    pub async fn update(&self, update: &UserUpdate) -> ApiResult<MessageResponse> {
        let id = update
            .id
            .ok_or_else(|| ApiError::validation("id", "ID is required"))?;

        let request = ApiRequest::put(format!("users/{id}"))
            .session_auth()
            .json(update)?;
        self.client.send(request).await
    }

    /// Replace the profile picture
    ///
    /// PUT /users/<id> with a `multipart/form-data` body holding the
    /// `profilePicture` file, the `id`, and the JSON-encoded `user`.
    ///
    /// Fails with a validation error, without contacting the server, when
    /// either the file or the user is missing.
    pub async fn update_profile_picture(
        &self,
        file: Option<ProfilePicture>,
        id: i64,
        user: Option<&User>,
    ) -> ApiResult<MessageResponse> {
        let file = file.ok_or_else(|| ApiError::validation("file", "file is required"))?;
        let user = user.ok_or_else(|| ApiError::validation("user", "user is required"))?;

        let form = Form::new()
            .part("profilePicture", file.into_part()?)
            .text("id", id.to_string())
            .text("user", serde_json::to_string(user)?);

        let request = ApiRequest::put(format!("users/{id}"))
            .session_auth()
            .multipart(form);
        self.client.send(request).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// First and last name joined, skipping missing parts
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial account update; only present fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// Account to update; required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Any other fields the backend accepts
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserUpdate {
    /// Start an update for the given account
    #[must_use]
    pub fn for_user(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Image uploaded as a profile picture
#[derive(Debug, Clone)]
pub struct ProfilePicture {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ProfilePicture {
    /// Wrap in-memory image data
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).map(str::to_string);
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Read an image from disk
    pub fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> ApiResult<Part> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|_| ApiError::validation("file", format!("invalid MIME type: {mime}"))),
            None => Ok(part),
        }
    }
}

/// MIME type for the image extensions the backend accepts
fn mime_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
