//! Payloads shared by several endpoint modules

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Acknowledgement returned by write endpoints
///
/// The backend answers updates and deletes with a short JSON object that
/// usually carries a `message`; anything else it sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
