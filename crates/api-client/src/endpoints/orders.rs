//! Order endpoints
//!
//! Listings are locale scoped: the language code is embedded in the path
//! and the backend answers with product names and descriptions in that
//! language.

use crate::client::{ApiRequest, FoodorderClient};
use crate::config::is_language_code;
use crate::error::{ApiError, ApiResult};
use crate::format::{fi_date, fi_time};
use crate::types::MessageResponse;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// Fallback message for a rejected status change
const STATUS_UPDATE_FAILED: &str = "Failed to update order status";

/// Orders API interface
#[derive(Clone)]
pub struct OrdersApi {
    client: FoodorderClient,
    language: String,
}

impl OrdersApi {
    /// Create a new orders API interface
    pub(crate) fn new(client: FoodorderClient, language: String) -> Self {
        Self { client, language }
    }

    /// Same interface, scoped to another language
    #[must_use]
    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Language the listings are requested in
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Orders placed by the logged-in user
    ///
    /// GET /orders/myorders/<lang>
    pub async fn mine(&self) -> ApiResult<Vec<Order>> {
        let lang = self.checked_language()?;
        let request = ApiRequest::get(format!("orders/myorders/{lang}")).session_auth();
        self.client.send(request).await
    }

    /// Every order; the backend only serves this to privileged accounts
    ///
    /// GET /orders/<lang>
    pub async fn all(&self) -> ApiResult<Vec<Order>> {
        let lang = self.checked_language()?;
        let request = ApiRequest::get(format!("orders/{lang}")).session_auth();
        self.client.send(request).await
    }

    /// Ask the backend to move an order to another status
    ///
    /// PUT /orders/<order_id> with `{"status": status}`
    ///
    /// The status is passed through unchecked so the backend stays the
    /// authority on valid transitions. Failures are logged before they are
    /// returned.
    pub async fn update_status(
        &self,
        order_id: i64,
        status: &str,
        token: &str,
    ) -> ApiResult<MessageResponse> {
        let result = self.send_status_update(order_id, status, token).await;
        if let Err(ref e) = result {
            error!(order_id, status, error = %e, "Error updating order status");
        }
        result
    }

    async fn send_status_update(
        &self,
        order_id: i64,
        status: &str,
        token: &str,
    ) -> ApiResult<MessageResponse> {
        let request = ApiRequest::put(format!("orders/{order_id}"))
            .bearer(token)
            .fallback_message(STATUS_UPDATE_FAILED)
            .json(&StatusUpdate { status })?;
        self.client.send(request).await
    }

    fn checked_language(&self) -> ApiResult<&str> {
        if is_language_code(&self.language) {
            Ok(&self.language)
        } else {
            Err(ApiError::validation(
                "language",
                format!("not a valid language code: {:?}", self.language),
            ))
        }
    }
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
}

// ============================================================================
// Types
// ============================================================================

/// Order lifecycle states known to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Completed,
    Cancelled,
    /// A status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// All statuses the backend is known to use
    pub const KNOWN: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::OutForDelivery,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::OutForDelivery => "out-for-delivery",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// No further transitions are expected
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OrderStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for OrderStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ApiError::validation("status", format!("unknown order status: {s}")))
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    #[serde(deserialize_with = "number_or_string")]
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Order date as `d.M.yyyy`
    #[must_use]
    pub fn formatted_date(&self) -> Option<String> {
        self.order_date.as_deref().and_then(fi_date)
    }

    /// Order time as `HH:MM:SS`
    #[must_use]
    pub fn formatted_time(&self) -> Option<String> {
        self.order_date.as_deref().and_then(fi_time)
    }

    /// Sum of the line totals, for comparison with `total_price`
    #[must_use]
    pub fn computed_total(&self) -> f64 {
        self.products.iter().map(OrderProduct::line_total).sum()
    }
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProduct {
    pub name: String,
    pub quantity: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderProduct {
    /// Quantity times unit price
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Decimal columns come back either as JSON numbers or as strings
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
