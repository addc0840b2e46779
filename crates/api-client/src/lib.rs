//! Authenticated API client for the Foodorder backend
//!
//! This crate wraps the Foodorder REST API: login, user accounts, orders and
//! reservations. Every operation makes a single attempt and reports failure
//! as an [`ApiError`]; nothing is cached except the session token.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URL, language and token path from environment variables
//! - **Injected session**: The bearer token lives in a [`Session`] handed to the client, persisted to disk by default
//! - **Typed errors**: Validation, HTTP status and transport failures are distinct variants
//! - **Request correlation**: Every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use foodorder_api_client::{Credentials, FoodorderClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FoodorderClient::new()?;
//!
//!     // Stores the token in the session
//!     client.auth().login(&Credentials::new("maija", "salasana")).await?;
//!
//!     for order in client.orders().mine().await? {
//!         println!("#{} {}", order.order_id, order.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod session;
pub mod types;

pub use client::{ApiRequest, Auth, Body, FoodorderClient};
pub use config::{ClientConfig, Environment};
pub use endpoints::auth::{Credentials, LoginResponse};
pub use endpoints::orders::{Order, OrderProduct, OrderStatus};
pub use endpoints::reservations::Reservation;
pub use endpoints::users::{NewUser, ProfilePicture, User, UserUpdate};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use types::MessageResponse;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::FoodorderClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{AuthApi, OrdersApi, ReservationBoard, ReservationsApi, UsersApi};
    pub use crate::error::{ApiError, ApiResult, ErrorKind};
    pub use crate::session::Session;
}
