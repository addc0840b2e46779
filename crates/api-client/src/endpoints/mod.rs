//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one backend resource.
//!
//! ## Mapping to the backend
//!
//! | Module | Paths | Auth |
//! |--------|-------|------|
//! | `auth` | `/auth/login` | none |
//! | `users` | `/users`, `/users/{id}`, `/auth/me` | bearer |
//! | `orders` | `/orders/myorders/{lang}`, `/orders/{lang}`, `/orders/{id}` | bearer |
//! | `reservations` | `/reservations/` | none |

pub mod auth;
pub mod orders;
pub mod reservations;
pub mod users;

pub use auth::AuthApi;
pub use orders::OrdersApi;
pub use reservations::{ReservationBoard, ReservationsApi};
pub use users::UsersApi;
