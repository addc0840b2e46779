//! Reservation endpoints and the display projection over them

use crate::client::{ApiRequest, FoodorderClient};
use crate::error::ApiResult;
use crate::format::fi_date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::{error, warn};

/// Reservations API interface
#[derive(Clone)]
pub struct ReservationsApi {
    client: FoodorderClient,
}

impl ReservationsApi {
    /// Create a new reservations API interface
    pub(crate) fn new(client: FoodorderClient) -> Self {
        Self { client }
    }

    /// Fetch all reservations with `reservation_date` rewritten for display
    ///
    /// GET /reservations/
    pub async fn list(&self) -> ApiResult<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> =
            self.client.send(ApiRequest::get("reservations/")).await?;
        reservations.iter_mut().for_each(Reservation::localize_date);
        Ok(reservations)
    }

    /// A read-only view that loads the reservations on first use
    #[must_use]
    pub fn board(&self) -> ReservationBoard {
        ReservationBoard {
            api: self.clone(),
            loaded: OnceCell::new(),
        }
    }
}

/// Reservations loaded once and kept for display
///
/// The first call to [`reservations`](Self::reservations) fetches the list;
/// later calls return the same data. A failed load is logged and returned,
/// and the next call tries again.
pub struct ReservationBoard {
    api: ReservationsApi,
    loaded: OnceCell<Vec<Reservation>>,
}

impl ReservationBoard {
    /// The projected reservation list
    pub async fn reservations(&self) -> ApiResult<&[Reservation]> {
        let list = self
            .loaded
            .get_or_try_init(|| async {
                self.api.list().await.inspect_err(|e| {
                    error!(error = %e, "Error getting reservations");
                })
            })
            .await?;
        Ok(list)
    }

    /// Whether the list has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }
}

/// Reservation entity
///
/// Only the fields the client touches are typed; everything else is carried
/// through in `extra` exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Backend identifier; `null` when the item has none
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default)]
    pub reservation_date: Value,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reservation {
    /// Replace `reservation_date` with its `d.M.yyyy` rendering
    ///
    /// Values that are not recognizable dates are left as they are.
    pub fn localize_date(&mut self) {
        let formatted = self.reservation_date.as_str().and_then(fi_date);
        match formatted {
            Some(date) => self.reservation_date = Value::String(date),
            None => warn!(
                id = %self.id,
                reservation_date = %self.reservation_date,
                "Unrecognized reservation date left unchanged"
            ),
        }
    }

    /// `reservation_date` as text, when it is a string
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.reservation_date.as_str()
    }
}
