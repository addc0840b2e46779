//! In-process mock of the Foodorder backend.
//!
//! Binds to a random local port and records every request it receives so
//! tests can assert on the exact method, path, headers and body the client
//! produced.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use foodorder_api_client::{ClientConfig, FoodorderClient, Session};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const USER_TOKEN: &str = "tok-123";
pub const ADMIN_TOKEN: &str = "admin-token";

/// A request as the backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    fail_reservations: Arc<AtomicBool>,
}

impl MockState {
    /// Make the next `/reservations/` call answer 500
    pub fn fail_next_reservations(&self) {
        self.fail_reservations.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// Client with an in-memory session pointed at this backend
    pub fn client(&self) -> FoodorderClient {
        self.client_with_session(Session::in_memory())
    }

    pub fn client_with_session(&self, session: Session) -> FoodorderClient {
        let config = ClientConfig::development().with_base_url(&self.base_url);
        FoodorderClient::with_session(config, session).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

fn router(state: MockState) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/users", post(register))
        .route("/api/users/{id}", put(update_user).delete(delete_user))
        .route("/api/orders/myorders/{lang}", get(my_orders))
        .route("/api/orders/{key}", get(all_orders).put(update_order))
        .route("/api/reservations/", get(reservations))
        .route("/api/broken", get(broken))
        .route("/api/garbage", get(garbage))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .map(|v| v.to_str().unwrap_or_default().to_string())
    };

    state.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        request_id: header_value(header::HeaderName::from_static("x-request-id")),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    next.run(Request::from_parts(parts, axum::body::Body::from(bytes)))
        .await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer")
        .map(str::trim)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthorized"})),
    )
        .into_response()
}

fn sample_user(id: i64) -> Value {
    json!({
        "id": id,
        "username": "maija",
        "first_name": "Maija",
        "last_name": "Meikäläinen",
        "email": "maija@example.com",
        "role": "customer"
    })
}

fn sample_orders(lang: &str) -> Value {
    let name = if lang == "fi" { "Pizza Margherita" } else { "Margherita pizza" };
    json!([
        {
            "orderId": 1,
            "products": [{"name": name, "quantity": 2, "price": "12.50"}],
            "totalPrice": "25.00",
            "status": "preparing",
            "orderDate": "2024-01-05T09:05:00Z"
        },
        {
            "orderId": 2,
            "products": [],
            "totalPrice": 0,
            "status": "cancelled",
            "orderDate": "2024-01-06T10:00:00Z"
        }
    ])
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "maija" && body["password"] == "salasana" {
        Json(json!({
            "message": "Login successful",
            "token": USER_TOKEN,
            "user": sample_user(3)
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid username or password"})),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(USER_TOKEN) => Json(sample_user(3)).into_response(),
        Some(ADMIN_TOKEN) => {
            let mut user = sample_user(1);
            user["role"] = json!("admin");
            Json(user).into_response()
        }
        _ => unauthorized(),
    }
}

async fn register(Json(mut body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Username already exists"})),
        )
            .into_response();
    }
    body["id"] = json!(99);
    if let Some(obj) = body.as_object_mut() {
        obj.remove("password");
    }
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_user(Path(id): Path<i64>, headers: HeaderMap, _body: Bytes) -> Response {
    match bearer(&headers) {
        Some(USER_TOKEN | ADMIN_TOKEN) => {
            Json(json!({"message": "User updated", "user_id": id})).into_response()
        }
        _ => unauthorized(),
    }
}

async fn delete_user(Path(id): Path<i64>, headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(ADMIN_TOKEN) => Json(json!({"message": "User deleted", "user_id": id})).into_response(),
        Some(USER_TOKEN) => (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "Forbidden"})),
        )
            .into_response(),
        _ => unauthorized(),
    }
}

async fn my_orders(Path(lang): Path<String>, headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(USER_TOKEN | ADMIN_TOKEN) => Json(sample_orders(&lang)).into_response(),
        _ => unauthorized(),
    }
}

async fn all_orders(Path(lang): Path<String>, headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(ADMIN_TOKEN) => Json(sample_orders(&lang)).into_response(),
        Some(USER_TOKEN) => (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "Forbidden"})),
        )
            .into_response(),
        _ => unauthorized(),
    }
}

async fn update_order(Path(id): Path<String>, headers: HeaderMap, body: Bytes) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return unauthorized();
    }
    if id == "404" {
        return StatusCode::NOT_FOUND.into_response();
    }
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(json!({"message": "Order status updated", "status": body["status"]})).into_response()
}

async fn reservations(State(state): State<MockState>) -> Response {
    if state.fail_reservations.swap(false, Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Database unavailable"})),
        )
            .into_response();
    }

    Json(json!([
        {
            "id": 1,
            "reservation_date": "2024-01-05T00:00:00Z",
            "reservation_time": "18:00:00",
            "guests": 4,
            "name": "Virtanen"
        },
        {
            "id": 2,
            "reservation_date": "2024-02-14",
            "reservation_time": "19:30:00",
            "guests": 2,
            "name": "Korhonen"
        }
    ]))
    .into_response()
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response()
}

async fn garbage() -> Response {
    (StatusCode::OK, "definitely not json").into_response()
}
