//! Order endpoints against the mock backend.

mod common;

use axum::http::Method;
use common::{MockBackend, ADMIN_TOKEN, USER_TOKEN};
use foodorder_api_client::{ErrorKind, OrderStatus};

#[tokio::test]
async fn mine_is_scoped_by_configured_language() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    client.session().set_token(USER_TOKEN).unwrap();

    let orders = client.orders().mine().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].products[0].name, "Pizza Margherita");
    assert_eq!(orders[0].status, OrderStatus::Preparing);
    assert_eq!(orders[1].status, OrderStatus::Cancelled);

    let request = backend.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/orders/myorders/fi");
    assert_eq!(request.authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn language_override() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    client.session().set_token(USER_TOKEN).unwrap();

    let orders = client.orders().in_language("en").mine().await.unwrap();
    assert_eq!(orders[0].products[0].name, "Margherita pizza");
    assert_eq!(backend.last_request().path, "/api/orders/myorders/en");
}

#[tokio::test]
async fn invalid_language_fails_before_network() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    for lang in ["", "fi/../users"] {
        let err = client.orders().in_language(lang).all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn all_orders_enforced_by_server() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    client.session().set_token(USER_TOKEN).unwrap();
    let err = client.orders().all().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Forbidden");

    client.session().set_token(ADMIN_TOKEN).unwrap();
    let orders = client.orders().all().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(backend.last_request().path, "/api/orders/fi");
}

#[tokio::test]
async fn update_status_sends_status_with_explicit_token() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let reply = client
        .orders()
        .update_status(1, OrderStatus::OutForDelivery.as_str(), ADMIN_TOKEN)
        .await
        .unwrap();
    assert_eq!(reply.message.as_deref(), Some("Order status updated"));

    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/api/orders/1");
    assert_eq!(request.authorization.as_deref(), Some("Bearer admin-token"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, serde_json::json!({"status": "out-for-delivery"}));
}

#[tokio::test]
async fn update_status_passes_unknown_values_through() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let reply = client
        .orders()
        .update_status(1, "refunded", ADMIN_TOKEN)
        .await
        .unwrap();
    assert_eq!(reply.extra["status"], "refunded");
}

#[tokio::test]
async fn update_status_failure_uses_fallback_message() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client
        .orders()
        .update_status(404, "ready", ADMIN_TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Failed to update order status");

    let err = client
        .orders()
        .update_status(1, "ready", USER_TOKEN)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn concurrent_operations_read_token_at_dispatch() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    client.session().set_token(USER_TOKEN).unwrap();
    let orders = client.orders();

    let mine = orders.mine().await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(
        backend.last_request().authorization.as_deref(),
        Some("Bearer tok-123")
    );

    // Built while the user token is stored, sent after the swap
    let pending_all = orders.all();
    let pending_mine = orders.mine();
    client.session().set_token(ADMIN_TOKEN).unwrap();

    let users = client.users();
    let (me, all, mine) = tokio::join!(users.me(USER_TOKEN), pending_all, pending_mine);
    assert_eq!(me.unwrap().id, 3);
    assert_eq!(all.unwrap().len(), 2);
    assert_eq!(mine.unwrap().len(), 2);

    let requests = backend.requests();
    assert_eq!(requests.len(), 4);
    for request in &requests[1..] {
        let expected = match request.path.as_str() {
            "/api/auth/me" => "Bearer tok-123",
            "/api/orders/fi" | "/api/orders/myorders/fi" => "Bearer admin-token",
            other => panic!("unexpected request to {other}"),
        };
        assert_eq!(request.authorization.as_deref(), Some(expected));
    }
}
