//! Request validation through the full router. The database handle is
//! disconnected, so every request here must be answered before any query runs.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use storefront_api::{render::Views, routes::build_app, state::AppState};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let views = Views::new().expect("templates register");
    build_app(AppState::new(DatabaseConnection::Disconnected, views), "public")
}

async fn send(method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn assert_json_error(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
    assert!(body.get("payload").is_none());
    body
}

#[tokio::test]
async fn health_responds_with_request_id() {
    let response = send(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["payload"]["status"], "ok");
}

#[tokio::test]
async fn malformed_product_id_is_a_bad_request() {
    for method in [Method::GET, Method::DELETE] {
        let response = send(method, "/api/products/not-an-id", None).await;
        let body = assert_json_error(response, StatusCode::BAD_REQUEST).await;
        assert!(body["message"].as_str().unwrap().contains("invalid identifier"));
    }
}

#[tokio::test]
async fn malformed_cart_id_is_a_bad_request() {
    let response = send(Method::GET, "/api/carts/12345", None).await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;

    let uri = format!("/api/carts/{}/product/xyz", Uuid::new_v4());
    let response = send(Method::POST, &uri, None).await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn listing_rejects_bad_query_parameters() {
    for uri in [
        "/api/products?limit=abc",
        "/api/products?page=0",
        "/api/products?sort=sideways",
    ] {
        let response = send(Method::GET, uri, None).await;
        assert_json_error(response, StatusCode::BAD_REQUEST).await;
    }
}

#[tokio::test]
async fn huge_page_numbers_are_rejected_not_panicking() {
    for uri in [
        "/api/products?page=18446744073709551615&limit=100",
        "/api/products?page=92233720368547760&limit=100",
    ] {
        let response = send(Method::GET, uri, None).await;
        let body = assert_json_error(response, StatusCode::BAD_REQUEST).await;
        assert!(body["message"].as_str().unwrap().contains("page out of range"));
    }

    let response = send(Method::GET, "/products?page=18446744073709551615", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = text_body(response).await;
    assert!(html.contains("page out of range"));
}

#[tokio::test]
async fn create_product_rejects_missing_fields_and_bad_json() {
    let response = send(
        Method::POST,
        "/api/products",
        Some(json!({ "title": "Lamp", "price": 10 })),
    )
    .await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn create_product_rejects_negative_price() {
    let response = send(
        Method::POST,
        "/api/products",
        Some(json!({
            "title": "Lamp",
            "description": "Bright",
            "code": "LAMP-9",
            "price": -1,
            "stock": 2,
            "category": "home"
        })),
    )
    .await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn bulk_replace_requires_a_sequence() {
    let uri = format!("/api/carts/{}", Uuid::new_v4());
    for body in [
        json!({ "products": "not a list" }),
        json!({ "products": { "product": Uuid::new_v4(), "quantity": 1 } }),
        json!({ "items": [] }),
    ] {
        let response = send(Method::PUT, &uri, Some(body)).await;
        let body = assert_json_error(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(body["message"], "expected an array of products");
    }
}

#[tokio::test]
async fn quantity_update_requires_positive_number() {
    let uri = format!("/api/carts/{}/products/{}", Uuid::new_v4(), Uuid::new_v4());
    for quantity in [json!("abc"), json!(0), json!(-3), json!(null), json!(2.5)] {
        let response = send(Method::PUT, &uri, Some(json!({ "quantity": quantity }))).await;
        assert_json_error(response, StatusCode::BAD_REQUEST).await;
    }

    let response = send(Method::PUT, &uri, Some(json!({}))).await;
    assert_json_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn cart_view_renders_error_page_for_malformed_id() {
    let response = send(Method::GET, "/carts/not-an-id", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let html = text_body(response).await;
    assert!(html.contains("invalid identifier"));
}

#[tokio::test]
async fn products_view_renders_error_page_for_bad_sort() {
    let response = send(Method::GET, "/products?sort=sideways", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = text_body(response).await;
    assert!(html.contains("<html"));
    assert!(html.contains("sort must be"));
}

#[tokio::test]
async fn unknown_routes_fall_back_to_json_not_found() {
    let response = send(Method::GET, "/definitely/not/here", None).await;
    assert_json_error(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn static_assets_are_served() {
    let response = send(Method::GET, "/css/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
