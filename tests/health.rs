use storefront_api::{response::Status, routes::health::health_check};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.status, Status::Success);
    assert_eq!(response.0.message.as_deref(), Some("Health check"));

    let data = response.0.payload.expect("health data");
    assert_eq!(data.status, "ok");
}
