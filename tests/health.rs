use car_dealership_api::routes::health::{health_check, welcome};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn welcome_points_to_docs() {
    let response = welcome().await;
    let data = response.0.data.expect("welcome data");
    assert_eq!(data.name, "car-dealership-api");
    assert_eq!(data.docs, "/docs");
}
