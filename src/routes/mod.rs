use axum::Router;

use crate::state::AppState;

pub mod car_models;
pub mod cars;
pub mod customers;
pub mod doc;
pub mod employees;
pub mod health;
pub mod manufacturers;
pub mod options;
pub mod params;
pub mod payments;
pub mod sales;
pub mod test_drives;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/manufacturers", manufacturers::router())
        .nest("/models", car_models::router())
        .nest("/cars", cars::router())
        .nest("/options", options::router())
        .nest("/customers", customers::router())
        .nest("/employees", employees::router())
        .nest("/sales", sales::router())
        .nest("/payments", payments::router())
        .nest("/test-drives", test_drives::router())
}
