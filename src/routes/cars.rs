use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::cars::{CarList, CreateCarRequest, ModelCarList, UpdateCarRequest},
    error::AppResult,
    models::CarDetails,
    response::{ApiResponse, DeletedRecord},
    routes::params::CarListQuery,
    services::car_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/model/{model_id}", get(list_cars_by_model))
        .route("/{vin}", get(get_car).put(update_car).delete(delete_car))
}

#[utoipa::path(
    get,
    path = "/api/cars",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "in-stock, on-test-drive, sold, ordered or in-transit"),
    ),
    responses(
        (status = 200, description = "List cars with model, manufacturer and options", body = ApiResponse<CarList>),
        (status = 400, description = "Unknown status filter"),
    ),
    tag = "Cars"
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarListQuery>,
) -> AppResult<Json<ApiResponse<CarList>>> {
    let resp = car_service::list_cars(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cars/{vin}",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Get car", body = ApiResponse<CarDetails>),
        (status = 404, description = "Car not found"),
    ),
    tag = "Cars"
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> AppResult<Json<ApiResponse<CarDetails>>> {
    let resp = car_service::get_car(&state, &vin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cars/model/{model_id}",
    params(("model_id" = String, Path, description = "Model ID")),
    responses(
        (status = 200, description = "Cars of one model", body = ApiResponse<ModelCarList>),
        (status = 404, description = "Model not found"),
    ),
    tag = "Cars"
)]
pub async fn list_cars_by_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> AppResult<Json<ApiResponse<ModelCarList>>> {
    let resp = car_service::list_cars_by_model(&state, &model_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Create car", body = ApiResponse<CarDetails>),
        (status = 400, description = "Invalid car"),
        (status = 404, description = "Model or option not found"),
        (status = 409, description = "Car already exists"),
    ),
    tag = "Cars"
)]
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CarDetails>>)> {
    let resp = car_service::create_car(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/cars/{vin}",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Updated car", body = ApiResponse<CarDetails>),
        (status = 400, description = "Invalid update"),
        (status = 404, description = "Car or option not found"),
        (status = 409, description = "Status is driven by a sale or test drive"),
    ),
    tag = "Cars"
)]
pub async fn update_car(
    State(state): State<AppState>,
    Path(vin): Path<String>,
    Json(payload): Json<UpdateCarRequest>,
) -> AppResult<Json<ApiResponse<CarDetails>>> {
    let resp = car_service::update_car(&state, &vin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cars/{vin}",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Deleted car", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Car not found"),
        (status = 409, description = "Car has a sale or test drives"),
    ),
    tag = "Cars"
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = car_service::delete_car(&state, &vin).await?;
    Ok(Json(resp))
}
