use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::car_models::{
        CarModelList, CreateCarModelRequest, ManufacturerModelList, UpdateCarModelRequest,
    },
    error::AppResult,
    models::CarModelDetails,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::car_model_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_models).post(create_model))
        .route(
            "/manufacturer/{manufacturer_id}",
            get(list_models_by_manufacturer),
        )
        .route(
            "/{id}",
            get(get_model).put(update_model).delete(delete_model),
        )
}

#[utoipa::path(
    get,
    path = "/api/models",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List models with their manufacturer", body = ApiResponse<CarModelList>)
    ),
    tag = "Models"
)]
pub async fn list_models(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CarModelList>>> {
    let resp = car_model_service::list_models(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/models/{id}",
    params(("id" = String, Path, description = "Model ID")),
    responses(
        (status = 200, description = "Get model", body = ApiResponse<CarModelDetails>),
        (status = 404, description = "Model not found"),
    ),
    tag = "Models"
)]
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CarModelDetails>>> {
    let resp = car_model_service::get_model(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/models/manufacturer/{manufacturer_id}",
    params(("manufacturer_id" = String, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Models of one manufacturer", body = ApiResponse<ManufacturerModelList>),
        (status = 404, description = "Manufacturer not found"),
    ),
    tag = "Models"
)]
pub async fn list_models_by_manufacturer(
    State(state): State<AppState>,
    Path(manufacturer_id): Path<String>,
) -> AppResult<Json<ApiResponse<ManufacturerModelList>>> {
    let resp = car_model_service::list_models_by_manufacturer(&state, &manufacturer_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/models",
    request_body = CreateCarModelRequest,
    responses(
        (status = 201, description = "Create model", body = ApiResponse<CarModelDetails>),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Model already exists"),
    ),
    tag = "Models"
)]
pub async fn create_model(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarModelRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CarModelDetails>>)> {
    let resp = car_model_service::create_model(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/models/{id}",
    params(("id" = String, Path, description = "Model ID")),
    request_body = UpdateCarModelRequest,
    responses(
        (status = 200, description = "Updated model", body = ApiResponse<CarModelDetails>),
        (status = 404, description = "Model not found"),
    ),
    tag = "Models"
)]
pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCarModelRequest>,
) -> AppResult<Json<ApiResponse<CarModelDetails>>> {
    let resp = car_model_service::update_model(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/models/{id}",
    params(("id" = String, Path, description = "Model ID")),
    responses(
        (status = 200, description = "Deleted model", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Model not found"),
        (status = 409, description = "Model still has cars"),
    ),
    tag = "Models"
)]
pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = car_model_service::delete_model(&state, &id).await?;
    Ok(Json(resp))
}
