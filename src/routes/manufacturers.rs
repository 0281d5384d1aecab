use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::manufacturers::{CreateManufacturerRequest, ManufacturerList, UpdateManufacturerRequest},
    error::AppResult,
    models::Manufacturer,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::manufacturer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/{id}",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
}

#[utoipa::path(
    get,
    path = "/api/manufacturers",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List manufacturers", body = ApiResponse<ManufacturerList>)
    ),
    tag = "Manufacturers"
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ManufacturerList>>> {
    let resp = manufacturer_service::list_manufacturers(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/manufacturers/{id}",
    params(("id" = String, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Get manufacturer", body = ApiResponse<Manufacturer>),
        (status = 404, description = "Manufacturer not found"),
    ),
    tag = "Manufacturers"
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Manufacturer>>> {
    let resp = manufacturer_service::get_manufacturer(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/manufacturers",
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Create manufacturer", body = ApiResponse<Manufacturer>),
        (status = 409, description = "Manufacturer already exists"),
    ),
    tag = "Manufacturers"
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    Json(payload): Json<CreateManufacturerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Manufacturer>>)> {
    let resp = manufacturer_service::create_manufacturer(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/manufacturers/{id}",
    params(("id" = String, Path, description = "Manufacturer ID")),
    request_body = UpdateManufacturerRequest,
    responses(
        (status = 200, description = "Updated manufacturer", body = ApiResponse<Manufacturer>),
        (status = 404, description = "Manufacturer not found"),
    ),
    tag = "Manufacturers"
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateManufacturerRequest>,
) -> AppResult<Json<ApiResponse<Manufacturer>>> {
    let resp = manufacturer_service::update_manufacturer(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/manufacturers/{id}",
    params(("id" = String, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Deleted manufacturer", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Manufacturer still has models"),
    ),
    tag = "Manufacturers"
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = manufacturer_service::delete_manufacturer(&state, &id).await?;
    Ok(Json(resp))
}
