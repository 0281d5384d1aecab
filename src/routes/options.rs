use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::options::{
        AttachOptionRequest, CarOptionLink, CreateOptionRequest, OptionList, UpdateOptionRequest,
    },
    error::AppResult,
    models::VehicleOption,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::option_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_options).post(create_option))
        .route("/car/{vin}", get(list_car_options).post(attach_option))
        .route("/car/{vin}/{option_id}", delete(detach_option))
        .route(
            "/{id}",
            get(get_option).put(update_option).delete(delete_option),
        )
}

#[utoipa::path(
    get,
    path = "/api/options",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List options", body = ApiResponse<OptionList>)
    ),
    tag = "Options"
)]
pub async fn list_options(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<OptionList>>> {
    let resp = option_service::list_options(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/options/{id}",
    params(("id" = String, Path, description = "Option ID")),
    responses(
        (status = 200, description = "Get option", body = ApiResponse<VehicleOption>),
        (status = 404, description = "Option not found"),
    ),
    tag = "Options"
)]
pub async fn get_option(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<VehicleOption>>> {
    let resp = option_service::get_option(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/options",
    request_body = CreateOptionRequest,
    responses(
        (status = 201, description = "Create option", body = ApiResponse<VehicleOption>),
        (status = 409, description = "Option already exists"),
    ),
    tag = "Options"
)]
pub async fn create_option(
    State(state): State<AppState>,
    Json(payload): Json<CreateOptionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<VehicleOption>>)> {
    let resp = option_service::create_option(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/options/{id}",
    params(("id" = String, Path, description = "Option ID")),
    request_body = UpdateOptionRequest,
    responses(
        (status = 200, description = "Updated option", body = ApiResponse<VehicleOption>),
        (status = 404, description = "Option not found"),
    ),
    tag = "Options"
)]
pub async fn update_option(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOptionRequest>,
) -> AppResult<Json<ApiResponse<VehicleOption>>> {
    let resp = option_service::update_option(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/options/{id}",
    params(("id" = String, Path, description = "Option ID")),
    responses(
        (status = 200, description = "Deleted option and its car links", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Option not found"),
    ),
    tag = "Options"
)]
pub async fn delete_option(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = option_service::delete_option(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/options/car/{vin}",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Options fitted to a car", body = ApiResponse<OptionList>),
        (status = 404, description = "Car not found"),
    ),
    tag = "Options"
)]
pub async fn list_car_options(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> AppResult<Json<ApiResponse<OptionList>>> {
    let resp = option_service::list_car_options(&state, &vin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/options/car/{vin}",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    request_body = AttachOptionRequest,
    responses(
        (status = 201, description = "Option added to car", body = ApiResponse<CarOptionLink>),
        (status = 404, description = "Car or option not found"),
        (status = 409, description = "Option is already added to this car"),
    ),
    tag = "Options"
)]
pub async fn attach_option(
    State(state): State<AppState>,
    Path(vin): Path<String>,
    Json(payload): Json<AttachOptionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CarOptionLink>>)> {
    let resp = option_service::attach_option(&state, &vin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/options/car/{vin}/{option_id}",
    params(
        ("vin" = String, Path, description = "Vehicle identification number"),
        ("option_id" = String, Path, description = "Option ID"),
    ),
    responses(
        (status = 200, description = "Option removed from car", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Option for this car not found"),
    ),
    tag = "Options"
)]
pub async fn detach_option(
    State(state): State<AppState>,
    Path((vin, option_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = option_service::detach_option(&state, &vin, &option_id).await?;
    Ok(Json(resp))
}
