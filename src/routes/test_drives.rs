use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::test_drives::{CreateTestDriveRequest, TestDriveList, UpdateTestDriveRequest},
    error::AppResult,
    models::TestDriveDetails,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::test_drive_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_test_drives).post(create_test_drive))
        .route("/car/{vin}", get(list_car_test_drives))
        .route(
            "/{id}",
            get(get_test_drive)
                .put(update_test_drive)
                .delete(delete_test_drive),
        )
}

#[utoipa::path(
    get,
    path = "/api/test-drives",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List test drives", body = ApiResponse<TestDriveList>)
    ),
    tag = "Test drives"
)]
pub async fn list_test_drives(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<TestDriveList>>> {
    let resp = test_drive_service::list_test_drives(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/test-drives/{id}",
    params(("id" = String, Path, description = "Test drive ID")),
    responses(
        (status = 200, description = "Get test drive", body = ApiResponse<TestDriveDetails>),
        (status = 404, description = "Test drive not found"),
    ),
    tag = "Test drives"
)]
pub async fn get_test_drive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TestDriveDetails>>> {
    let resp = test_drive_service::get_test_drive(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/test-drives/car/{vin}",
    params(("vin" = String, Path, description = "Vehicle identification number")),
    responses(
        (status = 200, description = "Test drives of one car", body = ApiResponse<TestDriveList>),
        (status = 404, description = "Car not found"),
    ),
    tag = "Test drives"
)]
pub async fn list_car_test_drives(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> AppResult<Json<ApiResponse<TestDriveList>>> {
    let resp = test_drive_service::list_car_test_drives(&state, &vin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/test-drives",
    request_body = CreateTestDriveRequest,
    responses(
        (status = 201, description = "Test drive booked", body = ApiResponse<TestDriveDetails>),
        (status = 400, description = "Car already sold or invalid time window"),
        (status = 404, description = "Customer, car or employee not found"),
        (status = 409, description = "Test drive already exists"),
    ),
    tag = "Test drives"
)]
pub async fn create_test_drive(
    State(state): State<AppState>,
    Json(payload): Json<CreateTestDriveRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TestDriveDetails>>)> {
    let resp = test_drive_service::create_test_drive(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/test-drives/{id}",
    params(("id" = String, Path, description = "Test drive ID")),
    request_body = UpdateTestDriveRequest,
    responses(
        (status = 200, description = "Updated test drive", body = ApiResponse<TestDriveDetails>),
        (status = 400, description = "Invalid time window"),
        (status = 404, description = "Test drive not found"),
    ),
    tag = "Test drives"
)]
pub async fn update_test_drive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTestDriveRequest>,
) -> AppResult<Json<ApiResponse<TestDriveDetails>>> {
    let resp = test_drive_service::update_test_drive(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/test-drives/{id}",
    params(("id" = String, Path, description = "Test drive ID")),
    responses(
        (status = 200, description = "Deleted test drive", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Test drive not found"),
    ),
    tag = "Test drives"
)]
pub async fn delete_test_drive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = test_drive_service::delete_test_drive(&state, &id).await?;
    Ok(Json(resp))
}
