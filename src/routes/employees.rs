use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        employees::{CreateEmployeeRequest, EmployeeList, UpdateEmployeeRequest},
        sales::SaleList,
        test_drives::TestDriveList,
    },
    error::AppResult,
    models::Employee,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::employee_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/{id}/sales", get(list_employee_sales))
        .route("/{id}/test-drives", get(list_employee_test_drives))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List employees", body = ApiResponse<EmployeeList>)
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<EmployeeList>>> {
    let resp = employee_service::list_employees(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Get employee", body = ApiResponse<Employee>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let resp = employee_service::get_employee(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Create employee", body = ApiResponse<Employee>),
        (status = 409, description = "Employee already exists"),
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    let resp = employee_service::create_employee(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated employee", body = ApiResponse<Employee>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let resp = employee_service::update_employee(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Deleted employee", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee has sales or test drives"),
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = employee_service::delete_employee(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}/sales",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Sales of one employee", body = ApiResponse<SaleList>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn list_employee_sales(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let resp = employee_service::list_employee_sales(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}/test-drives",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Test drives of one employee", body = ApiResponse<TestDriveList>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn list_employee_test_drives(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TestDriveList>>> {
    let resp = employee_service::list_employee_test_drives(&state, &id).await?;
    Ok(Json(resp))
}
