use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        payments::SalePaymentList,
        sales::{CreateSaleRequest, SaleList, UpdateSaleRequest},
    },
    error::AppResult,
    models::SaleDetails,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/{id}", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/{id}/payments", get(list_sale_payments))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List sales with customer, car, employee and payments", body = ApiResponse<SaleList>)
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let resp = sale_service::list_sales(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(("id" = String, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Get sale", body = ApiResponse<SaleDetails>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SaleDetails>>> {
    let resp = sale_service::get_sale(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}/payments",
    params(("id" = String, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Payments of one sale", body = ApiResponse<SalePaymentList>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn list_sale_payments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SalePaymentList>>> {
    let resp = sale_service::list_sale_payments(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded and car marked sold", body = ApiResponse<SaleDetails>),
        (status = 400, description = "Invalid sale"),
        (status = 404, description = "Customer, car or employee not found"),
        (status = 409, description = "Car already sold or sale already exists"),
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleDetails>>)> {
    let resp = sale_service::create_sale(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    params(("id" = String, Path, description = "Sale ID")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Updated sale", body = ApiResponse<SaleDetails>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSaleRequest>,
) -> AppResult<Json<ApiResponse<SaleDetails>>> {
    let resp = sale_service::update_sale(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    params(("id" = String, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Sale and its payments deleted, car status restored", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = sale_service::delete_sale(&state, &id).await?;
    Ok(Json(resp))
}
