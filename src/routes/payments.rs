use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::payments::{CreatePaymentRequest, PaymentList, UpdatePaymentRequest},
    error::AppResult,
    models::PaymentDetails,
    response::{ApiResponse, DeletedRecord},
    routes::params::Pagination,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route(
            "/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List payments with their sale", body = ApiResponse<PaymentList>)
    ),
    tag = "Payments"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<PaymentList>>> {
    let resp = payment_service::list_payments(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = String, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Get payment", body = ApiResponse<PaymentDetails>),
        (status = 404, description = "Payment not found"),
    ),
    tag = "Payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<PaymentDetails>>> {
    let resp = payment_service::get_payment(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Create payment", body = ApiResponse<PaymentDetails>),
        (status = 404, description = "Sale not found"),
        (status = 409, description = "Payment already exists"),
    ),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PaymentDetails>>)> {
    let resp = payment_service::create_payment(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    params(("id" = String, Path, description = "Payment ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated payment", body = ApiResponse<PaymentDetails>),
        (status = 404, description = "Payment not found"),
    ),
    tag = "Payments"
)]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentDetails>>> {
    let resp = payment_service::update_payment(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    params(("id" = String, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Deleted payment", body = ApiResponse<DeletedRecord>),
        (status = 404, description = "Payment not found"),
    ),
    tag = "Payments"
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedRecord>>> {
    let resp = payment_service::delete_payment(&state, &id).await?;
    Ok(Json(resp))
}
