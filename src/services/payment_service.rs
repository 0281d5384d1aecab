use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    db::DbPool,
    dto::payments::{CreatePaymentRequest, PaymentList, UpdatePaymentRequest},
    entity::payments::{ActiveModel, Entity as Payments, Model as PaymentModel},
    error::{AppError, AppResult},
    models::{Payment, PaymentDetails},
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{lookup, require_non_negative, require_text, to_utc};

const PAYMENT_DETAILS_SELECT: &str = r#"
    SELECT p.*,
           s.customer_id,
           s.vin,
           s.sale_date,
           s.total_amount AS sale_total_amount,
           cu.full_name AS customer_name
    FROM payments p
    JOIN sales s ON p.sale_id = s.id
    JOIN customers cu ON s.customer_id = cu.id
"#;

pub async fn list_payments(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<PaymentList>> {
    let (page, limit, offset) = pagination.normalize();
    let sql =
        format!("{PAYMENT_DETAILS_SELECT} ORDER BY p.payment_date DESC, p.id LIMIT $1 OFFSET $2");
    let items = sqlx::query_as::<_, PaymentDetails>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let total: (i64,) = sqlx::query_as("SELECT count(*) FROM payments")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Payments",
        PaymentList { items },
        Some(meta),
    ))
}

pub async fn get_payment(state: &AppState, id: &str) -> AppResult<ApiResponse<PaymentDetails>> {
    let payment = fetch_payment_details(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment"))?;
    Ok(ApiResponse::success("Payment", payment, None))
}

pub async fn create_payment(
    state: &AppState,
    payload: CreatePaymentRequest,
) -> AppResult<ApiResponse<PaymentDetails>> {
    require_text("id", &payload.id)?;
    require_non_negative("amount", payload.amount)?;

    lookup::sale(&state.orm, &payload.sale_id).await?;
    if Payments::find_by_id(payload.id.as_str())
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "payment {} already exists",
            payload.id
        )));
    }

    let payment = ActiveModel {
        id: Set(payload.id),
        sale_id: Set(payload.sale_id),
        payment_date: Set(payload.payment_date),
        amount: Set(payload.amount),
        method: Set(payload.method),
        status: Set(payload.status),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        "payment_create",
        "payments",
        serde_json::json!({ "payment_id": payment.id, "sale_id": payment.sale_id }),
    )
    .await;

    let details = fetch_payment_details(&state.pool, &payment.id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment"))?;
    Ok(ApiResponse::success(
        "Payment created",
        details,
        Some(Meta::empty()),
    ))
}

pub async fn update_payment(
    state: &AppState,
    id: &str,
    payload: UpdatePaymentRequest,
) -> AppResult<ApiResponse<PaymentDetails>> {
    let existing = Payments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Payment"))?;

    let mut active: ActiveModel = existing.into();
    if let Some(payment_date) = payload.payment_date {
        active.payment_date = Set(payment_date);
    }
    if let Some(amount) = payload.amount {
        require_non_negative("amount", amount)?;
        active.amount = Set(amount);
    }
    if let Some(method) = payload.method {
        active.method = Set(method);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    let payment = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "payment_update",
        "payments",
        serde_json::json!({ "payment_id": payment.id }),
    )
    .await;

    let details = fetch_payment_details(&state.pool, &payment.id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment"))?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

pub async fn delete_payment(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let result = Payments::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Payment"));
    }

    audit::record(
        &state.pool,
        "payment_delete",
        "payments",
        serde_json::json!({ "payment_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

async fn fetch_payment_details(pool: &DbPool, id: &str) -> AppResult<Option<PaymentDetails>> {
    let sql = format!("{PAYMENT_DETAILS_SELECT} WHERE p.id = $1");
    let payment = sqlx::query_as::<_, PaymentDetails>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(payment)
}

pub(crate) fn payment_from_entity(model: PaymentModel) -> Payment {
    Payment {
        id: model.id,
        sale_id: model.sale_id,
        payment_date: model.payment_date,
        amount: model.amount,
        method: model.method,
        status: model.status,
        created_at: to_utc(model.created_at),
    }
}
