use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    audit,
    db::DbPool,
    dto::{
        payments::SalePaymentList,
        sales::{CreateSaleRequest, SaleList, UpdateSaleRequest},
    },
    entity::{
        Payments, Sales,
        payments::{ActiveModel as PaymentActive, Column as PaymentCol},
        sales::ActiveModel as SaleActive,
    },
    error::{AppError, AppResult},
    models::{CarStatus, Payment, SaleDetails},
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{
    car_status::{self, parse_status},
    lookup,
    payment_service::payment_from_entity,
    require_non_negative, require_text,
};

const SALE_DETAILS_SELECT: &str = r#"
    SELECT s.*,
           cu.full_name AS customer_name,
           cu.customer_type,
           c.color,
           c.trim_description,
           c.year,
           m.name AS model_name,
           m.body_type,
           mf.name AS manufacturer_name,
           e.full_name AS employee_name,
           e.position AS employee_position
    FROM sales s
    JOIN customers cu ON s.customer_id = cu.id
    JOIN cars c ON s.vin = c.vin
    JOIN car_models m ON c.model_id = m.id
    JOIN manufacturers mf ON m.manufacturer_id = mf.id
    JOIN employees e ON s.employee_id = e.id
"#;

/// Narrows the sale views to the sales of one customer or one employee.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SaleScope<'a> {
    Customer(&'a str),
    Employee(&'a str),
}

pub async fn list_sales(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<SaleList>> {
    let (page, limit, offset) = pagination.normalize();
    let sql = format!("{SALE_DETAILS_SELECT} ORDER BY s.sale_date DESC, s.id LIMIT $1 OFFSET $2");
    let mut items = sqlx::query_as::<_, SaleDetails>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;
    attach_payments(&state.pool, &mut items).await?;

    let total: (i64,) = sqlx::query_as("SELECT count(*) FROM sales")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("Sales", SaleList { items }, Some(meta)))
}

pub async fn get_sale(state: &AppState, id: &str) -> AppResult<ApiResponse<SaleDetails>> {
    let sale = fetch_sale_details(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Sale"))?;
    Ok(ApiResponse::success("Sale", sale, None))
}

pub async fn list_sale_payments(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<SalePaymentList>> {
    lookup::sale(&state.orm, id).await?;

    let items = Payments::find()
        .filter(PaymentCol::SaleId.eq(id))
        .order_by_asc(PaymentCol::PaymentDate)
        .order_by_asc(PaymentCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(payment_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Payments",
        SalePaymentList { items },
        Some(Meta::empty()),
    ))
}

/// Records the sale, marks the car sold and stores the embedded payments in
/// one transaction.
pub async fn create_sale(
    state: &AppState,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<SaleDetails>> {
    require_text("id", &payload.id)?;
    require_non_negative("total_amount", payload.total_amount)?;
    let mut payment_ids: Vec<&str> = Vec::with_capacity(payload.payments.len());
    for payment in &payload.payments {
        require_text("payment id", &payment.id)?;
        require_non_negative("payment amount", payment.amount)?;
        if payment_ids.contains(&payment.id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "payment {} is listed twice",
                payment.id
            )));
        }
        payment_ids.push(&payment.id);
    }

    let txn = state.orm.begin().await?;

    lookup::customer(&txn, &payload.customer_id).await?;
    lookup::employee(&txn, &payload.employee_id).await?;
    let car = lookup::car_for_update(&txn, &payload.vin).await?;
    let prior = parse_status(&car.status)?;
    if prior.is_sold() {
        return Err(AppError::Conflict(format!(
            "car {} is already sold",
            payload.vin
        )));
    }
    if Sales::find_by_id(payload.id.as_str())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "sale {} already exists",
            payload.id
        )));
    }

    let sale = SaleActive {
        id: Set(payload.id),
        customer_id: Set(payload.customer_id),
        vin: Set(payload.vin),
        employee_id: Set(payload.employee_id),
        sale_date: Set(payload.sale_date),
        total_amount: Set(payload.total_amount),
        payment_terms: Set(payload.payment_terms),
        previous_car_status: Set(prior.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    car_status::set_status(&txn, car, CarStatus::Sold).await?;

    for payment in payload.payments {
        PaymentActive {
            id: Set(payment.id),
            sale_id: Set(sale.id.clone()),
            payment_date: Set(payment.payment_date),
            amount: Set(payment.amount),
            method: Set(payment.method),
            status: Set(payment.status),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        "sale_create",
        "sales",
        serde_json::json!({ "sale_id": sale.id, "vin": sale.vin, "previous_status": prior }),
    )
    .await;

    let details = fetch_sale_details(&state.pool, &sale.id)
        .await?
        .ok_or_else(|| AppError::not_found("Sale"))?;
    Ok(ApiResponse::success(
        "Sale created",
        details,
        Some(Meta::empty()),
    ))
}

pub async fn update_sale(
    state: &AppState,
    id: &str,
    payload: UpdateSaleRequest,
) -> AppResult<ApiResponse<SaleDetails>> {
    let existing = lookup::sale(&state.orm, id).await?;

    let mut active: SaleActive = existing.into();
    if let Some(sale_date) = payload.sale_date {
        active.sale_date = Set(sale_date);
    }
    if let Some(total_amount) = payload.total_amount {
        require_non_negative("total_amount", total_amount)?;
        active.total_amount = Set(total_amount);
    }
    if let Some(terms) = payload.payment_terms {
        active.payment_terms = Set(Some(terms));
    }
    let sale = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "sale_update",
        "sales",
        serde_json::json!({ "sale_id": sale.id }),
    )
    .await;

    let details = fetch_sale_details(&state.pool, &sale.id)
        .await?
        .ok_or_else(|| AppError::not_found("Sale"))?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

/// Deletes the sale with its payments and gives the car back the status it
/// had before it was sold.
pub async fn delete_sale(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let txn = state.orm.begin().await?;

    let sale = lookup::sale(&txn, id).await?;
    let car = lookup::car_for_update(&txn, &sale.vin).await?;
    let prior = parse_status(&sale.previous_car_status)?;

    let payments = Payments::delete_many()
        .filter(PaymentCol::SaleId.eq(id))
        .exec(&txn)
        .await?;
    Sales::delete_by_id(id).exec(&txn).await?;

    let restored =
        CarStatus::after_sale_removed(prior, car_status::has_active_test_drive(&txn, &sale.vin).await?);
    car_status::set_status(&txn, car, restored).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "sale_delete",
        "sales",
        serde_json::json!({
            "sale_id": id,
            "vin": sale.vin,
            "payments_removed": payments.rows_affected,
            "restored_status": restored,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn sales_for(pool: &DbPool, scope: SaleScope<'_>) -> AppResult<Vec<SaleDetails>> {
    let (clause, key) = match scope {
        SaleScope::Customer(id) => ("s.customer_id = $1", id),
        SaleScope::Employee(id) => ("s.employee_id = $1", id),
    };
    let sql = format!("{SALE_DETAILS_SELECT} WHERE {clause} ORDER BY s.sale_date DESC, s.id");
    let mut items = sqlx::query_as::<_, SaleDetails>(&sql)
        .bind(key)
        .fetch_all(pool)
        .await?;
    attach_payments(pool, &mut items).await?;
    Ok(items)
}

async fn fetch_sale_details(pool: &DbPool, id: &str) -> AppResult<Option<SaleDetails>> {
    let sql = format!("{SALE_DETAILS_SELECT} WHERE s.id = $1");
    let sale = sqlx::query_as::<_, SaleDetails>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(sale) = sale else {
        return Ok(None);
    };
    let mut sales = vec![sale];
    attach_payments(pool, &mut sales).await?;
    Ok(sales.pop())
}

async fn attach_payments(pool: &DbPool, sales: &mut [SaleDetails]) -> AppResult<()> {
    if sales.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = sales.iter().map(|s| s.sale.id.clone()).collect();
    let payments = sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE sale_id = ANY($1) ORDER BY payment_date, id",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    let mut by_sale: HashMap<String, Vec<Payment>> = HashMap::new();
    for payment in payments {
        by_sale
            .entry(payment.sale_id.clone())
            .or_default()
            .push(payment);
    }
    for sale in sales.iter_mut() {
        sale.payments = by_sale.remove(&sale.sale.id).unwrap_or_default();
    }
    Ok(())
}
