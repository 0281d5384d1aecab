use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::{
    audit,
    dto::{
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        sales::SaleList,
        test_drives::TestDriveList,
    },
    entity::customers::{ActiveModel, Column, Entity as Customers, Model as CustomerModel},
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{
    lookup, require_text,
    sale_service::{self, SaleScope},
    test_drive_service::{self, TestDriveScope},
    to_utc,
};

pub async fn list_customers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Customers::find().order_by_asc(Column::FullName);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(meta),
    ))
}

pub async fn get_customer(state: &AppState, id: &str) -> AppResult<ApiResponse<Customer>> {
    let customer = lookup::customer(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Customer",
        customer_from_entity(customer),
        None,
    ))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    require_text("id", &payload.id)?;
    require_text("full_name", &payload.full_name)?;
    require_text("customer_type", &payload.customer_type)?;

    if Customers::find_by_id(payload.id.as_str())
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "customer {} already exists",
            payload.id
        )));
    }

    let customer = ActiveModel {
        id: Set(payload.id),
        full_name: Set(payload.full_name),
        customer_type: Set(payload.customer_type),
        phone: Set(payload.phone),
        email: Set(payload.email),
        address: Set(payload.address),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        "customer_create",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Customer created",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: &str,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = lookup::customer(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(full_name) = payload.full_name {
        require_text("full_name", &full_name)?;
        active.full_name = Set(full_name);
    }
    if let Some(customer_type) = payload.customer_type {
        require_text("customer_type", &customer_type)?;
        active.customer_type = Set(customer_type);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    let customer = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "customer_update",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

/// Customers with sales or test drives are protected by foreign keys and
/// surface as a conflict.
pub async fn delete_customer(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let result = Customers::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Customer"));
    }

    audit::record(
        &state.pool,
        "customer_delete",
        "customers",
        serde_json::json!({ "customer_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

pub async fn list_customer_sales(state: &AppState, id: &str) -> AppResult<ApiResponse<SaleList>> {
    lookup::customer(&state.orm, id).await?;
    let items = sale_service::sales_for(&state.pool, SaleScope::Customer(id)).await?;
    Ok(ApiResponse::success(
        "Sales",
        SaleList { items },
        Some(Meta::empty()),
    ))
}

pub async fn list_customer_test_drives(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<TestDriveList>> {
    lookup::customer(&state.orm, id).await?;
    let items =
        test_drive_service::test_drives_for(&state.pool, TestDriveScope::Customer(id)).await?;
    Ok(ApiResponse::success(
        "Test drives",
        TestDriveList { items },
        Some(Meta::empty()),
    ))
}

fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        full_name: model.full_name,
        customer_type: model.customer_type,
        phone: model.phone,
        email: model.email,
        address: model.address,
        created_at: to_utc(model.created_at),
    }
}
