use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::{
    audit,
    dto::{
        employees::{CreateEmployeeRequest, EmployeeList, UpdateEmployeeRequest},
        sales::SaleList,
        test_drives::TestDriveList,
    },
    entity::employees::{ActiveModel, Column, Entity as Employees, Model as EmployeeModel},
    error::{AppError, AppResult},
    models::Employee,
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

pub async fn list_employees(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<EmployeeList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Employees::find().order_by_asc(Column::FullName);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(employee_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Employees",
        EmployeeList { items },
        Some(meta),
    ))
}

pub async fn get_employee(state: &AppState, id: &str) -> AppResult<ApiResponse<Employee>> {
    let employee = lookup::employee(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Employee",
        employee_from_entity(employee),
        None,
    ))
}

pub async fn create_employee(
    state: &AppState,
    payload: CreateEmployeeRequest,
) -> AppResult<ApiResponse<Employee>> {
    require_text("id", &payload.id)?;
    require_text("full_name", &payload.full_name)?;
    require_text("position", &payload.position)?;

    if Employees::find_by_id(payload.id.as_str())
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "employee {} already exists",
            payload.id
        )));
    }

    let employee = ActiveModel {
        id: Set(payload.id),
        full_name: Set(payload.full_name),
        position: Set(payload.position),
        phone: Set(payload.phone),
        email: Set(payload.email),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        "employee_create",
        "employees",
        serde_json::json!({ "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Employee created",
        employee_from_entity(employee),
        Some(Meta::empty()),
    ))
}

pub async fn update_employee(
    state: &AppState,
    id: &str,
    payload: UpdateEmployeeRequest,
) -> AppResult<ApiResponse<Employee>> {
    let existing = lookup::employee(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(full_name) = payload.full_name {
        require_text("full_name", &full_name)?;
        active.full_name = Set(full_name);
    }
    if let Some(position) = payload.position {
        require_text("position", &position)?;
        active.position = Set(position);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    let employee = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "employee_update",
        "employees",
        serde_json::json!({ "employee_id": employee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        employee_from_entity(employee),
        Some(Meta::empty()),
    ))
}

pub async fn delete_employee(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let result = Employees::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Employee"));
    }

    audit::record(
        &state.pool,
        "employee_delete",
        "employees",
        serde_json::json!({ "employee_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

pub async fn list_employee_sales(state: &AppState, id: &str) -> AppResult<ApiResponse<SaleList>> {
    lookup::employee(&state.orm, id).await?;
    let items = sale_service::sales_for(&state.pool, SaleScope::Employee(id)).await?;
    Ok(ApiResponse::success(
        "Sales",
        SaleList { items },
        Some(Meta::empty()),
    ))
}

pub async fn list_employee_test_drives(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<TestDriveList>> {
    lookup::employee(&state.orm, id).await?;
    let items =
        test_drive_service::test_drives_for(&state.pool, TestDriveScope::Employee(id)).await?;
    Ok(ApiResponse::success(
        "Test drives",
        TestDriveList { items },
        Some(Meta::empty()),
    ))
}

fn employee_from_entity(model: EmployeeModel) -> Employee {
    Employee {
        id: model.id,
        full_name: model.full_name,
        position: model.position,
        phone: model.phone,
        email: model.email,
        created_at: to_utc(model.created_at),
    }
}
