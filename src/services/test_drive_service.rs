use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};

use crate::{
    audit,
    db::DbPool,
    dto::test_drives::{CreateTestDriveRequest, TestDriveList, UpdateTestDriveRequest},
    entity::test_drives::{ActiveModel, Entity as TestDrives},
    error::{AppError, AppResult},
    models::TestDriveDetails,
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{
    car_status::{self, parse_status},
    lookup, require_text, to_utc,
};

const TEST_DRIVE_DETAILS_SELECT: &str = r#"
    SELECT t.*,
           cu.full_name AS customer_name,
           cu.customer_type,
           cu.phone AS customer_phone,
           c.color,
           c.trim_description,
           c.year,
           m.name AS model_name,
           m.body_type,
           mf.name AS manufacturer_name,
           e.full_name AS employee_name,
           e.position AS employee_position
    FROM test_drives t
    JOIN customers cu ON t.customer_id = cu.id
    JOIN cars c ON t.vin = c.vin
    JOIN car_models m ON c.model_id = m.id
    JOIN manufacturers mf ON m.manufacturer_id = mf.id
    JOIN employees e ON t.employee_id = e.id
"#;

/// Narrows the test drive views to one customer, employee or car.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TestDriveScope<'a> {
    Customer(&'a str),
    Employee(&'a str),
    Car(&'a str),
}

pub async fn list_test_drives(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<TestDriveList>> {
    let (page, limit, offset) = pagination.normalize();
    let sql = format!(
        "{TEST_DRIVE_DETAILS_SELECT} ORDER BY t.starts_at DESC, t.id LIMIT $1 OFFSET $2"
    );
    let items = sqlx::query_as::<_, TestDriveDetails>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let total: (i64,) = sqlx::query_as("SELECT count(*) FROM test_drives")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Test drives",
        TestDriveList { items },
        Some(meta),
    ))
}

pub async fn get_test_drive(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<TestDriveDetails>> {
    let test_drive = fetch_test_drive_details(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Test drive"))?;
    Ok(ApiResponse::success("Test drive", test_drive, None))
}

pub async fn list_car_test_drives(
    state: &AppState,
    vin: &str,
) -> AppResult<ApiResponse<TestDriveList>> {
    lookup::car(&state.orm, vin).await?;
    let items = test_drives_for(&state.pool, TestDriveScope::Car(vin)).await?;
    Ok(ApiResponse::success(
        "Test drives",
        TestDriveList { items },
        Some(Meta::empty()),
    ))
}

/// Books a test drive. A car with an upcoming or running drive moves to
/// on-test-drive inside the same transaction.
pub async fn create_test_drive(
    state: &AppState,
    payload: CreateTestDriveRequest,
) -> AppResult<ApiResponse<TestDriveDetails>> {
    require_text("id", &payload.id)?;
    if payload.ends_at < payload.starts_at {
        return Err(AppError::BadRequest(
            "ends_at must not be before starts_at".into(),
        ));
    }

    let txn = state.orm.begin().await?;

    lookup::customer(&txn, &payload.customer_id).await?;
    lookup::employee(&txn, &payload.employee_id).await?;
    let car = lookup::car_for_update(&txn, &payload.vin).await?;
    if parse_status(&car.status)?.is_sold() {
        return Err(AppError::BadRequest(
            "Car is already sold and not available for test drive".into(),
        ));
    }
    if TestDrives::find_by_id(payload.id.as_str())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "test drive {} already exists",
            payload.id
        )));
    }

    let test_drive = ActiveModel {
        id: Set(payload.id),
        customer_id: Set(payload.customer_id),
        vin: Set(payload.vin),
        employee_id: Set(payload.employee_id),
        starts_at: Set(payload.starts_at.into()),
        ends_at: Set(payload.ends_at.into()),
        route: Set(payload.route),
        comments: Set(payload.comments),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let status = car_status::sync_with_test_drives(&txn, &test_drive.vin).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "test_drive_create",
        "test_drives",
        serde_json::json!({
            "test_drive_id": test_drive.id,
            "vin": test_drive.vin,
            "car_status": status,
        }),
    )
    .await;

    let details = fetch_test_drive_details(&state.pool, &test_drive.id)
        .await?
        .ok_or_else(|| AppError::not_found("Test drive"))?;
    Ok(ApiResponse::success(
        "Test drive created",
        details,
        Some(Meta::empty()),
    ))
}

pub async fn update_test_drive(
    state: &AppState,
    id: &str,
    payload: UpdateTestDriveRequest,
) -> AppResult<ApiResponse<TestDriveDetails>> {
    let txn = state.orm.begin().await?;

    let existing = lookup::test_drive(&txn, id).await?;
    let starts_at = payload
        .starts_at
        .unwrap_or_else(|| to_utc(existing.starts_at));
    let ends_at = payload.ends_at.unwrap_or_else(|| to_utc(existing.ends_at));
    if ends_at < starts_at {
        return Err(AppError::BadRequest(
            "ends_at must not be before starts_at".into(),
        ));
    }

    let mut active: ActiveModel = existing.into();
    active.starts_at = Set(starts_at.into());
    active.ends_at = Set(ends_at.into());
    if let Some(route) = payload.route {
        active.route = Set(Some(route));
    }
    if let Some(comments) = payload.comments {
        active.comments = Set(Some(comments));
    }
    let test_drive = active.update(&txn).await?;

    let status = car_status::sync_with_test_drives(&txn, &test_drive.vin).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "test_drive_update",
        "test_drives",
        serde_json::json!({ "test_drive_id": test_drive.id, "car_status": status }),
    )
    .await;

    let details = fetch_test_drive_details(&state.pool, &test_drive.id)
        .await?
        .ok_or_else(|| AppError::not_found("Test drive"))?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

/// Deletes the test drive. When it was the car's last active drive the car
/// goes back to in-stock.
pub async fn delete_test_drive(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<DeletedRecord>> {
    let txn = state.orm.begin().await?;

    let test_drive = lookup::test_drive(&txn, id).await?;
    TestDrives::delete_by_id(id).exec(&txn).await?;
    let status = car_status::sync_with_test_drives(&txn, &test_drive.vin).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "test_drive_delete",
        "test_drives",
        serde_json::json!({ "test_drive_id": id, "vin": test_drive.vin, "car_status": status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn test_drives_for(
    pool: &DbPool,
    scope: TestDriveScope<'_>,
) -> AppResult<Vec<TestDriveDetails>> {
    let (clause, key) = match scope {
        TestDriveScope::Customer(id) => ("t.customer_id = $1", id),
        TestDriveScope::Employee(id) => ("t.employee_id = $1", id),
        TestDriveScope::Car(vin) => ("t.vin = $1", vin),
    };
    let sql = format!("{TEST_DRIVE_DETAILS_SELECT} WHERE {clause} ORDER BY t.starts_at DESC, t.id");
    let items = sqlx::query_as::<_, TestDriveDetails>(&sql)
        .bind(key)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

async fn fetch_test_drive_details(pool: &DbPool, id: &str) -> AppResult<Option<TestDriveDetails>> {
    let sql = format!("{TEST_DRIVE_DETAILS_SELECT} WHERE t.id = $1");
    let test_drive = sqlx::query_as::<_, TestDriveDetails>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(test_drive)
}
