use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    prelude::DateTimeWithTimeZone,
};

use crate::{
    entity::{
        TestDrives,
        cars::{ActiveModel as CarActive, Model as CarEntity},
        test_drives::Column as TestDriveCol,
    },
    error::{AppError, AppResult},
    models::CarStatus,
};

use super::lookup;

pub(super) fn parse_status(raw: &str) -> AppResult<CarStatus> {
    raw.parse::<CarStatus>()
        .map_err(|err| AppError::Internal(anyhow::Error::new(err)))
}

pub(super) async fn has_active_test_drive<C: ConnectionTrait>(
    conn: &C,
    vin: &str,
) -> AppResult<bool> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let active = TestDrives::find()
        .filter(TestDriveCol::Vin.eq(vin))
        .filter(TestDriveCol::EndsAt.gt(now))
        .count(conn)
        .await?;
    Ok(active > 0)
}

pub(super) async fn set_status<C: ConnectionTrait>(
    conn: &C,
    car: CarEntity,
    status: CarStatus,
) -> AppResult<CarEntity> {
    let vin = car.vin.clone();
    let previous = car.status.clone();
    let mut active: CarActive = car.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let car = active.update(conn).await?;
    tracing::info!(vin = %vin, from = %previous, to = %status, "car status changed");
    Ok(car)
}

/// Recomputes the status of a car from its test drives. Sold cars never move;
/// the car row stays locked until the caller commits.
pub(super) async fn sync_with_test_drives<C: ConnectionTrait>(
    conn: &C,
    vin: &str,
) -> AppResult<CarStatus> {
    let car = lookup::car_for_update(conn, vin).await?;
    let current = parse_status(&car.status)?;
    let next = current.with_test_drive_activity(has_active_test_drive(conn, vin).await?);
    if next != current {
        set_status(conn, car, next).await?;
    }
    Ok(next)
}
