use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect, sea_query::LockType};

use crate::{
    entity::{
        CarModels, Cars, Customers, Employees, Manufacturers, Options, Sales, TestDrives,
        car_models, cars, customers, employees, manufacturers, options, sales, test_drives,
    },
    error::{AppError, AppResult},
};

pub(super) async fn manufacturer<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> AppResult<manufacturers::Model> {
    Manufacturers::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Manufacturer"))
}

pub(super) async fn car_model<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> AppResult<car_models::Model> {
    CarModels::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Model"))
}

pub(super) async fn car<C: ConnectionTrait>(conn: &C, vin: &str) -> AppResult<cars::Model> {
    Cars::find_by_id(vin)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Car"))
}

/// Loads the car and holds its row lock until the surrounding transaction ends.
pub(super) async fn car_for_update<C: ConnectionTrait>(
    conn: &C,
    vin: &str,
) -> AppResult<cars::Model> {
    Cars::find_by_id(vin)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Car"))
}

pub(super) async fn option<C: ConnectionTrait>(conn: &C, id: &str) -> AppResult<options::Model> {
    Options::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Option"))
}

pub(super) async fn customer<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> AppResult<customers::Model> {
    Customers::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))
}

pub(super) async fn employee<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> AppResult<employees::Model> {
    Employees::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))
}

pub(super) async fn sale<C: ConnectionTrait>(conn: &C, id: &str) -> AppResult<sales::Model> {
    Sales::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Sale"))
}

pub(super) async fn test_drive<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> AppResult<test_drives::Model> {
    TestDrives::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Test drive"))
}
