use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    audit,
    db::DbPool,
    dto::cars::{CarList, CreateCarRequest, ModelCarList, UpdateCarRequest},
    entity::{
        CarOptions, Cars, Options,
        car_options::{ActiveModel as CarOptionActive, Column as CarOptionCol},
        cars::{ActiveModel as CarActive, Column as CarCol, Model as CarEntity},
        options::Column as OptionCol,
    },
    error::{AppError, AppResult},
    models::{Car, CarDetails, CarStatus, VehicleOption},
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::CarListQuery,
    state::AppState,
};

use super::{car_status::parse_status, lookup, require_text, to_utc, unique_ids};

const CAR_DETAILS_SELECT: &str = r#"
    SELECT c.*,
           m.name AS model_name,
           m.body_type,
           m.production_start_year,
           m.base_price,
           mf.name AS manufacturer_name,
           mf.country AS manufacturer_country
    FROM cars c
    JOIN car_models m ON c.model_id = m.id
    JOIN manufacturers mf ON m.manufacturer_id = mf.id
"#;

#[derive(sqlx::FromRow)]
struct CarOptionRow {
    vin: String,
    #[sqlx(flatten)]
    option: VehicleOption,
}

pub async fn list_cars(
    state: &AppState,
    query: CarListQuery,
) -> AppResult<ApiResponse<CarList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let status = query.status.map(|s| s.as_str());

    let sql = format!(
        "{CAR_DETAILS_SELECT} WHERE ($1::text IS NULL OR c.status = $1) \
         ORDER BY c.created_at DESC, c.vin LIMIT $2 OFFSET $3"
    );
    let mut items = sqlx::query_as::<_, CarDetails>(&sql)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;
    attach_options(&state.pool, &mut items).await?;

    let total: (i64,) =
        sqlx::query_as("SELECT count(*) FROM cars WHERE ($1::text IS NULL OR status = $1)")
            .bind(status)
            .fetch_one(&state.pool)
            .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("Cars", CarList { items }, Some(meta)))
}

pub async fn get_car(state: &AppState, vin: &str) -> AppResult<ApiResponse<CarDetails>> {
    let car = fetch_car_details(&state.pool, vin)
        .await?
        .ok_or_else(|| AppError::not_found("Car"))?;
    Ok(ApiResponse::success("Car", car, None))
}

pub async fn list_cars_by_model(
    state: &AppState,
    model_id: &str,
) -> AppResult<ApiResponse<ModelCarList>> {
    lookup::car_model(&state.orm, model_id).await?;

    let items = Cars::find()
        .filter(CarCol::ModelId.eq(model_id))
        .order_by_asc(CarCol::Vin)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(car_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Cars",
        ModelCarList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_car(
    state: &AppState,
    payload: CreateCarRequest,
) -> AppResult<ApiResponse<CarDetails>> {
    require_text("vin", &payload.vin)?;
    require_text("color", &payload.color)?;
    let option_ids = unique_ids("options", payload.options)?;
    let status = payload.status.unwrap_or(CarStatus::InStock);
    if !status.is_manually_assignable() {
        return Err(AppError::BadRequest(format!(
            "status {status} is set by sales and test drives"
        )));
    }

    let txn = state.orm.begin().await?;

    lookup::car_model(&txn, &payload.model_id).await?;
    if Cars::find_by_id(payload.vin.as_str()).one(&txn).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "car {} already exists",
            payload.vin
        )));
    }
    ensure_options_exist(&txn, &option_ids).await?;

    let car = CarActive {
        vin: Set(payload.vin),
        model_id: Set(payload.model_id),
        color: Set(payload.color),
        trim_description: Set(payload.trim_description),
        year: Set(payload.year),
        status: Set(status.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    link_options(&txn, &car.vin, &option_ids).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "car_create",
        "cars",
        serde_json::json!({ "vin": car.vin, "options": option_ids }),
    )
    .await;

    let details = fetch_car_details(&state.pool, &car.vin)
        .await?
        .ok_or_else(|| AppError::not_found("Car"))?;
    Ok(ApiResponse::success(
        "Car created",
        details,
        Some(Meta::empty()),
    ))
}

pub async fn update_car(
    state: &AppState,
    vin: &str,
    payload: UpdateCarRequest,
) -> AppResult<ApiResponse<CarDetails>> {
    let option_ids = payload
        .options
        .map(|ids| unique_ids("options", ids))
        .transpose()?;

    let txn = state.orm.begin().await?;

    let existing = lookup::car_for_update(&txn, vin).await?;
    let current = parse_status(&existing.status)?;

    let mut active: CarActive = existing.into();
    if let Some(color) = payload.color {
        require_text("color", &color)?;
        active.color = Set(color);
    }
    if let Some(trim) = payload.trim_description {
        active.trim_description = Set(Some(trim));
    }
    if let Some(year) = payload.year {
        active.year = Set(year);
    }
    if let Some(status) = payload.status.filter(|s| *s != current) {
        if !current.is_manually_assignable() {
            return Err(AppError::Conflict(format!(
                "car {vin} is {current}; its status follows its sale or test drives"
            )));
        }
        if !status.is_manually_assignable() {
            return Err(AppError::BadRequest(format!(
                "status {status} is set by sales and test drives"
            )));
        }
        active.status = Set(status.as_str().to_string());
    }
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    if let Some(option_ids) = &option_ids {
        ensure_options_exist(&txn, option_ids).await?;
        CarOptions::delete_many()
            .filter(CarOptionCol::Vin.eq(vin))
            .exec(&txn)
            .await?;
        link_options(&txn, vin, option_ids).await?;
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        "car_update",
        "cars",
        serde_json::json!({ "vin": vin, "options": option_ids }),
    )
    .await;

    let details = fetch_car_details(&state.pool, vin)
        .await?
        .ok_or_else(|| AppError::not_found("Car"))?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

pub async fn delete_car(state: &AppState, vin: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let txn = state.orm.begin().await?;

    lookup::car_for_update(&txn, vin).await?;

    let unlinked = CarOptions::delete_many()
        .filter(CarOptionCol::Vin.eq(vin))
        .exec(&txn)
        .await?;
    Cars::delete_by_id(vin).exec(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "car_delete",
        "cars",
        serde_json::json!({ "vin": vin, "options_removed": unlinked.rows_affected }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(vin),
        Some(Meta::empty()),
    ))
}

async fn fetch_car_details(pool: &DbPool, vin: &str) -> AppResult<Option<CarDetails>> {
    let sql = format!("{CAR_DETAILS_SELECT} WHERE c.vin = $1");
    let car = sqlx::query_as::<_, CarDetails>(&sql)
        .bind(vin)
        .fetch_optional(pool)
        .await?;

    let Some(car) = car else {
        return Ok(None);
    };
    let mut cars = vec![car];
    attach_options(pool, &mut cars).await?;
    Ok(cars.pop())
}

/// Loads the options of every car in one query.
async fn attach_options(pool: &DbPool, cars: &mut [CarDetails]) -> AppResult<()> {
    if cars.is_empty() {
        return Ok(());
    }

    let vins: Vec<String> = cars.iter().map(|c| c.car.vin.clone()).collect();
    let rows = sqlx::query_as::<_, CarOptionRow>(
        r#"
        SELECT co.vin, o.*
        FROM car_options co
        JOIN options o ON co.option_id = o.id
        WHERE co.vin = ANY($1)
        ORDER BY o.name
        "#,
    )
    .bind(vins)
    .fetch_all(pool)
    .await?;

    let mut by_vin: HashMap<String, Vec<VehicleOption>> = HashMap::new();
    for row in rows {
        by_vin.entry(row.vin).or_default().push(row.option);
    }
    for car in cars.iter_mut() {
        car.options = by_vin.remove(&car.car.vin).unwrap_or_default();
    }
    Ok(())
}

async fn ensure_options_exist<C: ConnectionTrait>(conn: &C, ids: &[String]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<String> = Options::find()
        .filter(OptionCol::Id.is_in(ids.iter().cloned()))
        .all(conn)
        .await?
        .into_iter()
        .map(|option| option.id)
        .collect();

    if let Some(missing) = ids.iter().find(|id| !found.contains(id.as_str())) {
        return Err(AppError::not_found(format!("Option {missing}")));
    }
    Ok(())
}

async fn link_options<C: ConnectionTrait>(conn: &C, vin: &str, ids: &[String]) -> AppResult<()> {
    for option_id in ids {
        CarOptionActive {
            vin: Set(vin.to_string()),
            option_id: Set(option_id.clone()),
            created_at: NotSet,
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

fn car_from_entity(model: CarEntity) -> AppResult<Car> {
    Ok(Car {
        status: parse_status(&model.status)?,
        vin: model.vin,
        model_id: model.model_id,
        color: model.color,
        trim_description: model.trim_description,
        year: model.year,
        created_at: to_utc(model.created_at),
        updated_at: to_utc(model.updated_at),
    })
}
