use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    audit,
    db::DbPool,
    dto::car_models::{
        CarModelList, CreateCarModelRequest, ManufacturerModelList, UpdateCarModelRequest,
    },
    entity::car_models::{ActiveModel, Column, Entity as CarModels, Model as CarModelEntity},
    error::{AppError, AppResult},
    models::{CarModel, CarModelDetails},
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{lookup, require_non_negative, require_text, to_utc};

const MODEL_DETAILS_SELECT: &str = r#"
    SELECT m.*,
           mf.name AS manufacturer_name,
           mf.country AS manufacturer_country
    FROM car_models m
    JOIN manufacturers mf ON m.manufacturer_id = mf.id
"#;

pub async fn list_models(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CarModelList>> {
    let (page, limit, offset) = pagination.normalize();
    let sql = format!("{MODEL_DETAILS_SELECT} ORDER BY mf.name, m.name LIMIT $1 OFFSET $2");
    let items = sqlx::query_as::<_, CarModelDetails>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let total: (i64,) = sqlx::query_as("SELECT count(*) FROM car_models")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Models",
        CarModelList { items },
        Some(meta),
    ))
}

pub async fn get_model(state: &AppState, id: &str) -> AppResult<ApiResponse<CarModelDetails>> {
    let model = fetch_model_details(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Model"))?;
    Ok(ApiResponse::success("Model", model, None))
}

pub async fn list_models_by_manufacturer(
    state: &AppState,
    manufacturer_id: &str,
) -> AppResult<ApiResponse<ManufacturerModelList>> {
    lookup::manufacturer(&state.orm, manufacturer_id).await?;

    let items = CarModels::find()
        .filter(Column::ManufacturerId.eq(manufacturer_id))
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(car_model_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Models",
        ManufacturerModelList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_model(
    state: &AppState,
    payload: CreateCarModelRequest,
) -> AppResult<ApiResponse<CarModelDetails>> {
    require_text("id", &payload.id)?;
    require_text("name", &payload.name)?;
    require_non_negative("base_price", payload.base_price)?;

    lookup::manufacturer(&state.orm, &payload.manufacturer_id).await?;
    if CarModels::find_by_id(payload.id.as_str())
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "model {} already exists",
            payload.id
        )));
    }

    let model = ActiveModel {
        id: Set(payload.id),
        manufacturer_id: Set(payload.manufacturer_id),
        name: Set(payload.name),
        body_type: Set(payload.body_type),
        production_start_year: Set(payload.production_start_year),
        base_price: Set(payload.base_price),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        "model_create",
        "car_models",
        serde_json::json!({ "model_id": model.id, "manufacturer_id": model.manufacturer_id }),
    )
    .await;

    let details = fetch_model_details(&state.pool, &model.id)
        .await?
        .ok_or_else(|| AppError::not_found("Model"))?;
    Ok(ApiResponse::success(
        "Model created",
        details,
        Some(Meta::empty()),
    ))
}

pub async fn update_model(
    state: &AppState,
    id: &str,
    payload: UpdateCarModelRequest,
) -> AppResult<ApiResponse<CarModelDetails>> {
    let existing = lookup::car_model(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        require_text("name", &name)?;
        active.name = Set(name);
    }
    if let Some(body_type) = payload.body_type {
        active.body_type = Set(body_type);
    }
    if let Some(year) = payload.production_start_year {
        active.production_start_year = Set(year);
    }
    if let Some(base_price) = payload.base_price {
        require_non_negative("base_price", base_price)?;
        active.base_price = Set(base_price);
    }
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "model_update",
        "car_models",
        serde_json::json!({ "model_id": model.id }),
    )
    .await;

    let details = fetch_model_details(&state.pool, &model.id)
        .await?
        .ok_or_else(|| AppError::not_found("Model"))?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

pub async fn delete_model(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let result = CarModels::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Model"));
    }

    audit::record(
        &state.pool,
        "model_delete",
        "car_models",
        serde_json::json!({ "model_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

async fn fetch_model_details(pool: &DbPool, id: &str) -> AppResult<Option<CarModelDetails>> {
    let sql = format!("{MODEL_DETAILS_SELECT} WHERE m.id = $1");
    let model = sqlx::query_as::<_, CarModelDetails>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(model)
}

fn car_model_from_entity(model: CarModelEntity) -> CarModel {
    CarModel {
        id: model.id,
        manufacturer_id: model.manufacturer_id,
        name: model.name,
        body_type: model.body_type,
        production_start_year: model.production_start_year,
        base_price: model.base_price,
        created_at: to_utc(model.created_at),
    }
}
