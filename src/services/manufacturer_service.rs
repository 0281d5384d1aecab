use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::{
    audit,
    dto::manufacturers::{CreateManufacturerRequest, ManufacturerList, UpdateManufacturerRequest},
    entity::manufacturers::{
        ActiveModel, Column, Entity as Manufacturers, Model as ManufacturerModel,
    },
    error::{AppError, AppResult},
    models::Manufacturer,
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{lookup, require_text, to_utc};

pub async fn list_manufacturers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ManufacturerList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Manufacturers::find().order_by_asc(Column::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(manufacturer_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Manufacturers",
        ManufacturerList { items },
        Some(meta),
    ))
}

pub async fn get_manufacturer(state: &AppState, id: &str) -> AppResult<ApiResponse<Manufacturer>> {
    let manufacturer = lookup::manufacturer(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Manufacturer",
        manufacturer_from_entity(manufacturer),
        None,
    ))
}

pub async fn create_manufacturer(
    state: &AppState,
    payload: CreateManufacturerRequest,
) -> AppResult<ApiResponse<Manufacturer>> {
    require_text("id", &payload.id)?;
    require_text("name", &payload.name)?;

    if Manufacturers::find_by_id(payload.id.as_str())
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "manufacturer {} already exists",
            payload.id
        )));
    }

    let manufacturer = ActiveModel {
        id: Set(payload.id),
        name: Set(payload.name),
        country: Set(payload.country),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        "manufacturer_create",
        "manufacturers",
        serde_json::json!({ "manufacturer_id": manufacturer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Manufacturer created",
        manufacturer_from_entity(manufacturer),
        Some(Meta::empty()),
    ))
}

pub async fn update_manufacturer(
    state: &AppState,
    id: &str,
    payload: UpdateManufacturerRequest,
) -> AppResult<ApiResponse<Manufacturer>> {
    let existing = lookup::manufacturer(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        require_text("name", &name)?;
        active.name = Set(name);
    }
    if let Some(country) = payload.country {
        active.country = Set(country);
    }
    let manufacturer = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "manufacturer_update",
        "manufacturers",
        serde_json::json!({ "manufacturer_id": manufacturer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        manufacturer_from_entity(manufacturer),
        Some(Meta::empty()),
    ))
}

pub async fn delete_manufacturer(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<DeletedRecord>> {
    let result = Manufacturers::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Manufacturer"));
    }

    audit::record(
        &state.pool,
        "manufacturer_delete",
        "manufacturers",
        serde_json::json!({ "manufacturer_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

fn manufacturer_from_entity(model: ManufacturerModel) -> Manufacturer {
    Manufacturer {
        id: model.id,
        name: model.name,
        country: model.country,
        created_at: to_utc(model.created_at),
    }
}
