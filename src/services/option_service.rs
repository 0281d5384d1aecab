use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    audit,
    dto::options::{
        AttachOptionRequest, CarOptionLink, CreateOptionRequest, OptionList, UpdateOptionRequest,
    },
    entity::{
        CarOptions,
        car_options::{ActiveModel as CarOptionActive, Column as CarOptionCol},
        options::{ActiveModel, Column, Entity as Options, Model as OptionModel},
    },
    error::{AppError, AppResult},
    models::VehicleOption,
    response::{ApiResponse, DeletedRecord, Meta},
    routes::params::Pagination,
    state::AppState,
};

use super::{lookup, require_non_negative, require_text, to_utc};

pub async fn list_options(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<OptionList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Options::find().order_by_asc(Column::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(option_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Options", OptionList { items }, Some(meta)))
}

pub async fn get_option(state: &AppState, id: &str) -> AppResult<ApiResponse<VehicleOption>> {
    let option = lookup::option(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Option",
        option_from_entity(option),
        None,
    ))
}

pub async fn create_option(
    state: &AppState,
    payload: CreateOptionRequest,
) -> AppResult<ApiResponse<VehicleOption>> {
    require_text("id", &payload.id)?;
    require_text("name", &payload.name)?;
    require_non_negative("price", payload.price)?;

    if Options::find_by_id(payload.id.as_str())
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "option {} already exists",
            payload.id
        )));
    }

    let option = ActiveModel {
        id: Set(payload.id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        "option_create",
        "options",
        serde_json::json!({ "option_id": option.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Option created",
        option_from_entity(option),
        Some(Meta::empty()),
    ))
}

pub async fn update_option(
    state: &AppState,
    id: &str,
    payload: UpdateOptionRequest,
) -> AppResult<ApiResponse<VehicleOption>> {
    let existing = lookup::option(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        require_text("name", &name)?;
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        require_non_negative("price", price)?;
        active.price = Set(price);
    }
    let option = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        "option_update",
        "options",
        serde_json::json!({ "option_id": option.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        option_from_entity(option),
        Some(Meta::empty()),
    ))
}

/// Deletes the option and unlinks it from every car in one transaction.
pub async fn delete_option(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedRecord>> {
    let txn = state.orm.begin().await?;

    let unlinked = CarOptions::delete_many()
        .filter(CarOptionCol::OptionId.eq(id))
        .exec(&txn)
        .await?;
    let result = Options::delete_by_id(id).exec(&txn).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Option"));
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        "option_delete",
        "options",
        serde_json::json!({ "option_id": id, "cars_unlinked": unlinked.rows_affected }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        DeletedRecord::new(id),
        Some(Meta::empty()),
    ))
}

pub async fn list_car_options(state: &AppState, vin: &str) -> AppResult<ApiResponse<OptionList>> {
    let car = lookup::car(&state.orm, vin).await?;

    let items = car
        .find_related(Options)
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(option_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Options",
        OptionList { items },
        Some(Meta::empty()),
    ))
}

pub async fn attach_option(
    state: &AppState,
    vin: &str,
    payload: AttachOptionRequest,
) -> AppResult<ApiResponse<CarOptionLink>> {
    let txn = state.orm.begin().await?;

    lookup::car_for_update(&txn, vin).await?;
    lookup::option(&txn, &payload.option_id).await?;

    let existing = CarOptions::find_by_id((vin.to_string(), payload.option_id.clone()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Option is already added to this car".into(),
        ));
    }

    let link = CarOptionActive {
        vin: Set(vin.to_string()),
        option_id: Set(payload.option_id),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        "car_option_add",
        "car_options",
        serde_json::json!({ "vin": link.vin, "option_id": link.option_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Option added to car",
        CarOptionLink {
            vin: link.vin,
            option_id: link.option_id,
        },
        Some(Meta::empty()),
    ))
}

pub async fn detach_option(
    state: &AppState,
    vin: &str,
    option_id: &str,
) -> AppResult<ApiResponse<DeletedRecord>> {
    let result = CarOptions::delete_by_id((vin.to_string(), option_id.to_string()))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Option for this car"));
    }

    audit::record(
        &state.pool,
        "car_option_remove",
        "car_options",
        serde_json::json!({ "vin": vin, "option_id": option_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Option removed from car",
        DeletedRecord::new(format!("{vin}/{option_id}")),
        Some(Meta::empty()),
    ))
}

fn option_from_entity(model: OptionModel) -> VehicleOption {
    VehicleOption {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        created_at: to_utc(model.created_at),
    }
}
