mod common;

use axum::http::StatusCode;
use car_dealership_api::{
    db::{MIGRATOR, run_migrations},
    dto::{
        car_models::UpdateCarModelRequest,
        cars::UpdateCarRequest,
        customers::UpdateCustomerRequest,
        manufacturers::UpdateManufacturerRequest,
        options::{AttachOptionRequest, UpdateOptionRequest},
    },
    error::AppError,
    models::CarStatus,
    routes::params::CarListQuery,
    services::{
        car_model_service, car_service, customer_service, manufacturer_service, option_service,
    },
};

// Inventory flow: manufacturer -> model -> car with options, then option links,
// partial updates and a cascading delete.
#[tokio::test]
async fn car_options_updates_and_delete_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    // Read view joins model, manufacturer and options
    let car = car_service::get_car(&state, &lot.vin).await?.data.unwrap();
    assert_eq!(car.car.status, CarStatus::InStock);
    assert_eq!(car.model_name, "Roadster");
    assert_eq!(car.manufacturer_name, "Test Motors");
    assert_eq!(car.options.len(), 1);
    assert_eq!(car.options[0].id, lot.option_ids[0]);

    // Add the second option, then the same one again
    option_service::attach_option(
        &state,
        &lot.vin,
        AttachOptionRequest {
            option_id: lot.option_ids[1].clone(),
        },
    )
    .await?;
    let duplicate = option_service::attach_option(
        &state,
        &lot.vin,
        AttachOptionRequest {
            option_id: lot.option_ids[1].clone(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let options = option_service::list_car_options(&state, &lot.vin)
        .await?
        .data
        .unwrap();
    assert_eq!(options.items.len(), 2);

    // Only the color changes
    let updated = car_service::update_car(
        &state,
        &lot.vin,
        UpdateCarRequest {
            color: Some("Blue".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.car.color, "Blue");
    assert_eq!(updated.car.year, 2023);
    assert_eq!(updated.car.trim_description.as_deref(), Some("Sport"));
    assert_eq!(updated.options.len(), 2);

    // Sold is reserved for sales
    let err = car_service::update_car(
        &state,
        &lot.vin,
        UpdateCarRequest {
            status: Some(CarStatus::Sold),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Manual status plus replacing the option set
    let updated = car_service::update_car(
        &state,
        &lot.vin,
        UpdateCarRequest {
            status: Some(CarStatus::Ordered),
            options: Some(vec![lot.option_ids[1].clone()]),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.car.status, CarStatus::Ordered);
    assert_eq!(updated.options.len(), 1);
    assert_eq!(updated.options[0].id, lot.option_ids[1]);

    let ordered = car_service::list_cars(
        &state,
        CarListQuery {
            page: Some(1),
            per_page: Some(100),
            status: Some(CarStatus::Ordered),
        },
    )
    .await?;
    let ordered_items = ordered.data.unwrap().items;
    assert!(ordered_items.iter().any(|c| c.car.vin == lot.vin));
    assert!(ordered_items.iter().all(|c| c.car.status == CarStatus::Ordered));

    let by_model = car_service::list_cars_by_model(&state, &lot.model_id)
        .await?
        .data
        .unwrap();
    assert_eq!(by_model.items.len(), 1);

    let models = car_model_service::list_models_by_manufacturer(&state, &lot.manufacturer_id)
        .await?
        .data
        .unwrap();
    assert!(models.items.iter().any(|m| m.id == lot.model_id));

    // Referenced rows cannot be removed
    let err = manufacturer_service::delete_manufacturer(&state, &lot.manufacturer_id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::CONFLICT);

    // Deleting the car drops its option links with it
    let deleted = car_service::delete_car(&state, &lot.vin).await?.data.unwrap();
    assert_eq!(deleted.id, lot.vin);
    let err = option_service::list_car_options(&state, &lot.vin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let remaining: (i64,) = sqlx::query_as("SELECT count(*) FROM car_options WHERE vin = $1")
        .bind(&lot.vin)
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(remaining.0, 0);

    // The options themselves survive
    option_service::get_option(&state, &lot.option_ids[1]).await?;

    Ok(())
}

#[tokio::test]
async fn missing_references_are_not_found() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let err = car_service::get_car(&state, &common::unique("VIN"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "Car not found");

    let err = car_model_service::list_models_by_manufacturer(&state, &common::unique("MF"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Manufacturer not found");

    let err = option_service::detach_option(&state, &common::unique("VIN"), "OP-none")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn deleting_an_option_unlinks_it_from_cars() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    option_service::attach_option(
        &state,
        &lot.vin,
        AttachOptionRequest {
            option_id: lot.option_ids[1].clone(),
        },
    )
    .await?;

    let deleted = option_service::delete_option(&state, &lot.option_ids[0])
        .await?
        .data
        .unwrap();
    assert_eq!(deleted.id, lot.option_ids[0]);

    let car = car_service::get_car(&state, &lot.vin).await?.data.unwrap();
    let fitted: Vec<&str> = car.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(fitted, vec![lot.option_ids[1].as_str()]);

    let links: (i64,) = sqlx::query_as("SELECT count(*) FROM car_options WHERE option_id = $1")
        .bind(&lot.option_ids[0])
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(links.0, 0);

    let err = option_service::get_option(&state, &lot.option_ids[0])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = option_service::delete_option(&state, &lot.option_ids[0])
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn partial_updates_keep_untouched_fields() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    let manufacturer = manufacturer_service::update_manufacturer(
        &state,
        &lot.manufacturer_id,
        UpdateManufacturerRequest {
            name: Some("Renamed Motors".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(manufacturer.name, "Renamed Motors");
    assert_eq!(manufacturer.country, "Germany");

    let model = car_model_service::update_model(
        &state,
        &lot.model_id,
        UpdateCarModelRequest {
            base_price: Some(3_200_000),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(model.model.base_price, 3_200_000);
    assert_eq!(model.model.name, "Roadster");
    assert_eq!(model.model.body_type, "Coupe");
    assert_eq!(model.model.production_start_year, 2020);
    assert_eq!(model.manufacturer_name, "Renamed Motors");

    let option = option_service::update_option(
        &state,
        &lot.option_ids[1],
        UpdateOptionRequest {
            description: Some("Detachable".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(option.description.as_deref(), Some("Detachable"));
    assert_eq!(option.name, "Tow bar");
    assert_eq!(option.price, 25_000);

    let customer = customer_service::update_customer(
        &state,
        &lot.customer_id,
        UpdateCustomerRequest {
            email: Some("customer@example.com".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(customer.email.as_deref(), Some("customer@example.com"));
    assert_eq!(customer.full_name, "Test Customer");
    assert_eq!(customer.customer_type, "individual");
    assert_eq!(customer.phone.as_deref(), Some("+1 555 0100"));

    // A re-read sees the same values
    let reread = customer_service::get_customer(&state, &lot.customer_id)
        .await?
        .data
        .unwrap();
    assert_eq!(reread.email, customer.email);
    assert_eq!(reread.phone, customer.phone);

    Ok(())
}

#[tokio::test]
async fn migrations_are_recorded_and_rerun_safely() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    // setup_state already migrated; a second run is a no-op
    run_migrations(&state.pool).await?;

    let applied: Vec<(i64,)> =
        sqlx::query_as("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(&state.pool)
            .await?;
    let known: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
    assert_eq!(applied.into_iter().map(|row| row.0).collect::<Vec<_>>(), known);

    Ok(())
}
