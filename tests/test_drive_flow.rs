mod common;

use axum::http::StatusCode;
use car_dealership_api::{
    dto::{
        cars::UpdateCarRequest,
        sales::CreateSaleRequest,
        test_drives::{CreateTestDriveRequest, UpdateTestDriveRequest},
    },
    error::AppError,
    models::CarStatus,
    services::{car_service, customer_service, sale_service, test_drive_service},
    state::AppState,
};
use chrono::{Duration, NaiveDate, Utc};

fn drive_request(lot: &common::Lot, id: &str, starts_in: Duration) -> CreateTestDriveRequest {
    let starts_at = Utc::now() + starts_in;
    CreateTestDriveRequest {
        id: id.to_string(),
        customer_id: lot.customer_id.clone(),
        vin: lot.vin.clone(),
        employee_id: lot.employee_id.clone(),
        starts_at,
        ends_at: starts_at + Duration::hours(1),
        route: Some("City loop".into()),
        comments: None,
    }
}

async fn car_status(state: &AppState, vin: &str) -> anyhow::Result<CarStatus> {
    let car = car_service::get_car(state, vin).await?.data.unwrap();
    Ok(car.car.status)
}

// Test drive flow: an upcoming drive takes the car off the lot, moving it into
// the past or deleting it brings the car back.
#[tokio::test]
async fn test_drive_toggles_car_status() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    let drive_id = common::unique("TD");
    let drive = test_drive_service::create_test_drive(
        &state,
        drive_request(&lot, &drive_id, Duration::days(1)),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(drive.customer_name, "Test Customer");
    assert_eq!(drive.customer_phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(drive.manufacturer_name, "Test Motors");
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::OnTestDrive);

    let by_car = test_drive_service::list_car_test_drives(&state, &lot.vin)
        .await?
        .data
        .unwrap();
    assert_eq!(by_car.items.len(), 1);
    let by_customer = customer_service::list_customer_test_drives(&state, &lot.customer_id)
        .await?
        .data
        .unwrap();
    assert_eq!(by_customer.items[0].test_drive.id, drive_id);

    // Moving the drive into the past frees the car
    let past = Utc::now() - Duration::days(2);
    test_drive_service::update_test_drive(
        &state,
        &drive_id,
        UpdateTestDriveRequest {
            starts_at: Some(past),
            ends_at: Some(past + Duration::hours(1)),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::InStock);

    // And back into the future
    let future = Utc::now() + Duration::days(3);
    let updated = test_drive_service::update_test_drive(
        &state,
        &drive_id,
        UpdateTestDriveRequest {
            starts_at: Some(future),
            ends_at: Some(future + Duration::hours(2)),
            comments: Some("Rescheduled".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.test_drive.comments.as_deref(), Some("Rescheduled"));
    assert_eq!(updated.test_drive.route.as_deref(), Some("City loop"));
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::OnTestDrive);

    // Removing the last active drive puts the car back in stock
    test_drive_service::delete_test_drive(&state, &drive_id).await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::InStock);
    let err = test_drive_service::get_test_drive(&state, &drive_id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Test drive not found");

    Ok(())
}

#[tokio::test]
async fn in_transit_car_goes_on_test_drive() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    car_service::update_car(
        &state,
        &lot.vin,
        UpdateCarRequest {
            status: Some(CarStatus::InTransit),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::InTransit);

    let drive_id = common::unique("TD");
    test_drive_service::create_test_drive(
        &state,
        drive_request(&lot, &drive_id, Duration::hours(1)),
    )
    .await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::OnTestDrive);

    // No drive left: the car is back on the lot
    test_drive_service::delete_test_drive(&state, &drive_id).await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::InStock);

    Ok(())
}

#[tokio::test]
async fn sold_car_is_not_available_for_test_drive() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    // Sold while a drive is still booked
    let drive_id = common::unique("TD");
    test_drive_service::create_test_drive(
        &state,
        drive_request(&lot, &drive_id, Duration::hours(4)),
    )
    .await?;

    let sale_id = common::unique("SL");
    let sale = sale_service::create_sale(
        &state,
        CreateSaleRequest {
            id: sale_id.clone(),
            customer_id: lot.customer_id.clone(),
            vin: lot.vin.clone(),
            employee_id: lot.employee_id.clone(),
            sale_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            total_amount: 2_900_000,
            payment_terms: None,
            payments: vec![],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(sale.sale.previous_car_status, CarStatus::OnTestDrive);
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::Sold);

    let err = test_drive_service::create_test_drive(
        &state,
        drive_request(&lot, &common::unique("TD"), Duration::days(1)),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.to_string(),
        "Bad Request Car is already sold and not available for test drive"
    );

    // The booked drive keeps the car off the lot once the sale is gone
    sale_service::delete_sale(&state, &sale_id).await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::OnTestDrive);

    test_drive_service::delete_test_drive(&state, &drive_id).await?;
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::InStock);

    Ok(())
}

#[tokio::test]
async fn test_drive_window_must_be_ordered() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    let mut request = drive_request(&lot, &common::unique("TD"), Duration::days(1));
    request.ends_at = request.starts_at - Duration::minutes(30);
    let err = test_drive_service::create_test_drive(&state, request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(car_status(&state, &lot.vin).await?, CarStatus::InStock);

    let mut request = drive_request(&lot, &common::unique("TD"), Duration::days(1));
    request.employee_id = common::unique("EM");
    let err = test_drive_service::create_test_drive(&state, request)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Employee not found");

    Ok(())
}
