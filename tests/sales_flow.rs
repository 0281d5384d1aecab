mod common;

use axum::http::StatusCode;
use car_dealership_api::{
    dto::{
        payments::{CreatePaymentRequest, UpdatePaymentRequest},
        sales::{CreateSaleRequest, SalePaymentRequest, UpdateSaleRequest},
    },
    error::AppError,
    models::CarStatus,
    services::{car_service, customer_service, employee_service, payment_service, sale_service},
};
use chrono::NaiveDate;

fn sale_request(lot: &common::Lot, id: &str, payments: Vec<SalePaymentRequest>) -> CreateSaleRequest {
    CreateSaleRequest {
        id: id.to_string(),
        customer_id: lot.customer_id.clone(),
        vin: lot.vin.clone(),
        employee_id: lot.employee_id.clone(),
        sale_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        total_amount: 3_100_000,
        payment_terms: Some("loan".into()),
        payments,
    }
}

// Sales flow: selling marks the car sold, payments ride along, a second sale
// is refused and deleting the sale puts the car back on the lot.
#[tokio::test]
async fn sale_marks_car_sold_and_delete_restores_it() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    let sale_id = common::unique("SL");
    let first_payment = common::unique("PY");
    let sale = sale_service::create_sale(
        &state,
        sale_request(
            &lot,
            &sale_id,
            vec![SalePaymentRequest {
                id: first_payment.clone(),
                payment_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                amount: 1_000_000,
                method: "cash".into(),
                status: "paid".into(),
            }],
        ),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(sale.sale.previous_car_status, CarStatus::InStock);
    assert_eq!(sale.customer_name, "Test Customer");
    assert_eq!(sale.employee_name, "Test Seller");
    assert_eq!(sale.model_name, "Roadster");
    assert_eq!(sale.payments.len(), 1);

    let car = car_service::get_car(&state, &lot.vin).await?.data.unwrap();
    assert_eq!(car.car.status, CarStatus::Sold);

    // One sale per car
    let err = sale_service::create_sale(&state, sale_request(&lot, &common::unique("SL"), vec![]))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::CONFLICT);

    // A payment added later shows up on the sale
    let second_payment = common::unique("PY");
    let payment = payment_service::create_payment(
        &state,
        CreatePaymentRequest {
            id: second_payment.clone(),
            sale_id: sale_id.clone(),
            payment_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            amount: 500_000,
            method: "bank transfer".into(),
            status: "pending".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(payment.vin, lot.vin);
    assert_eq!(payment.sale_total_amount, 3_100_000);

    let payments = sale_service::list_sale_payments(&state, &sale_id)
        .await?
        .data
        .unwrap();
    assert_eq!(payments.items.len(), 2);

    let updated = sale_service::update_sale(
        &state,
        &sale_id,
        UpdateSaleRequest {
            total_amount: Some(3_000_000),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.sale.total_amount, 3_000_000);
    assert_eq!(updated.sale.payment_terms.as_deref(), Some("loan"));
    assert_eq!(
        updated.sale.sale_date,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );
    assert_eq!(updated.sale.vin, lot.vin);
    assert_eq!(updated.payments.len(), 2);

    // Settling the later payment leaves its other fields alone
    let settled = payment_service::update_payment(
        &state,
        &second_payment,
        UpdatePaymentRequest {
            status: Some("paid".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(settled.payment.status, "paid");
    assert_eq!(settled.payment.amount, 500_000);
    assert_eq!(settled.payment.method, "bank transfer");
    assert_eq!(
        settled.payment.payment_date,
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    );
    assert_eq!(settled.sale_total_amount, 3_000_000);

    let err = payment_service::update_payment(
        &state,
        &second_payment,
        UpdatePaymentRequest {
            amount: Some(-1),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Removing one payment keeps the sale and its other payment
    let deleted = payment_service::delete_payment(&state, &second_payment)
        .await?
        .data
        .unwrap();
    assert_eq!(deleted.id, second_payment);
    let payments = sale_service::list_sale_payments(&state, &sale_id)
        .await?
        .data
        .unwrap();
    assert_eq!(payments.items.len(), 1);
    assert_eq!(payments.items[0].id, first_payment);
    let err = payment_service::delete_payment(&state, &second_payment)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    let by_customer = customer_service::list_customer_sales(&state, &lot.customer_id)
        .await?
        .data
        .unwrap();
    assert_eq!(by_customer.items.len(), 1);
    let by_employee = employee_service::list_employee_sales(&state, &lot.employee_id)
        .await?
        .data
        .unwrap();
    assert_eq!(by_employee.items[0].sale.id, sale_id);

    // A customer with a sale cannot be removed
    let err = customer_service::delete_customer(&state, &lot.customer_id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::CONFLICT);

    // Deleting the sale removes its payments and restores the car
    sale_service::delete_sale(&state, &sale_id).await?;
    let car = car_service::get_car(&state, &lot.vin).await?.data.unwrap();
    assert_eq!(car.car.status, CarStatus::InStock);
    for id in [&first_payment, &second_payment] {
        let err = payment_service::get_payment(&state, id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    Ok(())
}

#[tokio::test]
async fn sale_validation_errors() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let lot = common::seed_lot(&state).await?;

    // Same payment listed twice
    let payment = SalePaymentRequest {
        id: common::unique("PY"),
        payment_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        amount: 100,
        method: "cash".into(),
        status: "paid".into(),
    };
    let err = sale_service::create_sale(
        &state,
        sale_request(&lot, &common::unique("SL"), vec![payment.clone(), payment]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Unknown customer
    let mut request = sale_request(&lot, &common::unique("SL"), vec![]);
    request.customer_id = common::unique("CU");
    let err = sale_service::create_sale(&state, request).await.unwrap_err();
    assert_eq!(err.to_string(), "Customer not found");

    // Nothing above touched the car
    let car = car_service::get_car(&state, &lot.vin).await?.data.unwrap();
    assert_eq!(car.car.status, CarStatus::InStock);

    // Payments need an existing sale
    let err = payment_service::create_payment(
        &state,
        CreatePaymentRequest {
            id: common::unique("PY"),
            sale_id: common::unique("SL"),
            payment_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            amount: 100,
            method: "cash".into(),
            status: "paid".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Sale not found");

    Ok(())
}
