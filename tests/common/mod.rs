#![allow(dead_code)]

use car_dealership_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        car_models::CreateCarModelRequest,
        cars::CreateCarRequest,
        customers::CreateCustomerRequest,
        employees::CreateEmployeeRequest,
        manufacturers::CreateManufacturerRequest,
        options::CreateOptionRequest,
    },
    services::{
        car_model_service, car_service, customer_service, employee_service, manufacturer_service,
        option_service,
    },
    state::AppState,
};
use uuid::Uuid;

/// Database used by the integration flows, when one is configured.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&pool).await?;
    Ok(AppState::new(pool, orm))
}

/// Short random suffix so flows running side by side never share keys.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Keys of a car with its model, manufacturer and two options, plus a
/// customer and an employee to act on it.
pub struct Lot {
    pub manufacturer_id: String,
    pub model_id: String,
    pub vin: String,
    pub option_ids: Vec<String>,
    pub customer_id: String,
    pub employee_id: String,
}

pub async fn seed_lot(state: &AppState) -> anyhow::Result<Lot> {
    let manufacturer_id = unique("MF");
    manufacturer_service::create_manufacturer(
        state,
        CreateManufacturerRequest {
            id: manufacturer_id.clone(),
            name: "Test Motors".into(),
            country: "Germany".into(),
        },
    )
    .await?;

    let model_id = unique("MD");
    car_model_service::create_model(
        state,
        CreateCarModelRequest {
            id: model_id.clone(),
            manufacturer_id: manufacturer_id.clone(),
            name: "Roadster".into(),
            body_type: "Coupe".into(),
            production_start_year: 2020,
            base_price: 3_000_000,
        },
    )
    .await?;

    let mut option_ids = Vec::new();
    for (name, price) in [("Heated seats", 40_000), ("Tow bar", 25_000)] {
        let id = unique("OP");
        option_service::create_option(
            state,
            CreateOptionRequest {
                id: id.clone(),
                name: name.into(),
                description: None,
                price,
            },
        )
        .await?;
        option_ids.push(id);
    }

    let vin = unique("VIN");
    car_service::create_car(
        state,
        CreateCarRequest {
            vin: vin.clone(),
            model_id: model_id.clone(),
            color: "Red".into(),
            trim_description: Some("Sport".into()),
            year: 2023,
            status: None,
            options: vec![option_ids[0].clone()],
        },
    )
    .await?;

    let customer_id = unique("CU");
    customer_service::create_customer(
        state,
        CreateCustomerRequest {
            id: customer_id.clone(),
            full_name: "Test Customer".into(),
            customer_type: "individual".into(),
            phone: Some("+1 555 0100".into()),
            email: None,
            address: None,
        },
    )
    .await?;

    let employee_id = unique("EM");
    employee_service::create_employee(
        state,
        CreateEmployeeRequest {
            id: employee_id.clone(),
            full_name: "Test Seller".into(),
            position: "Sales manager".into(),
            phone: None,
            email: None,
        },
    )
    .await?;

    Ok(Lot {
        manufacturer_id,
        model_id,
        vin,
        option_ids,
        customer_id,
        employee_id,
    })
}
