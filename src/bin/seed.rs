use chrono::{Duration, NaiveDate, Utc};

use car_dealership_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        car_models::CreateCarModelRequest,
        cars::CreateCarRequest,
        customers::CreateCustomerRequest,
        employees::CreateEmployeeRequest,
        manufacturers::CreateManufacturerRequest,
        options::CreateOptionRequest,
        sales::{CreateSaleRequest, SalePaymentRequest},
        test_drives::CreateTestDriveRequest,
    },
    error::{AppError, AppResult},
    services::{
        car_model_service, car_service, customer_service, employee_service, manufacturer_service,
        option_service, sale_service, test_drive_service,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;
    let state = AppState::new(pool, orm);

    seed_catalogue(&state).await?;
    seed_people(&state).await?;
    seed_inventory(&state).await?;
    seed_activity(&state).await?;

    println!("Seed completed");
    Ok(())
}

/// Rows left over from an earlier run are kept as they are.
fn keep_existing<T>(result: AppResult<T>) -> AppResult<()> {
    match result {
        Ok(_) | Err(AppError::Conflict(_)) => Ok(()),
        Err(err) => Err(err),
    }
}

async fn seed_catalogue(state: &AppState) -> AppResult<()> {
    let manufacturers = [
        ("MF001", "BMW", "Germany"),
        ("MF002", "Toyota", "Japan"),
        ("MF003", "Mercedes-Benz", "Germany"),
    ];
    for (id, name, country) in manufacturers {
        keep_existing(
            manufacturer_service::create_manufacturer(
                state,
                CreateManufacturerRequest {
                    id: id.into(),
                    name: name.into(),
                    country: country.into(),
                },
            )
            .await,
        )?;
    }

    let models = [
        ("MD001", "MF001", "X5", "SUV", 2018, 4_500_000),
        ("MD002", "MF002", "Camry", "Sedan", 2017, 2_200_000),
        ("MD003", "MF003", "E-Class", "Sedan", 2019, 4_000_000),
    ];
    for (id, manufacturer_id, name, body_type, year, price) in models {
        keep_existing(
            car_model_service::create_model(
                state,
                CreateCarModelRequest {
                    id: id.into(),
                    manufacturer_id: manufacturer_id.into(),
                    name: name.into(),
                    body_type: body_type.into(),
                    production_start_year: year,
                    base_price: price,
                },
            )
            .await,
        )?;
    }

    let options = [
        ("OP001", "Leather interior", "Premium leather seats and trim", 150_000),
        ("OP002", "Panoramic roof", "Power-operated glass roof", 200_000),
        ("OP003", "Navigation system", "Built-in navigation with 3D maps", 100_000),
    ];
    for (id, name, description, price) in options {
        keep_existing(
            option_service::create_option(
                state,
                CreateOptionRequest {
                    id: id.into(),
                    name: name.into(),
                    description: Some(description.into()),
                    price,
                },
            )
            .await,
        )?;
    }

    println!("Seeded manufacturers, models and options");
    Ok(())
}

async fn seed_people(state: &AppState) -> AppResult<()> {
    let customers = [
        (
            "CU001",
            "Ivan Ivanov",
            "individual",
            "+7 (999) 123-45-67",
            "ivanov@example.com",
            "Moscow, Lenina st. 10, apt. 5",
        ),
        (
            "CU002",
            "Future Technologies LLC",
            "company",
            "+7 (495) 987-65-43",
            "info@techfuture.example",
            "Moscow, Mira ave. 102, office 501",
        ),
    ];
    for (id, full_name, customer_type, phone, email, address) in customers {
        keep_existing(
            customer_service::create_customer(
                state,
                CreateCustomerRequest {
                    id: id.into(),
                    full_name: full_name.into(),
                    customer_type: customer_type.into(),
                    phone: Some(phone.into()),
                    email: Some(email.into()),
                    address: Some(address.into()),
                },
            )
            .await,
        )?;
    }

    let employees = [
        (
            "EM001",
            "Petr Petrov",
            "Sales manager",
            "+7 (999) 111-22-33",
            "petrov@autosale.example",
        ),
        (
            "EM002",
            "Anna Sidorova",
            "Administrator",
            "+7 (999) 444-55-66",
            "sidorova@autosale.example",
        ),
    ];
    for (id, full_name, position, phone, email) in employees {
        keep_existing(
            employee_service::create_employee(
                state,
                CreateEmployeeRequest {
                    id: id.into(),
                    full_name: full_name.into(),
                    position: position.into(),
                    phone: Some(phone.into()),
                    email: Some(email.into()),
                },
            )
            .await,
        )?;
    }

    println!("Seeded customers and employees");
    Ok(())
}

async fn seed_inventory(state: &AppState) -> AppResult<()> {
    let cars = [
        ("VIN12345678901234A", "MD001", "Black", "Luxury", 2021, vec!["OP001", "OP002"]),
        ("VIN12345678901234B", "MD002", "White", "Standard", 2020, vec!["OP003"]),
        (
            "VIN12345678901234C",
            "MD003",
            "Silver",
            "Premium",
            2022,
            vec!["OP001", "OP002", "OP003"],
        ),
    ];
    for (vin, model_id, color, trim, year, options) in cars {
        keep_existing(
            car_service::create_car(
                state,
                CreateCarRequest {
                    vin: vin.into(),
                    model_id: model_id.into(),
                    color: color.into(),
                    trim_description: Some(trim.into()),
                    year,
                    status: None,
                    options: options.into_iter().map(String::from).collect(),
                },
            )
            .await,
        )?;
    }

    println!("Seeded cars");
    Ok(())
}

async fn seed_activity(state: &AppState) -> AppResult<()> {
    let sale_date = NaiveDate::from_ymd_opt(2023, 10, 15).unwrap_or_default();
    let second_payment = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap_or(sale_date);
    keep_existing(
        sale_service::create_sale(
            state,
            CreateSaleRequest {
                id: "SL001".into(),
                customer_id: "CU001".into(),
                vin: "VIN12345678901234B".into(),
                employee_id: "EM001".into(),
                sale_date,
                total_amount: 2_300_000,
                payment_terms: Some("Loan".into()),
                payments: vec![
                    SalePaymentRequest {
                        id: "PY001".into(),
                        payment_date: sale_date,
                        amount: 500_000,
                        method: "cash".into(),
                        status: "paid".into(),
                    },
                    SalePaymentRequest {
                        id: "PY002".into(),
                        payment_date: second_payment,
                        amount: 150_000,
                        method: "bank transfer".into(),
                        status: "paid".into(),
                    },
                ],
            },
        )
        .await,
    )?;

    // Booked a day ahead so the car shows as on-test-drive after seeding.
    let starts_at = Utc::now() + Duration::days(1);
    keep_existing(
        test_drive_service::create_test_drive(
            state,
            CreateTestDriveRequest {
                id: "TD001".into(),
                customer_id: "CU002".into(),
                vin: "VIN12345678901234C".into(),
                employee_id: "EM001".into(),
                starts_at,
                ends_at: starts_at + Duration::hours(1),
                route: Some("City loop and highway".into()),
                comments: Some("Customer is interested in buying".into()),
            },
        )
        .await,
    )?;

    println!("Seeded a sale with payments and a test drive");
    Ok(())
}
