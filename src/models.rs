use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Availability of a car on the lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CarStatus {
    InStock,
    Ordered,
    InTransit,
    OnTestDrive,
    Sold,
}

#[derive(Debug, Error)]
#[error("unknown car status {0:?}")]
pub struct UnknownCarStatus(pub String);

impl CarStatus {
    pub const ALL: [CarStatus; 5] = [
        CarStatus::InStock,
        CarStatus::Ordered,
        CarStatus::InTransit,
        CarStatus::OnTestDrive,
        CarStatus::Sold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::InStock => "in-stock",
            CarStatus::Ordered => "ordered",
            CarStatus::InTransit => "in-transit",
            CarStatus::OnTestDrive => "on-test-drive",
            CarStatus::Sold => "sold",
        }
    }

    pub fn is_sold(self) -> bool {
        self == CarStatus::Sold
    }

    /// Sold and on-test-drive are driven by sales and test drives; the rest
    /// can be set directly on the car.
    pub fn is_manually_assignable(self) -> bool {
        matches!(
            self,
            CarStatus::InStock | CarStatus::Ordered | CarStatus::InTransit
        )
    }

    /// Status implied by test-drive activity. An active drive takes any unsold
    /// car off the lot; once none is left an on-test-drive car is back in stock.
    pub fn with_test_drive_activity(self, has_active_test_drive: bool) -> CarStatus {
        match (self, has_active_test_drive) {
            (CarStatus::Sold, _) => CarStatus::Sold,
            (_, true) => CarStatus::OnTestDrive,
            (CarStatus::OnTestDrive, false) => CarStatus::InStock,
            (status, false) => status,
        }
    }

    /// Status a car returns to once the sale that sold it is deleted.
    pub fn after_sale_removed(prior: CarStatus, has_active_test_drive: bool) -> CarStatus {
        let base = match prior {
            CarStatus::Ordered | CarStatus::InTransit => prior,
            CarStatus::InStock | CarStatus::OnTestDrive | CarStatus::Sold => CarStatus::InStock,
        };
        base.with_test_drive_activity(has_active_test_drive)
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = UnknownCarStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownCarStatus(s.to_string()))
    }
}

impl TryFrom<String> for CarStatus {
    type Error = UnknownCarStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CarModel {
    pub id: String,
    pub manufacturer_id: String,
    pub name: String,
    pub body_type: String,
    pub production_start_year: i32,
    pub base_price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CarModelDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub model: CarModel,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Car {
    pub vin: String,
    pub model_id: String,
    pub color: String,
    pub trim_description: Option<String>,
    pub year: i32,
    #[sqlx(try_from = "String")]
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct VehicleOption {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// A car joined with its model, manufacturer and fitted options.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CarDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub car: Car,
    pub model_name: String,
    pub body_type: String,
    pub production_start_year: i32,
    pub base_price: i64,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
    #[sqlx(skip)]
    pub options: Vec<VehicleOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub customer_type: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Employee {
    pub id: String,
    pub full_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Sale {
    pub id: String,
    pub customer_id: String,
    pub vin: String,
    pub employee_id: String,
    pub sale_date: NaiveDate,
    pub total_amount: i64,
    pub payment_terms: Option<String>,
    #[sqlx(try_from = "String")]
    pub previous_car_status: CarStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Payment {
    pub id: String,
    pub sale_id: String,
    pub payment_date: NaiveDate,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A sale joined with customer, car, model, manufacturer, employee and its payments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct SaleDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub sale: Sale,
    pub customer_name: String,
    pub customer_type: String,
    pub color: String,
    pub trim_description: Option<String>,
    pub year: i32,
    pub model_name: String,
    pub body_type: String,
    pub manufacturer_name: String,
    pub employee_name: String,
    pub employee_position: String,
    #[sqlx(skip)]
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PaymentDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub payment: Payment,
    pub customer_id: String,
    pub vin: String,
    pub sale_date: NaiveDate,
    pub sale_total_amount: i64,
    pub customer_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TestDrive {
    pub id: String,
    pub customer_id: String,
    pub vin: String,
    pub employee_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub route: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TestDriveDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub test_drive: TestDrive,
    pub customer_name: String,
    pub customer_type: String,
    pub customer_phone: Option<String>,
    pub color: String,
    pub trim_description: Option<String>,
    pub year: i32,
    pub model_name: String,
    pub body_type: String,
    pub manufacturer_name: String,
    pub employee_name: String,
    pub employee_position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in CarStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
            assert_eq!(status.as_str().parse::<CarStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "available".parse::<CarStatus>().unwrap_err();
        assert_eq!(err.0, "available");
        assert!(serde_json::from_str::<CarStatus>("\"In stock\"").is_err());
    }

    #[test]
    fn active_test_drive_takes_unsold_cars_off_the_lot() {
        for status in [
            CarStatus::InStock,
            CarStatus::Ordered,
            CarStatus::InTransit,
            CarStatus::OnTestDrive,
        ] {
            assert_eq!(
                status.with_test_drive_activity(true),
                CarStatus::OnTestDrive
            );
        }
        assert_eq!(CarStatus::Sold.with_test_drive_activity(true), CarStatus::Sold);
    }

    #[test]
    fn only_lot_statuses_are_manually_assignable() {
        assert!(CarStatus::InStock.is_manually_assignable());
        assert!(CarStatus::InTransit.is_manually_assignable());
        assert!(!CarStatus::Sold.is_manually_assignable());
        assert!(!CarStatus::OnTestDrive.is_manually_assignable());
    }

    #[test]
    fn last_test_drive_ending_reverts_to_in_stock() {
        assert_eq!(
            CarStatus::OnTestDrive.with_test_drive_activity(false),
            CarStatus::InStock
        );
        assert_eq!(
            CarStatus::InTransit.with_test_drive_activity(false),
            CarStatus::InTransit
        );
    }

    #[test]
    fn removing_a_sale_restores_prior_availability() {
        assert_eq!(
            CarStatus::after_sale_removed(CarStatus::InStock, false),
            CarStatus::InStock
        );
        assert_eq!(
            CarStatus::after_sale_removed(CarStatus::Ordered, false),
            CarStatus::Ordered
        );
        assert_eq!(
            CarStatus::after_sale_removed(CarStatus::Ordered, true),
            CarStatus::OnTestDrive
        );
        assert_eq!(
            CarStatus::after_sale_removed(CarStatus::InTransit, false),
            CarStatus::InTransit
        );
        // an old test drive may have ended while the car was sold
        assert_eq!(
            CarStatus::after_sale_removed(CarStatus::OnTestDrive, false),
            CarStatus::InStock
        );
        assert_eq!(
            CarStatus::after_sale_removed(CarStatus::InStock, true),
            CarStatus::OnTestDrive
        );
    }

    #[test]
    fn car_details_flatten_the_car() {
        let now = Utc::now();
        let details = CarDetails {
            car: Car {
                vin: "VIN12345678901234A".into(),
                model_id: "MD001".into(),
                color: "Black".into(),
                trim_description: Some("Luxury".into()),
                year: 2021,
                status: CarStatus::InStock,
                created_at: now,
                updated_at: now,
            },
            model_name: "X5".into(),
            body_type: "SUV".into(),
            production_start_year: 2018,
            base_price: 4_500_000,
            manufacturer_name: "BMW".into(),
            manufacturer_country: "Germany".into(),
            options: vec![],
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["vin"], "VIN12345678901234A");
        assert_eq!(json["status"], "in-stock");
        assert_eq!(json["manufacturer_name"], "BMW");
        assert!(json["options"].as_array().unwrap().is_empty());
    }
}
