use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Car, CarDetails, CarStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    pub vin: String,
    pub model_id: String,
    pub color: String,
    pub trim_description: Option<String>,
    pub year: i32,
    /// Defaults to `in-stock`.
    pub status: Option<CarStatus>,
    /// IDs of options fitted to the car.
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCarRequest {
    pub color: Option<String>,
    pub trim_description: Option<String>,
    pub year: Option<i32>,
    pub status: Option<CarStatus>,
    /// When present, replaces the car's option set.
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CarList {
    #[schema(value_type = Vec<CarDetails>)]
    pub items: Vec<CarDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ModelCarList {
    #[schema(value_type = Vec<Car>)]
    pub items: Vec<Car>,
}
