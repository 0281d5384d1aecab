use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CarModel, CarModelDetails};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarModelRequest {
    pub id: String,
    pub manufacturer_id: String,
    pub name: String,
    pub body_type: String,
    pub production_start_year: i32,
    pub base_price: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCarModelRequest {
    pub name: Option<String>,
    pub body_type: Option<String>,
    pub production_start_year: Option<i32>,
    pub base_price: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CarModelList {
    #[schema(value_type = Vec<CarModelDetails>)]
    pub items: Vec<CarModelDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ManufacturerModelList {
    #[schema(value_type = Vec<CarModel>)]
    pub items: Vec<CarModel>,
}
