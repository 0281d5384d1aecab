use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Manufacturer;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateManufacturerRequest {
    pub id: String,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateManufacturerRequest {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ManufacturerList {
    #[schema(value_type = Vec<Manufacturer>)]
    pub items: Vec<Manufacturer>,
}
