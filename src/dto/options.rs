use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::VehicleOption;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOptionRequest {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOptionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachOptionRequest {
    pub option_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarOptionLink {
    pub vin: String,
    pub option_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OptionList {
    #[schema(value_type = Vec<VehicleOption>)]
    pub items: Vec<VehicleOption>,
}
