use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Employee;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub id: String,
    pub full_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct EmployeeList {
    #[schema(value_type = Vec<Employee>)]
    pub items: Vec<Employee>,
}
