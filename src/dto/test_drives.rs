use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::TestDriveDetails;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTestDriveRequest {
    pub id: String,
    pub customer_id: String,
    pub vin: String,
    pub employee_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub route: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTestDriveRequest {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub route: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TestDriveList {
    #[schema(value_type = Vec<TestDriveDetails>)]
    pub items: Vec<TestDriveDetails>,
}
