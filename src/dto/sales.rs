use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SaleDetails;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SalePaymentRequest {
    pub id: String,
    pub payment_date: NaiveDate,
    pub amount: i64,
    pub method: String,
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub id: String,
    pub customer_id: String,
    pub vin: String,
    pub employee_id: String,
    pub sale_date: NaiveDate,
    pub total_amount: i64,
    pub payment_terms: Option<String>,
    /// Payments recorded together with the sale.
    #[serde(default)]
    pub payments: Vec<SalePaymentRequest>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSaleRequest {
    pub sale_date: Option<NaiveDate>,
    pub total_amount: Option<i64>,
    pub payment_terms: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleList {
    #[schema(value_type = Vec<SaleDetails>)]
    pub items: Vec<SaleDetails>,
}
