use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Payment, PaymentDetails};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub id: String,
    pub sale_id: String,
    pub payment_date: NaiveDate,
    pub amount: i64,
    pub method: String,
    pub status: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<i64>,
    pub method: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentList {
    #[schema(value_type = Vec<PaymentDetails>)]
    pub items: Vec<PaymentDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SalePaymentList {
    #[schema(value_type = Vec<Payment>)]
    pub items: Vec<Payment>,
}
