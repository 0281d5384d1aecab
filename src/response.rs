use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

/// Payload returned by delete endpoints: the key of the removed row.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedRecord {
    pub id: String,
}

impl DeletedRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_serializes_pagination() {
        let body = ApiResponse::success("Cars", vec![1, 2], Some(Meta::new(2, 20, 42)));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Cars");
        assert_eq!(json["meta"]["page"], 2);
        assert_eq!(json["meta"]["total"], 42);
        assert_eq!(json["data"][1], 2);
    }

    #[test]
    fn empty_meta_serializes_nulls() {
        let json = serde_json::to_value(Meta::empty()).unwrap();
        assert!(json["page"].is_null());
        assert!(json["per_page"].is_null());
    }
}
