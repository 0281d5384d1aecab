use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::CarStatus;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

// Query strings cannot go through `#[serde(flatten)]` with numeric fields,
// so the paging fields are repeated here.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CarListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<CarStatus>,
}

impl CarListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_twenty() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
    }

    #[test]
    fn clamps_out_of_range_values() {
        let pagination = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(pagination.normalize(), (1, 100, 0));

        let pagination = Pagination {
            page: Some(-3),
            per_page: Some(0),
        };
        assert_eq!(pagination.normalize(), (1, 1, 0));
    }

    #[test]
    fn offset_follows_page() {
        assert_eq!(Pagination::new(3, 25).normalize(), (3, 25, 50));
    }

    #[test]
    fn car_query_reads_status_from_query_string() {
        let query: CarListQuery =
            serde_json::from_value(serde_json::json!({ "status": "on-test-drive", "page": 2 }))
                .unwrap();
        assert_eq!(query.status, Some(CarStatus::OnTestDrive));
        assert_eq!(query.pagination().normalize(), (2, 20, 20));
    }
}
