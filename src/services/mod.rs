pub mod car_model_service;
pub mod car_service;
pub mod customer_service;
pub mod employee_service;
pub mod manufacturer_service;
pub mod option_service;
pub mod payment_service;
pub mod sale_service;
pub mod test_drive_service;

mod car_status;
mod lookup;

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::error::{AppError, AppResult};

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: i64) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Trims, rejects blanks and drops duplicates while keeping the caller's order.
fn unique_ids(field: &str, ids: Vec<String>) -> AppResult<Vec<String>> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.trim().to_string();
        require_text(field, &id)?;
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}

fn to_utc(value: DateTimeWithTimeZone) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("vin", "  ").is_err());
        assert!(require_text("vin", "VIN12345678901234A").is_ok());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(require_non_negative("amount", -1).is_err());
        assert!(require_non_negative("amount", 0).is_ok());
    }

    #[test]
    fn unique_ids_keeps_first_occurrence() {
        let ids = vec!["OP002".into(), " OP001".into(), "OP002".into()];
        assert_eq!(unique_ids("options", ids).unwrap(), vec!["OP002", "OP001"]);
        assert!(unique_ids("options", vec!["".into()]).is_err());
    }
}
