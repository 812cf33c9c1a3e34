use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{MAX_YEAR, MIN_YEAR};
use crate::error::{AppError, Result};
use crate::util::require_non_blank;

/// A deal as exposed over the API.
///
/// `organization_id` is denormalized: it is stored on the deal itself and must
/// agree with the organization of `account_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    pub account_id: i64,
    pub organization_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub value: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeal {
    pub account_id: i64,
    pub organization_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub value: f64,
    pub status: String,
}

impl CreateDeal {
    pub fn validate(&self) -> Result<()> {
        if self.account_id <= 0 {
            return Err(AppError::Validation(
                "accountId must be a positive integer".into(),
            ));
        }
        if self.organization_id <= 0 {
            return Err(AppError::Validation(
                "organizationId must be a positive integer".into(),
            ));
        }
        require_non_blank(&self.status, "status")?;
        // Stored dates must stay four-digit `YYYY-MM-DD` text for the year filter
        for (field, date) in [("startDate", self.start_date), ("endDate", self.end_date)] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
                return Err(AppError::Validation(format!(
                    "{} year must be between {} and {}, got {}",
                    field,
                    MIN_YEAR,
                    MAX_YEAR,
                    date.year()
                )));
            }
        }
        if !self.value.is_finite() {
            return Err(AppError::Validation("value must be a finite number".into()));
        }
        Ok(())
    }
}
