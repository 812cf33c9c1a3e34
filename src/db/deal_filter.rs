//! Filtered deal lookups for a single organization.
//!
//! A `DealFilter` always pins the organization and may add an exact status
//! match and a calendar-year overlap. All constraints are ANDed together.

use rusqlite::types::Value;

use super::from_row::DEAL_COLS;
use crate::error::{AppError, Result};
use crate::util::parse_id;

/// Years are compared as `YYYY-MM-DD` text, so only four-digit years are
/// accepted.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealFilter {
    pub organization_id: i64,
    /// Exact, case-sensitive status tag. `None` means any status.
    pub status: Option<String>,
    /// Calendar year the deal's date range must intersect. `None` means any year.
    pub year: Option<i32>,
}

/// SQL text plus positional parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl DealFilter {
    pub fn for_organization(organization_id: i64) -> Self {
        Self {
            organization_id,
            status: None,
            year: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Build a filter from raw request values (path segment and query string).
    pub fn parse(organization_id: &str, status: Option<&str>, year: Option<&str>) -> Result<Self> {
        let organization_id = parse_id(organization_id, "organization id")?;
        let year = year
            .map(|raw| {
                raw.parse::<i32>().map_err(|_| {
                    AppError::Validation(format!("year must be an integer, got {:?}", raw))
                })
            })
            .transpose()?;

        let filter = Self {
            organization_id,
            status: status.map(str::to_string),
            year,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Reject any constraint that could not narrow the result correctly.
    pub fn validate(&self) -> Result<()> {
        if self.organization_id <= 0 {
            return Err(AppError::Validation(format!(
                "organization id must be a positive integer, got {}",
                self.organization_id
            )));
        }
        if let Some(ref status) = self.status
            && status.is_empty()
        {
            return Err(AppError::Validation("status must not be empty".into()));
        }
        if let Some(year) = self.year
            && !(MIN_YEAR..=MAX_YEAR).contains(&year)
        {
            return Err(AppError::Validation(format!(
                "year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }
        Ok(())
    }

    /// Compose the SELECT for this filter.
    ///
    /// The year test is an interval overlap: `start_date <= YYYY-12-31` and
    /// `end_date >= YYYY-01-01`, so a deal running from 2023 to 2025 matches 2024.
    pub fn build(&self) -> FilterQuery {
        let mut where_clause = String::from("WHERE organization_id = ?");
        let mut params = vec![Value::Integer(self.organization_id)];

        if let Some(ref status) = self.status {
            where_clause.push_str(" AND status = ?");
            params.push(Value::Text(status.clone()));
        }
        if let Some(year) = self.year {
            where_clause.push_str(" AND start_date <= ? AND end_date >= ?");
            params.push(Value::Text(format!("{:04}-12-31", year)));
            params.push(Value::Text(format!("{:04}-01-01", year)));
        }

        FilterQuery {
            sql: format!(
                "SELECT {} FROM deals {} ORDER BY start_date, id",
                DEAL_COLS, where_clause
            ),
            params,
        }
    }
}
