//! Row mapping from storage shape to API models.
//!
//! Rows are read by column name into a `*Record` struct that mirrors the table
//! (snake_case, dates as stored text). Converting a record into its model is a
//! pure step that coerces the date columns into `chrono` types. Columns the
//! model needs but the row lacks are reported as a `MappingError` instead of
//! being defaulted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::FromSql;
use rusqlite::{Connection, Params, Row};
use thiserror::Error;

use crate::error::{AppError, Result};
use crate::models::{Account, Deal, Organization};

/// Format SQLite uses for `CURRENT_TIMESTAMP`.
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("column `{0}` is NULL")]
    NullColumn(&'static str),

    #[error("column `{column}`: {source}")]
    Column {
        column: &'static str,
        source: rusqlite::Error,
    },

    #[error("column `{column}` holds an invalid date: {value:?}")]
    InvalidDate { column: &'static str, value: String },
}

/// Trait for constructing a type from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> std::result::Result<Self, MappingError>;
}

/// Read a required, non-NULL column by name.
fn column<T: FromSql>(row: &Row, name: &'static str) -> std::result::Result<T, MappingError> {
    match row.get::<_, Option<T>>(name) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(MappingError::NullColumn(name)),
        Err(rusqlite::Error::InvalidColumnName(_)) => Err(MappingError::MissingColumn(name)),
        Err(source) => Err(MappingError::Column {
            column: name,
            source,
        }),
    }
}

fn parse_date(column: &'static str, value: &str) -> std::result::Result<NaiveDate, MappingError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| MappingError::InvalidDate {
            column,
            value: value.to_string(),
        })
}

fn parse_timestamp(
    column: &'static str,
    value: &str,
) -> std::result::Result<DateTime<Utc>, MappingError> {
    NaiveDateTime::parse_from_str(value, SQLITE_TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|_| MappingError::InvalidDate {
            column,
            value: value.to_string(),
        })
}

/// Query for a single optional result.
pub fn query_one<T: FromRow, P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query_and_then(params, |row| T::from_row(row).map_err(AppError::from))?;
    rows.next().transpose()
}

/// Query for multiple results.
pub fn query_all<T: FromRow, P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_and_then(params, |row| T::from_row(row).map_err(AppError::from))?
        .collect::<Result<Vec<_>>>()?;
    Ok(rows)
}

// ============ SQL SELECT Constants ============

pub const ORGANIZATION_COLS: &str = "id, name, created_at, updated_at";

pub const ACCOUNT_COLS: &str = "id, name, organization_id, created_at, updated_at";

pub const DEAL_COLS: &str =
    "id, account_id, organization_id, start_date, end_date, value, status, created_at, updated_at";

// ============ Storage records ============

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationRecord {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl OrganizationRecord {
    pub fn read(row: &Row) -> std::result::Result<Self, MappingError> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

impl TryFrom<OrganizationRecord> for Organization {
    type Error = MappingError;

    fn try_from(r: OrganizationRecord) -> std::result::Result<Self, Self::Error> {
        Ok(Organization {
            id: r.id,
            name: r.name,
            created_at: parse_timestamp("created_at", &r.created_at)?,
            updated_at: parse_timestamp("updated_at", &r.updated_at)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: i64,
    pub name: String,
    pub organization_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl AccountRecord {
    pub fn read(row: &Row) -> std::result::Result<Self, MappingError> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
            organization_id: column(row, "organization_id")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

impl TryFrom<AccountRecord> for Account {
    type Error = MappingError;

    fn try_from(r: AccountRecord) -> std::result::Result<Self, Self::Error> {
        Ok(Account {
            id: r.id,
            name: r.name,
            organization_id: r.organization_id,
            created_at: parse_timestamp("created_at", &r.created_at)?,
            updated_at: parse_timestamp("updated_at", &r.updated_at)?,
        })
    }
}

/// A `deals` row exactly as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRecord {
    pub id: i64,
    pub account_id: i64,
    pub organization_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub value: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DealRecord {
    pub fn read(row: &Row) -> std::result::Result<Self, MappingError> {
        Ok(Self {
            id: column(row, "id")?,
            account_id: column(row, "account_id")?,
            organization_id: column(row, "organization_id")?,
            start_date: column(row, "start_date")?,
            end_date: column(row, "end_date")?,
            value: column(row, "value")?,
            status: column(row, "status")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

impl TryFrom<DealRecord> for Deal {
    type Error = MappingError;

    fn try_from(r: DealRecord) -> std::result::Result<Self, Self::Error> {
        Ok(Deal {
            id: r.id,
            account_id: r.account_id,
            organization_id: r.organization_id,
            start_date: parse_date("start_date", &r.start_date)?,
            end_date: parse_date("end_date", &r.end_date)?,
            value: r.value,
            status: r.status,
            created_at: parse_timestamp("created_at", &r.created_at)?,
            updated_at: parse_timestamp("updated_at", &r.updated_at)?,
        })
    }
}

// ============ FromRow Implementations ============

impl FromRow for Organization {
    fn from_row(row: &Row) -> std::result::Result<Self, MappingError> {
        OrganizationRecord::read(row)?.try_into()
    }
}

impl FromRow for Account {
    fn from_row(row: &Row) -> std::result::Result<Self, MappingError> {
        AccountRecord::read(row)?.try_into()
    }
}

impl FromRow for Deal {
    fn from_row(row: &Row) -> std::result::Result<Self, MappingError> {
        DealRecord::read(row)?.try_into()
    }
}
