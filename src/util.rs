//! Shared helpers for turning raw request values into typed inputs.

use crate::error::{AppError, Result};

/// Parse a surrogate identifier taken from a path segment or query string.
///
/// Identifiers are assigned by SQLite's AUTOINCREMENT and are always positive,
/// so empty, non-numeric, zero and negative values are all rejected.
pub fn parse_id(raw: &str, what: &str) -> Result<i64> {
    let id: i64 = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a positive integer, got {:?}", what, raw)))?;
    if id <= 0 {
        return Err(AppError::Validation(format!(
            "{} must be a positive integer, got {}",
            what, id
        )));
    }
    Ok(id)
}

/// Reject blank required strings (presence check only).
pub fn require_non_blank(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
