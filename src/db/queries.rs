use rusqlite::{Connection, params, params_from_iter};

use crate::error::{AppError, Result};
use crate::models::*;

use super::deal_filter::DealFilter;
use super::from_row::{ACCOUNT_COLS, DEAL_COLS, ORGANIZATION_COLS, query_all, query_one};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============ Organizations ============

pub fn list_organizations(conn: &Connection) -> Result<Vec<Organization>> {
    query_all(
        conn,
        &format!("SELECT {} FROM organizations ORDER BY id", ORGANIZATION_COLS),
        params![],
    )
}

pub fn get_organization_by_id(conn: &Connection, id: i64) -> Result<Option<Organization>> {
    query_one(
        conn,
        &format!("SELECT {} FROM organizations WHERE id = ?1", ORGANIZATION_COLS),
        params![id],
    )
}

pub fn create_organization(conn: &Connection, input: &CreateOrganization) -> Result<Organization> {
    conn.execute(
        "INSERT INTO organizations (name) VALUES (?1)",
        params![&input.name],
    )?;
    let id = conn.last_insert_rowid();
    get_organization_by_id(conn, id)?
        .ok_or_else(|| AppError::NotFound("Organization not found after insert".into()))
}

/// Rename an organization. Returns None if it does not exist.
pub fn update_organization(
    conn: &Connection,
    id: i64,
    input: &UpdateOrganization,
) -> Result<Option<Organization>> {
    let updated = conn.execute(
        "UPDATE organizations SET name = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
        params![&input.name, id],
    )?;
    if updated == 0 {
        return Ok(None);
    }
    get_organization_by_id(conn, id)
}

/// Hard delete. Fails at the storage layer (foreign key) if accounts or
/// deals still reference the organization; callers check
/// `count_organization_dependents` first to report a conflict.
pub fn delete_organization(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM organizations WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Number of accounts and deals that reference an organization.
pub fn count_organization_dependents(conn: &Connection, id: i64) -> Result<(i64, i64)> {
    let counts = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM accounts WHERE organization_id = ?1),
            (SELECT COUNT(*) FROM deals WHERE organization_id = ?1)",
        params![id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(counts)
}

// ============ Accounts ============

pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    query_all(
        conn,
        &format!("SELECT {} FROM accounts ORDER BY id", ACCOUNT_COLS),
        params![],
    )
}

pub fn get_account_by_id(conn: &Connection, id: i64) -> Result<Option<Account>> {
    query_one(
        conn,
        &format!("SELECT {} FROM accounts WHERE id = ?1", ACCOUNT_COLS),
        params![id],
    )
}

pub fn create_account(conn: &Connection, input: &CreateAccount) -> Result<Account> {
    conn.execute(
        "INSERT INTO accounts (name, organization_id) VALUES (?1, ?2)",
        params![&input.name, input.organization_id],
    )?;
    let id = conn.last_insert_rowid();
    get_account_by_id(conn, id)?
        .ok_or_else(|| AppError::NotFound("Account not found after insert".into()))
}

// ============ Deals ============

pub fn list_deals(conn: &Connection) -> Result<Vec<Deal>> {
    query_all(
        conn,
        &format!("SELECT {} FROM deals ORDER BY id", DEAL_COLS),
        params![],
    )
}

pub fn get_deal_by_id(conn: &Connection, id: i64) -> Result<Option<Deal>> {
    query_one(
        conn,
        &format!("SELECT {} FROM deals WHERE id = ?1", DEAL_COLS),
        params![id],
    )
}

pub fn create_deal(conn: &Connection, input: &CreateDeal) -> Result<Deal> {
    conn.execute(
        "INSERT INTO deals (account_id, organization_id, start_date, end_date, value, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.account_id,
            input.organization_id,
            input.start_date.format(DATE_FORMAT).to_string(),
            input.end_date.format(DATE_FORMAT).to_string(),
            input.value,
            &input.status,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_deal_by_id(conn, id)?.ok_or_else(|| AppError::NotFound("Deal not found after insert".into()))
}

/// Deals of one organization narrowed by the filter's optional status and year.
///
/// An organization with no deals (or that does not exist) yields an empty list.
/// The filter is validated first, so an invalid constraint never reaches SQLite.
pub fn list_deals_filtered(conn: &Connection, filter: &DealFilter) -> Result<Vec<Deal>> {
    filter.validate()?;
    let query = filter.build();
    tracing::debug!(
        organization_id = filter.organization_id,
        status = ?filter.status,
        year = ?filter.year,
        "Listing filtered deals"
    );
    query_all(conn, &query.sql, params_from_iter(query.params))
}
