use axum::{extract::State, http::StatusCode};

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::models::{Account, CreateAccount};
use crate::util::parse_id;

pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_accounts(&conn)?))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>> {
    let id = parse_id(&id, "account id")?;
    let conn = state.db.get()?;
    let account = queries::get_account_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;
    Ok(Json(account))
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(input): Json<CreateAccount>,
) -> Result<(StatusCode, Json<Account>)> {
    input.validate()?;

    let conn = state.db.get()?;

    // The owning organization must exist
    if queries::get_organization_by_id(&conn, input.organization_id)?.is_none() {
        return Err(AppError::Validation(format!(
            "Organization {} does not exist",
            input.organization_id
        )));
    }

    let account = queries::create_account(&conn, &input)?;
    tracing::info!(
        "Created account {} ({}) in organization {}",
        account.name,
        account.id,
        account.organization_id
    );

    Ok((StatusCode::CREATED, Json(account)))
}
