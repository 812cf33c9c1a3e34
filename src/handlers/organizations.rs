use axum::{extract::State, http::StatusCode};

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::models::{CreateOrganization, Organization, UpdateOrganization};
use crate::util::parse_id;

pub async fn list_organizations(State(state): State<AppState>) -> Result<Json<Vec<Organization>>> {
    let conn = state.db.get()?;
    let organizations = queries::list_organizations(&conn)?;
    Ok(Json(organizations))
}

pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>> {
    let id = parse_id(&id, "organization id")?;
    let conn = state.db.get()?;
    let organization = queries::get_organization_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;
    Ok(Json(organization))
}

pub async fn create_organization(
    State(state): State<AppState>,
    Json(input): Json<CreateOrganization>,
) -> Result<(StatusCode, Json<Organization>)> {
    input.validate()?;

    let conn = state.db.get()?;
    let organization = queries::create_organization(&conn, &input)?;
    tracing::info!("Created organization {} ({})", organization.name, organization.id);

    Ok((StatusCode::CREATED, Json(organization)))
}

pub async fn update_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrganization>,
) -> Result<Json<Organization>> {
    let id = parse_id(&id, "organization id")?;
    input.validate()?;

    let conn = state.db.get()?;
    let organization = queries::update_organization(&conn, id, &input)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;
    Ok(Json(organization))
}

/// Hard delete. Refused while accounts or deals still reference the
/// organization; children are never removed implicitly.
pub async fn delete_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "organization id")?;
    let conn = state.db.get()?;

    if queries::get_organization_by_id(&conn, id)?.is_none() {
        return Err(AppError::NotFound("Organization not found".into()));
    }

    let (accounts, deals) = queries::count_organization_dependents(&conn, id)?;
    if accounts > 0 || deals > 0 {
        return Err(AppError::Conflict(format!(
            "Organization {} still has {} account(s) and {} deal(s)",
            id, accounts, deals
        )));
    }

    queries::delete_organization(&conn, id)?;
    tracing::info!("Deleted organization {}", id);

    Ok(StatusCode::NO_CONTENT)
}
