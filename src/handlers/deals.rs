use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::db::{AppState, DealFilter, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path, Query};
use crate::models::{CreateDeal, Deal};
use crate::util::parse_id;

/// Query string for `GET /api/deals/organization/{id}`.
///
/// Values stay as raw strings so `DealFilter::parse` can reject malformed
/// input with a message naming the bad value.
#[derive(Debug, Default, Deserialize)]
pub struct DealFilterQuery {
    pub status: Option<String>,
    pub year: Option<String>,
}

pub async fn list_deals(State(state): State<AppState>) -> Result<Json<Vec<Deal>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_deals(&conn)?))
}

pub async fn get_deal(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Deal>> {
    let id = parse_id(&id, "deal id")?;
    let conn = state.db.get()?;
    let deal = queries::get_deal_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Deal not found".into()))?;
    Ok(Json(deal))
}

/// GET /api/deals/organization/{id}?status=&year=
/// Deals of one organization, optionally narrowed by exact status and by
/// calendar-year overlap. Unknown organizations yield `[]`.
pub async fn list_deals_for_organization(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
    Query(query): Query<DealFilterQuery>,
) -> Result<Json<Vec<Deal>>> {
    let filter = DealFilter::parse(
        &organization_id,
        query.status.as_deref(),
        query.year.as_deref(),
    )?;

    let conn = state.db.get()?;
    let deals = queries::list_deals_filtered(&conn, &filter)?;
    Ok(Json(deals))
}

pub async fn create_deal(
    State(state): State<AppState>,
    Json(input): Json<CreateDeal>,
) -> Result<(StatusCode, Json<Deal>)> {
    input.validate()?;

    let conn = state.db.get()?;

    // organization_id is denormalized onto the deal, so it has to match the account's
    let account = queries::get_account_by_id(&conn, input.account_id)?.ok_or_else(|| {
        AppError::Validation(format!("Account {} does not exist", input.account_id))
    })?;
    if account.organization_id != input.organization_id {
        return Err(AppError::Validation(format!(
            "Account {} belongs to organization {}, not {}",
            account.id, account.organization_id, input.organization_id
        )));
    }

    let deal = queries::create_deal(&conn, &input)?;
    tracing::info!(
        "Created deal {} for account {} ({} {})",
        deal.id,
        deal.account_id,
        deal.status,
        deal.value
    );

    Ok((StatusCode::CREATED, Json(deal)))
}
