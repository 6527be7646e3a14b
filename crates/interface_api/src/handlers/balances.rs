//! Balance handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::balances::BalancesResponse;
use crate::dto::query::PeriodQuery;
use crate::{error::ApiError, AppState};

/// Net balances and settlement transfers for a room
///
/// Without `year` and `month` the room's whole history is settled.
pub async fn get_balances(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<BalancesResponse>, ApiError> {
    query.validate()?;
    let window = query.window()?;

    let report = state.service.room_balances(room_id.into(), window).await?;

    Ok(Json(BalancesResponse::from_report(&report)?))
}
