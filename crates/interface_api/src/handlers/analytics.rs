//! Analytics handlers
//!
//! Monthly, category and dashboard views default to the current month when no
//! `year`/`month` pair is given.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::analytics::{
    CategorySummaryResponse, DashboardResponse, MonthlySummaryResponse, TrendsResponse,
};
use crate::dto::query::{PeriodQuery, TrendsQuery};
use crate::{error::ApiError, AppState};

pub async fn monthly_summary(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<MonthlySummaryResponse>, ApiError> {
    query.validate()?;
    let report = state
        .service
        .monthly_summary(room_id.into(), query.window()?)
        .await?;
    Ok(Json((&report).into()))
}

pub async fn category_summary(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<CategorySummaryResponse>, ApiError> {
    query.validate()?;
    let report = state
        .service
        .category_breakdown(room_id.into(), query.window()?)
        .await?;
    Ok(Json((&report).into()))
}

/// Month-by-month totals over the trailing `months` months
pub async fn trends(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendsResponse>, ApiError> {
    query.validate()?;
    let months = query.months.unwrap_or(state.config.default_trend_months);
    let report = state.service.trends(room_id.into(), months).await?;
    Ok(Json((&report).into()))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    query.validate()?;
    let dashboard = state
        .service
        .dashboard(room_id.into(), query.window()?)
        .await?;
    Ok(Json((&dashboard).into()))
}
