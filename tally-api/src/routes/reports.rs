use std::str::FromStr;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use tally_engine::domain::models::{Granularity, Matrix, TimeEntryFilter};
use tally_engine::domain::ports::inbound::ReportingService;
use tally_engine::domain::services::Dimension;

use crate::{app_state::AppState, routes::ApiError};

use super::parse_instant;

pub fn router() -> Router<AppState> {
    Router::new().route("/time-matrix", get(get_time_matrix))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixQuery {
    /// `engineer`, `bookingCode` or `project`.
    dimension: String,
    /// `day`, `week`, `month` or `year`.
    granularity: String,
    /// Number of trailing periods; defaults from configuration.
    periods: Option<usize>,
    /// RFC 3339 instant anchoring the last period; defaults to now.
    reference: Option<String>,
    include_totals: Option<bool>,
    server_id: Option<String>,
    user_id: Option<String>,
    project_id: Option<String>,
}

#[instrument(name = "get_time_matrix", skip(app_state))]
pub async fn get_time_matrix(
    State(app_state): State<AppState>,
    Query(query): Query<MatrixQuery>,
) -> Result<Json<Matrix>, ApiError> {
    let dimension = Dimension::from_str(&query.dimension)
        .map_err(|_| ApiError::bad_request(format!("unknown dimension: {}", query.dimension)))?;
    let granularity = Granularity::from_str(&query.granularity).map_err(|_| {
        ApiError::bad_request(format!("unknown granularity: {}", query.granularity))
    })?;

    let reference = match query.reference.as_deref() {
        Some(s) => parse_instant(s)?,
        None => OffsetDateTime::now_utc(),
    };
    let defaults = &app_state.reporting_defaults;
    let period_count = query.periods.unwrap_or(defaults.default_period_count);
    let include_totals = query.include_totals.unwrap_or(defaults.include_totals);

    let mut filter = TimeEntryFilter::default();
    if let Some(server_id) = query.server_id {
        filter = filter.with_server(server_id);
    }
    if let Some(user_id) = query.user_id {
        filter = filter.with_user(user_id);
    }
    if let Some(project_id) = query.project_id {
        filter = filter.with_project(project_id);
    }

    let matrix = app_state
        .reporting
        .build_matrix(
            filter,
            dimension,
            granularity,
            period_count,
            reference,
            include_totals,
        )
        .await?;

    Ok(Json(matrix))
}
