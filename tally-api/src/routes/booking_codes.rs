use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::instrument;

use tally_engine::domain::models::{BookingCode, BookingCodeId, GroupId};
use tally_engine::domain::ports::outbound::BookingCodeStore;

use crate::{app_state::AppState, routes::ApiError};

use super::parse_instant;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups/:group_id/active-code", get(get_active_code))
        .route("/:code_id/status", get(get_code_status))
}

#[derive(Debug, Deserialize)]
pub struct AtQuery {
    /// RFC 3339 instant; defaults to now.
    at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCodeResponse {
    /// `null` means no code is assigned at the instant, which is a valid
    /// steady state, not an error.
    pub code: Option<BookingCode>,
}

#[instrument(name = "get_active_code", skip(app_state))]
pub async fn get_active_code(
    State(app_state): State<AppState>,
    Path(group_id): Path<i32>,
    Query(query): Query<AtQuery>,
) -> Result<Json<ActiveCodeResponse>, ApiError> {
    let at = match query.at.as_deref() {
        Some(s) => parse_instant(s)?,
        None => OffsetDateTime::now_utc(),
    };

    let code = app_state
        .resolver
        .resolve_active_code(GroupId::new(group_id), at)
        .await?;

    Ok(Json(ActiveCodeResponse { code }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStatusResponse {
    pub code: String,
    pub enabled: bool,
    /// Rendered as "Expired", distinct from "no code assigned".
    pub expired: bool,
}

#[instrument(name = "get_code_status", skip(app_state))]
pub async fn get_code_status(
    State(app_state): State<AppState>,
    Path(code_id): Path<i32>,
    Query(query): Query<AtQuery>,
) -> Result<Json<CodeStatusResponse>, ApiError> {
    let at = match query.at.as_deref() {
        Some(s) => parse_instant(s)?,
        None => OffsetDateTime::now_utc(),
    };

    let code = app_state
        .booking_codes
        .get(BookingCodeId::new(code_id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("booking code {} does not exist", code_id)))?;

    Ok(Json(CodeStatusResponse {
        enabled: code.enabled,
        expired: app_state.resolver.is_expired(&code, at),
        code: code.code,
    }))
}
