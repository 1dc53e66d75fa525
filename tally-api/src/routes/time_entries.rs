use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::Duration;
use tracing::instrument;

use tally_engine::domain::models::{
    BookingCodeId, NewTimeEntry, ServerId, TimeEntry, TimeEntryFilter, TimeEntryId,
    UpdateTimeEntry, UserId,
};
use tally_engine::domain::ports::inbound::TimeLoggingService;
use tally_engine::domain::services::parse_duration_minutes;

use crate::{app_state::AppState, routes::ApiError};

use super::{parse_date, parse_instant};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_time_entries).post(create_time_entry))
        .route(
            "/:entry_id",
            get(get_time_entry)
                .put(edit_time_entry)
                .delete(delete_time_entry),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    server_id: Option<String>,
    user_id: Option<String>,
    project_id: Option<String>,
    /// Work date lower bound, `YYYY-MM-DD`, inclusive.
    from: Option<String>,
    /// Work date upper bound, `YYYY-MM-DD`, inclusive.
    to: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> Result<TimeEntryFilter, ApiError> {
        let mut filter = TimeEntryFilter::default();
        if let Some(server_id) = self.server_id {
            filter = filter.with_server(server_id);
        }
        if let Some(user_id) = self.user_id {
            filter = filter.with_user(user_id);
        }
        if let Some(project_id) = self.project_id {
            filter = filter.with_project(project_id);
        }
        if let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) {
            let from = parse_date(from)?.midnight().assume_utc();
            // Inclusive day bound becomes a half-open instant range.
            let to = (parse_date(to)? + Duration::days(1)).midnight().assume_utc();
            filter = filter.with_date_range(from, to);
        }
        Ok(filter)
    }
}

#[instrument(name = "list_time_entries", skip(app_state))]
pub async fn list_time_entries(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TimeEntry>>, ApiError> {
    let filter = query.into_filter()?;
    let entries = app_state.time_logging.list_entries(&filter).await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntryPayload {
    server_id: String,
    booking_code_id: i32,
    user_id: String,
    /// Already-converted integer minutes.
    minutes: Option<i32>,
    /// Free-text duration as typed in the UI, e.g. `1h 30m`.
    duration: Option<String>,
    note: Option<String>,
    /// Work date as RFC 3339 (the date the work happened, not "now").
    date: String,
}

fn resolve_minutes(minutes: Option<i32>, duration: Option<&str>) -> Result<i32, ApiError> {
    match (minutes, duration) {
        (Some(m), _) => Ok(m),
        (None, Some(text)) => Ok(parse_duration_minutes(text)?),
        (None, None) => Err(ApiError::bad_request("either minutes or duration is required")),
    }
}

#[instrument(name = "create_time_entry", skip(app_state, payload))]
pub async fn create_time_entry(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTimeEntryPayload>,
) -> Result<(StatusCode, Json<TimeEntry>), ApiError> {
    let minutes = resolve_minutes(payload.minutes, payload.duration.as_deref())?;

    let entry = NewTimeEntry {
        server_id: ServerId::new(payload.server_id),
        booking_code_id: BookingCodeId::new(payload.booking_code_id),
        user_id: UserId::new(payload.user_id),
        minutes,
        note: payload.note,
        date: parse_instant(&payload.date)?,
    };

    let created = app_state.time_logging.log_time(entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(name = "get_time_entry", skip(app_state))]
pub async fn get_time_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<Json<TimeEntry>, ApiError> {
    app_state
        .time_logging
        .get_entry(TimeEntryId::new(entry_id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("time entry {} does not exist", entry_id)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTimeEntryPayload {
    server_id: String,
    booking_code_id: i32,
    minutes: Option<i32>,
    duration: Option<String>,
    note: Option<String>,
    date: String,
}

#[instrument(name = "edit_time_entry", skip(app_state, payload))]
pub async fn edit_time_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
    Json(payload): Json<EditTimeEntryPayload>,
) -> Result<Json<TimeEntry>, ApiError> {
    let minutes = resolve_minutes(payload.minutes, payload.duration.as_deref())?;

    let fields = UpdateTimeEntry {
        server_id: ServerId::new(payload.server_id),
        booking_code_id: BookingCodeId::new(payload.booking_code_id),
        minutes,
        note: payload.note,
        date: parse_instant(&payload.date)?,
    };

    let updated = app_state
        .time_logging
        .edit_entry(TimeEntryId::new(entry_id), fields)
        .await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    /// The acting user; entries may only be deleted by their owner.
    user_id: String,
}

#[instrument(name = "delete_time_entry", skip(app_state))]
pub async fn delete_time_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    app_state
        .time_logging
        .delete_entry(TimeEntryId::new(entry_id), &UserId::new(query.user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
