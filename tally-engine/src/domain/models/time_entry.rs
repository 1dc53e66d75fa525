use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{BookingCodeId, ProjectId, ServerId, TimeEntryId, UserId};

/// A persisted record of engineer time logged against a booking code.
///
/// `date` is the work date the time was spent on, not the instant the entry
/// was created. Aggregation buckets on `date`, never on `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub server_id: ServerId,
    pub booking_code_id: BookingCodeId,
    pub user_id: UserId,
    pub minutes: i32,
    pub note: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A candidate time entry, not yet validated or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeEntry {
    pub server_id: ServerId,
    pub booking_code_id: BookingCodeId,
    pub user_id: UserId,
    pub minutes: i32,
    pub note: Option<String>,
    pub date: OffsetDateTime,
}

/// Full-replace edit of an existing entry. There is no partial accumulation;
/// the owner and identity are immutable, everything else is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTimeEntry {
    pub server_id: ServerId,
    pub booking_code_id: BookingCodeId,
    pub minutes: i32,
    pub note: Option<String>,
    pub date: OffsetDateTime,
}

/// Query filter for the time entry store.
///
/// `date_range` is half-open: `[from, to)`.
#[derive(Debug, Clone, Default)]
pub struct TimeEntryFilter {
    pub server_id: Option<ServerId>,
    pub user_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub date_range: Option<(OffsetDateTime, OffsetDateTime)>,
}

impl TimeEntryFilter {
    pub fn with_server(mut self, server_id: impl Into<ServerId>) -> Self {
        self.server_id = Some(server_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_project(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_date_range(mut self, from: OffsetDateTime, to: OffsetDateTime) -> Self {
        self.date_range = Some((from, to));
        self
    }
}
