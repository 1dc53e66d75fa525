use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{BookingCodeId, GroupId, ProjectId};

/// A named collection of booking codes, assigned to projects as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCodeGroup {
    pub id: GroupId,
    /// Unique within the installation.
    pub name: String,
    pub description: String,
}

/// A booking code with a validity window.
///
/// Uniqueness is on group + code + valid_from, not a full overlap check, so
/// two codes in the same group may have overlapping windows. The resolver
/// disambiguates deterministically; see `BookingCodeResolver`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCode {
    pub id: BookingCodeId,
    pub group_id: GroupId,
    pub code: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub valid_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub valid_to: OffsetDateTime,
    pub enabled: bool,
}

impl BookingCode {
    /// Whether the validity window contains the instant (both ends inclusive).
    pub fn contains(&self, at: OffsetDateTime) -> bool {
        self.valid_from <= at && at <= self.valid_to
    }

    /// Whether the window has lapsed at the given instant.
    ///
    /// Distinct from "no code assigned": callers render "Expired" for this.
    pub fn is_expired(&self, at: OffsetDateTime) -> bool {
        at > self.valid_to
    }

    /// Storage does not enforce `valid_from <= valid_to`; the engine surfaces
    /// violations as validation errors instead of coercing them.
    pub fn has_well_formed_window(&self) -> bool {
        self.valid_from <= self.valid_to
    }
}

/// Links a project to its current booking code group.
///
/// A project only sensibly has one current group; that is enforced at the
/// application layer, not by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBookingCodeAssignment {
    pub project_id: ProjectId,
    pub group_id: GroupId,
}
