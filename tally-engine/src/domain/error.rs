use thiserror::Error;

use super::models::{BookingCodeId, GroupId, TimeEntryId};

/// A time entry rejected before persistence.
///
/// Always recoverable locally; the message names the specific violated rule
/// so the UI can surface it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("time must be greater than zero")]
    NonPositiveMinutes,
    #[error("could not parse duration '{0}' as minutes")]
    UnparseableDuration(String),
    #[error("booking code {0} does not exist")]
    UnknownBookingCode(BookingCodeId),
    #[error("booking code '{code}' is disabled")]
    DisabledBookingCode { code: String },
    #[error("booking code '{code}' has an invalid validity window (valid from is after valid to)")]
    InvalidCodeWindow { code: String },
    #[error("entry date falls outside booking code '{code}'s valid range")]
    DateOutsideValidity { code: String },
    #[error("server reference must not be empty")]
    MissingServerReference,
    #[error("user reference must not be empty")]
    MissingUserReference,
    #[error("period count must be greater than zero")]
    InvalidPeriodCount,
}

/// Errors that can occur during booking code resolution, time logging and
/// report building.
///
/// "No active code" is deliberately not here: it is a valid steady state and
/// the resolver returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("booking code group {0} does not exist")]
    GroupNotFound(GroupId),
    #[error("time entry {0} does not exist")]
    EntryNotFound(TimeEntryId),
    #[error("time entries may only be deleted by their owner")]
    NotEntryOwner,
    /// Opaque failure from a storage collaborator. Propagated unchanged;
    /// retry policy belongs to the storage layer, not this engine.
    #[error("storage error: {0}")]
    Storage(String),
}

impl EngineError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
