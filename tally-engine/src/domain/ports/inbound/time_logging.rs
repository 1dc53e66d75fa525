use async_trait::async_trait;

use crate::domain::{
    models::{NewTimeEntry, TimeEntry, TimeEntryFilter, TimeEntryId, UpdateTimeEntry, UserId},
    EngineError,
};

/// Inbound port for time entry writes.
///
/// Every mutation runs the validator first; a failed rule surfaces as
/// `EngineError::Validation` with rule-specific text and nothing is written.
#[async_trait]
pub trait TimeLoggingService: Send + Sync + 'static {
    /// Validate and persist a new entry.
    async fn log_time(&self, entry: NewTimeEntry) -> Result<TimeEntry, EngineError>;

    /// Full-replace edit of an existing entry, revalidated as a whole.
    async fn edit_entry(
        &self,
        id: TimeEntryId,
        fields: UpdateTimeEntry,
    ) -> Result<TimeEntry, EngineError>;

    /// Delete an entry. Only the owning user may delete it.
    async fn delete_entry(
        &self,
        id: TimeEntryId,
        requested_by: &UserId,
    ) -> Result<(), EngineError>;

    async fn get_entry(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, EngineError>;

    async fn list_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>, EngineError>;
}
