use async_trait::async_trait;

use crate::domain::{
    models::{NewTimeEntry, TimeEntry, TimeEntryFilter, TimeEntryId, UpdateTimeEntry},
    EngineError,
};

/// Outbound port for the time entry storage collaborator.
///
/// Writes happen only after `TimeEntryValidator` has passed. Concurrent
/// edits to the same entry are last-write-wins at this layer; that is an
/// accepted simplification inherited from the source system.
#[async_trait]
pub trait TimeEntryStore: Send + Sync + 'static {
    async fn query(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>, EngineError>;

    async fn get(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, EngineError>;

    async fn insert(&self, entry: NewTimeEntry) -> Result<TimeEntry, EngineError>;

    /// Full replace of the mutable fields. No partial accumulation.
    async fn update(
        &self,
        id: TimeEntryId,
        fields: UpdateTimeEntry,
    ) -> Result<TimeEntry, EngineError>;

    async fn delete(&self, id: TimeEntryId) -> Result<(), EngineError>;
}
