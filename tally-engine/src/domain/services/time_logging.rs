use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{NewTimeEntry, TimeEntry, TimeEntryFilter, TimeEntryId, UpdateTimeEntry, UserId},
    ports::{
        inbound::TimeLoggingService,
        outbound::{BookingCodeStore, TimeEntryStore},
    },
    EngineError,
};

use super::validator::TimeEntryValidator;

/// Implementation of the TimeLoggingService inbound port.
///
/// The validator gates every write; the store is only touched once the
/// candidate has passed all rules.
pub struct TimeLoggingServiceImpl<E, C> {
    entries: Arc<E>,
    validator: TimeEntryValidator<C>,
}

impl<E, C: BookingCodeStore> TimeLoggingServiceImpl<E, C> {
    pub fn new(entries: Arc<E>, codes: Arc<C>) -> Self {
        Self {
            entries,
            validator: TimeEntryValidator::new(codes),
        }
    }
}

#[async_trait]
impl<E: TimeEntryStore, C: BookingCodeStore> TimeLoggingService for TimeLoggingServiceImpl<E, C> {
    async fn log_time(&self, entry: NewTimeEntry) -> Result<TimeEntry, EngineError> {
        self.validator.validate(&entry).await?;
        self.entries.insert(entry).await
    }

    async fn edit_entry(
        &self,
        id: TimeEntryId,
        fields: UpdateTimeEntry,
    ) -> Result<TimeEntry, EngineError> {
        let existing = self
            .entries
            .get(id)
            .await?
            .ok_or(EngineError::EntryNotFound(id))?;

        // Full replace: the edited entry is revalidated as a whole, with the
        // owner carried over unchanged.
        let candidate = NewTimeEntry {
            server_id: fields.server_id.clone(),
            booking_code_id: fields.booking_code_id,
            user_id: existing.user_id,
            minutes: fields.minutes,
            note: fields.note.clone(),
            date: fields.date,
        };
        self.validator.validate(&candidate).await?;

        self.entries.update(id, fields).await
    }

    async fn delete_entry(
        &self,
        id: TimeEntryId,
        requested_by: &UserId,
    ) -> Result<(), EngineError> {
        let existing = self
            .entries
            .get(id)
            .await?
            .ok_or(EngineError::EntryNotFound(id))?;

        if existing.user_id != *requested_by {
            return Err(EngineError::NotEntryOwner);
        }

        self.entries.delete(id).await
    }

    async fn get_entry(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, EngineError> {
        self.entries.get(id).await
    }

    async fn list_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>, EngineError> {
        self.entries.query(filter).await
    }
}
