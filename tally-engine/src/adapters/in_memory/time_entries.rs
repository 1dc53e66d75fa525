use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc, RwLock,
};

use async_trait::async_trait;
use itertools::Itertools;
use time::OffsetDateTime;

use crate::domain::{
    models::{
        NewTimeEntry, ProjectId, ServerId, TimeEntry, TimeEntryFilter, TimeEntryId,
        UpdateTimeEntry,
    },
    ports::outbound::TimeEntryStore,
    EngineError,
};

/// Time entry store backed by an in-memory map.
///
/// Concurrent edits to the same entry are last-write-wins, matching the
/// guarantee (or lack of one) the real storage layer provides.
///
/// Filtering by project needs to know which project a server belongs to;
/// that relation lives in the inventory schema, so this adapter carries an
/// explicit server-to-project index seeded by the caller.
#[derive(Default)]
pub struct InMemoryTimeEntryStore {
    entries: Arc<RwLock<HashMap<TimeEntryId, TimeEntry>>>,
    server_projects: Arc<RwLock<HashMap<ServerId, ProjectId>>>,
    next_id: AtomicI32,
}

impl InMemoryTimeEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_project(
        self,
        server_id: impl Into<ServerId>,
        project_id: impl Into<ProjectId>,
    ) -> Self {
        self.server_projects
            .write()
            .unwrap()
            .insert(server_id.into(), project_id.into());
        self
    }

    fn matches(&self, entry: &TimeEntry, filter: &TimeEntryFilter) -> bool {
        if let Some(server_id) = &filter.server_id {
            if entry.server_id != *server_id {
                return false;
            }
        }
        if let Some(user_id) = &filter.user_id {
            if entry.user_id != *user_id {
                return false;
            }
        }
        if let Some(project_id) = &filter.project_id {
            let index = self.server_projects.read().unwrap();
            if index.get(&entry.server_id) != Some(project_id) {
                return false;
            }
        }
        if let Some((from, to)) = &filter.date_range {
            // Half-open, like the periods the range came from.
            if entry.date < *from || entry.date >= *to {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl TimeEntryStore for InMemoryTimeEntryStore {
    async fn query(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>, EngineError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .values()
            .filter(|e| self.matches(e, filter))
            .cloned()
            .sorted_by_key(|e| (e.date, e.id))
            .collect())
    }

    async fn get(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, EngineError> {
        Ok(self.entries.read().unwrap().get(&id).cloned())
    }

    async fn insert(&self, entry: NewTimeEntry) -> Result<TimeEntry, EngineError> {
        let id = TimeEntryId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = OffsetDateTime::now_utc();

        let entry = TimeEntry {
            id,
            server_id: entry.server_id,
            booking_code_id: entry.booking_code_id,
            user_id: entry.user_id,
            minutes: entry.minutes,
            note: entry.note,
            date: entry.date,
            created_at: now,
            updated_at: now,
        };

        self.entries.write().unwrap().insert(id, entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        id: TimeEntryId,
        fields: UpdateTimeEntry,
    ) -> Result<TimeEntry, EngineError> {
        let mut entries = self.entries.write().unwrap();
        let entry = entries.get_mut(&id).ok_or(EngineError::EntryNotFound(id))?;

        entry.server_id = fields.server_id;
        entry.booking_code_id = fields.booking_code_id;
        entry.minutes = fields.minutes;
        entry.note = fields.note;
        entry.date = fields.date;
        entry.updated_at = OffsetDateTime::now_utc();

        Ok(entry.clone())
    }

    async fn delete(&self, id: TimeEntryId) -> Result<(), EngineError> {
        self.entries
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(EngineError::EntryNotFound(id))
    }
}
