use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use itertools::Itertools;

use crate::domain::{
    models::{BookingCode, BookingCodeGroup, BookingCodeId, GroupId},
    ports::outbound::BookingCodeStore,
    EngineError,
};

/// Booking code store backed by in-memory maps.
///
/// Backs the tests and the default API wiring; a deployment would implement
/// `BookingCodeStore` against its real storage instead.
#[derive(Clone, Default)]
pub struct InMemoryBookingCodeStore {
    groups: Arc<RwLock<HashMap<GroupId, BookingCodeGroup>>>,
    codes: Arc<RwLock<HashMap<BookingCodeId, BookingCode>>>,
}

impl InMemoryBookingCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(self, group: BookingCodeGroup) -> Self {
        self.groups.write().unwrap().insert(group.id, group);
        self
    }

    pub fn with_code(self, code: BookingCode) -> Self {
        self.codes.write().unwrap().insert(code.id, code);
        self
    }

    pub fn with_codes(self, codes: Vec<BookingCode>) -> Self {
        {
            let mut map = self.codes.write().unwrap();
            for code in codes {
                map.insert(code.id, code);
            }
        }
        self
    }
}

#[async_trait]
impl BookingCodeStore for InMemoryBookingCodeStore {
    async fn list_by_group(&self, group_id: GroupId) -> Result<Vec<BookingCode>, EngineError> {
        if !self.groups.read().unwrap().contains_key(&group_id) {
            return Err(EngineError::GroupNotFound(group_id));
        }

        Ok(self
            .codes
            .read()
            .unwrap()
            .values()
            .filter(|c| c.group_id == group_id)
            .cloned()
            .sorted_by_key(|c| c.id)
            .collect())
    }

    async fn get(&self, id: BookingCodeId) -> Result<Option<BookingCode>, EngineError> {
        Ok(self.codes.read().unwrap().get(&id).cloned())
    }

    async fn get_group(&self, id: GroupId) -> Result<Option<BookingCodeGroup>, EngineError> {
        Ok(self.groups.read().unwrap().get(&id).cloned())
    }
}
