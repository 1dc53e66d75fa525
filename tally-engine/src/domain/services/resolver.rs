use std::sync::Arc;

use itertools::Itertools;
use time::OffsetDateTime;

use crate::domain::{
    models::{BookingCode, GroupId},
    ports::outbound::BookingCodeStore,
    EngineError, ValidationError,
};

/// Selects the single applicable booking code for a group at an instant.
///
/// The schema permits overlapping validity windows (uniqueness is on
/// group + code + valid_from, not a full overlap check), so more than one
/// code can match. The tie-break is deterministic and part of the contract:
/// latest `valid_from` wins, then highest id. Overlap is logged as a warning
/// since it indicates a data-entry inconsistency upstream, but it is never
/// surfaced as a user error.
///
/// Pure read; no side effects beyond the warning log.
pub struct BookingCodeResolver<S> {
    store: Arc<S>,
}

impl<S: BookingCodeStore> BookingCodeResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The active code for the group at `at`, or `None` when no window
    /// contains the instant.
    ///
    /// `None` is a valid steady state (newly created groups, lapsed codes),
    /// not an error; callers render it as "no code assigned".
    pub async fn resolve_active_code(
        &self,
        group_id: GroupId,
        at: OffsetDateTime,
    ) -> Result<Option<BookingCode>, EngineError> {
        let codes = self.store.list_by_group(group_id).await?;

        // Storage does not enforce window sanity. A code with an inverted
        // window could never match the filter below, which would silently
        // coerce the bad data; reject it instead.
        if let Some(bad) = codes
            .iter()
            .filter(|c| c.enabled)
            .find(|c| !c.has_well_formed_window())
        {
            return Err(ValidationError::InvalidCodeWindow {
                code: bad.code.clone(),
            }
            .into());
        }

        let candidates: Vec<&BookingCode> = codes
            .iter()
            .filter(|c| c.enabled && c.contains(at))
            .collect();

        if candidates.len() > 1 {
            tracing::warn!(
                group_id = %group_id,
                at = %at,
                codes = %candidates.iter().map(|c| c.code.as_str()).join(", "),
                "multiple booking codes active at the same instant, \
                 tie-breaking by latest valid_from then highest id"
            );
        }

        Ok(candidates
            .into_iter()
            .max_by_key(|c| (c.valid_from, c.id))
            .cloned())
    }

    /// Same as `resolve_active_code` against the current instant.
    pub async fn resolve_active_code_now(
        &self,
        group_id: GroupId,
    ) -> Result<Option<BookingCode>, EngineError> {
        self.resolve_active_code(group_id, OffsetDateTime::now_utc())
            .await
    }

    /// Whether `at` is past the code's window. Exposed separately because
    /// callers display "Expired" as distinct from "no code assigned".
    pub fn is_expired(&self, code: &BookingCode, at: OffsetDateTime) -> bool {
        code.is_expired(at)
    }
}
