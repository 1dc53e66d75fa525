use async_trait::async_trait;

use crate::domain::{
    models::{BookingCode, BookingCodeGroup, BookingCodeId, GroupId},
    EngineError,
};

/// Outbound port for the booking code storage collaborator.
///
/// The engine owns no storage concerns; implementations wrap whatever table
/// or service holds the admin-managed groups and codes. Failures surface as
/// `EngineError::Storage` and are not retried here.
#[async_trait]
pub trait BookingCodeStore: Send + Sync + 'static {
    /// All codes belonging to a group, enabled or not.
    ///
    /// Errors with `GroupNotFound` when the group does not exist, which is
    /// distinct from an existing group with no codes.
    async fn list_by_group(&self, group_id: GroupId) -> Result<Vec<BookingCode>, EngineError>;

    async fn get(&self, id: BookingCodeId) -> Result<Option<BookingCode>, EngineError>;

    async fn get_group(&self, id: GroupId) -> Result<Option<BookingCodeGroup>, EngineError>;
}
