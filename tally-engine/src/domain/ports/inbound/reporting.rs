use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Granularity, Matrix, TimeEntryFilter},
    services::Dimension,
    EngineError,
};

/// Inbound port for the time report views.
#[async_trait]
pub trait ReportingService: Send + Sync + 'static {
    /// Build the dense report matrix for the last `period_count` periods of
    /// `granularity` ending at the period containing `reference`.
    ///
    /// Composes the store query, the period calculator, the aggregator and
    /// the matrix builder. Computed fully synchronously per request and
    /// discarded; caching is the caller's concern.
    async fn build_matrix(
        &self,
        filter: TimeEntryFilter,
        dimension: Dimension,
        granularity: Granularity,
        period_count: usize,
        reference: OffsetDateTime,
        include_totals: bool,
    ) -> Result<Matrix, EngineError>;
}
