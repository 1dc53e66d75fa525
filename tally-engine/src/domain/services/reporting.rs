use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;
use time::OffsetDateTime;

use crate::domain::{
    models::{Granularity, Matrix, Period, RowIdentity, TimeEntryFilter},
    ports::{inbound::ReportingService, outbound::TimeEntryStore},
    EngineError, ValidationError,
};

use super::{aggregator, matrix::MatrixBuilder, Dimension};

/// Implementation of the ReportingService inbound port.
///
/// Stateless composition of the store query, the period calculator, the
/// aggregator and the matrix builder. Safe to invoke concurrently.
pub struct ReportingServiceImpl<E> {
    entries: Arc<E>,
}

impl<E> ReportingServiceImpl<E> {
    pub fn new(entries: Arc<E>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl<E: TimeEntryStore> ReportingService for ReportingServiceImpl<E> {
    async fn build_matrix(
        &self,
        filter: TimeEntryFilter,
        dimension: Dimension,
        granularity: Granularity,
        period_count: usize,
        reference: OffsetDateTime,
        include_totals: bool,
    ) -> Result<Matrix, EngineError> {
        if period_count == 0 {
            return Err(ValidationError::InvalidPeriodCount.into());
        }

        let periods = Period::last_n(reference, granularity, period_count);

        // Narrow the store query to the report window; the period interval
        // is half-open so this cannot double-fetch a boundary entry.
        let window_start = periods[0].start;
        let window_end = periods[periods.len() - 1].end;
        let filter = filter.with_date_range(window_start, window_end);

        let entries = self.entries.query(&filter).await?;
        let aggregate = aggregator::aggregate(&entries, dimension, granularity);

        // Rows are the dimension keys that actually occur, in stable order.
        // The builder zero-fills the periods each row did not touch.
        let rows: Vec<RowIdentity> = entries
            .iter()
            .map(|e| dimension.key_of(e))
            .sorted()
            .dedup()
            .map(|key| {
                let label = key.to_string();
                RowIdentity::new(key, label)
            })
            .collect();

        Ok(MatrixBuilder::build(&aggregate, rows, &periods, include_totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::InMemoryTimeEntryStore;
    use crate::domain::models::{BookingCodeId, NewTimeEntry, ServerId, UserId};
    use crate::domain::ports::outbound::TimeEntryStore as _;
    use time::macros::datetime;

    async fn seeded_store() -> Arc<InMemoryTimeEntryStore> {
        let store = Arc::new(InMemoryTimeEntryStore::new());
        for (user, minutes, date) in [
            ("alice", 30, datetime!(2025-03-01 09:00 UTC)),
            ("alice", 45, datetime!(2025-03-02 09:00 UTC)),
            ("bob", 60, datetime!(2025-04-13 09:00 UTC)),
        ] {
            store
                .insert(NewTimeEntry {
                    server_id: ServerId::new("srv-01"),
                    booking_code_id: BookingCodeId::new(1),
                    user_id: UserId::new(user),
                    minutes,
                    note: None,
                    date,
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn builds_the_last_n_periods_report() {
        let svc = ReportingServiceImpl::new(seeded_store().await);

        let matrix = svc
            .build_matrix(
                TimeEntryFilter::default(),
                Dimension::Engineer,
                Granularity::Month,
                2,
                datetime!(2025-04-30 12:00 UTC),
                false,
            )
            .await
            .unwrap();

        let keys: Vec<_> = matrix.periods.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-03", "2025-04"]);
        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(matrix.grand_total.minutes, 135);
    }

    #[tokio::test]
    async fn entries_outside_the_window_are_excluded() {
        let store = seeded_store().await;
        store
            .insert(NewTimeEntry {
                server_id: ServerId::new("srv-01"),
                booking_code_id: BookingCodeId::new(1),
                user_id: UserId::new("carol"),
                minutes: 999,
                note: None,
                date: datetime!(2025-01-15 09:00 UTC),
            })
            .await
            .unwrap();
        let svc = ReportingServiceImpl::new(store);

        let matrix = svc
            .build_matrix(
                TimeEntryFilter::default(),
                Dimension::Engineer,
                Granularity::Month,
                2,
                datetime!(2025-04-30 12:00 UTC),
                false,
            )
            .await
            .unwrap();

        assert!(matrix.rows.iter().all(|r| r.key.as_str() != "carol"));
        assert_eq!(matrix.grand_total.minutes, 135);
    }

    #[tokio::test]
    async fn zero_period_count_is_rejected() {
        let svc = ReportingServiceImpl::new(seeded_store().await);

        let err = svc
            .build_matrix(
                TimeEntryFilter::default(),
                Dimension::Engineer,
                Granularity::Month,
                0,
                datetime!(2025-04-30 12:00 UTC),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::InvalidPeriodCount)
        ));
    }
}
