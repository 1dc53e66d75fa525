//! End-to-end flow against the in-memory stores: resolve a code, log
//! entries through validation, and build the report matrix.

use std::sync::Arc;

use time::macros::datetime;
use time::OffsetDateTime;

use tally_engine::adapters::in_memory::{InMemoryBookingCodeStore, InMemoryTimeEntryStore};
use tally_engine::domain::models::{
    BookingCode, BookingCodeGroup, BookingCodeId, Granularity, GroupId, NewTimeEntry, ServerId,
    TimeEntryFilter, UserId,
};
use tally_engine::domain::ports::inbound::{ReportingService, TimeLoggingService};
use tally_engine::domain::services::{
    BookingCodeResolver, Dimension, ReportingServiceImpl, TimeLoggingServiceImpl,
};

fn code_store() -> Arc<InMemoryBookingCodeStore> {
    Arc::new(
        InMemoryBookingCodeStore::new()
            .with_group(BookingCodeGroup {
                id: GroupId::new(1),
                name: "infrastructure".to_string(),
                description: "Ops work on the server fleet".to_string(),
            })
            .with_codes(vec![
                BookingCode {
                    id: BookingCodeId::new(1),
                    group_id: GroupId::new(1),
                    code: "A".to_string(),
                    description: "H1".to_string(),
                    valid_from: datetime!(2025-01-01 00:00 UTC),
                    valid_to: datetime!(2025-06-30 23:59:59 UTC),
                    enabled: true,
                },
                BookingCode {
                    id: BookingCodeId::new(2),
                    group_id: GroupId::new(1),
                    code: "B".to_string(),
                    description: "H2".to_string(),
                    valid_from: datetime!(2025-07-01 00:00 UTC),
                    valid_to: datetime!(2025-12-31 23:59:59 UTC),
                    enabled: true,
                },
            ]),
    )
}

fn entry(code: BookingCodeId, user: &str, minutes: i32, date: OffsetDateTime) -> NewTimeEntry {
    NewTimeEntry {
        server_id: ServerId::new("srv-web-01"),
        booking_code_id: code,
        user_id: UserId::new(user),
        minutes,
        note: None,
        date,
    }
}

#[tokio::test]
async fn monthly_project_report_counts_every_entry_once() {
    let codes = code_store();
    let entries = Arc::new(InMemoryTimeEntryStore::new());

    let resolver = BookingCodeResolver::new(Arc::clone(&codes));
    let logging = TimeLoggingServiceImpl::new(Arc::clone(&entries), Arc::clone(&codes));
    let reporting = ReportingServiceImpl::new(Arc::clone(&entries));

    // Code A is the active code for all three work dates.
    for (minutes, date) in [
        (30, datetime!(2025-03-01 09:00 UTC)),
        (45, datetime!(2025-03-02 09:00 UTC)),
        (60, datetime!(2025-04-13 09:00 UTC)),
    ] {
        let active = resolver
            .resolve_active_code(GroupId::new(1), date)
            .await
            .unwrap()
            .expect("a code is active on the work date");
        assert_eq!(active.code, "A");

        logging
            .log_time(entry(active.id, "alice", minutes, date))
            .await
            .unwrap();
    }

    let matrix = reporting
        .build_matrix(
            TimeEntryFilter::default(),
            Dimension::Project,
            Granularity::Month,
            2,
            datetime!(2025-04-30 12:00 UTC),
            true,
        )
        .await
        .unwrap();

    let keys: Vec<_> = matrix.periods.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["2025-03", "2025-04"]);

    // March = 30 + 45, April = 60. The April 13 entry must land in April;
    // this is the boundary defect class the old report views suffered from.
    assert_eq!(matrix.column_totals[0].minutes, 75);
    assert_eq!(matrix.column_totals[1].minutes, 60);
    assert_eq!(matrix.grand_total.minutes, 135);
    assert_eq!(matrix.grand_total.hours, 2.3);

    // Synthetic total row appended last, flagged, equal to the column totals.
    let total_row = matrix.rows.last().unwrap();
    assert!(total_row.is_total);
    assert_eq!(matrix.cells.last().unwrap(), &matrix.column_totals);

    // Running the same report twice yields an identical matrix.
    let again = reporting
        .build_matrix(
            TimeEntryFilter::default(),
            Dimension::Project,
            Granularity::Month,
            2,
            datetime!(2025-04-30 12:00 UTC),
            true,
        )
        .await
        .unwrap();
    assert_eq!(matrix, again);
}

#[tokio::test]
async fn iso_week_boundary_entries_land_in_adjacent_weeks() {
    let codes = code_store();
    let entries = Arc::new(InMemoryTimeEntryStore::new());
    let logging = TimeLoggingServiceImpl::new(Arc::clone(&entries), Arc::clone(&codes));
    let reporting = ReportingServiceImpl::new(Arc::clone(&entries));

    // Last second of ISO week 15 and first second of week 16.
    logging
        .log_time(entry(
            BookingCodeId::new(1),
            "alice",
            10,
            datetime!(2025-04-13 23:59:59 UTC),
        ))
        .await
        .unwrap();
    logging
        .log_time(entry(
            BookingCodeId::new(1),
            "alice",
            20,
            datetime!(2025-04-14 00:00 UTC),
        ))
        .await
        .unwrap();

    let matrix = reporting
        .build_matrix(
            TimeEntryFilter::default(),
            Dimension::Engineer,
            Granularity::Week,
            2,
            datetime!(2025-04-15 12:00 UTC),
            false,
        )
        .await
        .unwrap();

    let keys: Vec<_> = matrix.periods.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["2025-W15", "2025-W16"]);

    // One entry per week, no double count, no gap.
    assert_eq!(matrix.column_totals[0].minutes, 10);
    assert_eq!(matrix.column_totals[1].minutes, 20);
    assert_eq!(matrix.grand_total.minutes, 30);
}

#[tokio::test]
async fn group_with_no_active_code_is_a_steady_state_not_an_error() {
    let codes = code_store();
    let resolver = BookingCodeResolver::new(codes);

    // Both windows have lapsed by this instant.
    let resolved = resolver
        .resolve_active_code(GroupId::new(1), datetime!(2026-02-01 00:00 UTC))
        .await
        .unwrap();
    assert!(resolved.is_none());
}
