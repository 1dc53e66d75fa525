use std::sync::Arc;

use tally_engine::adapters::in_memory::{InMemoryBookingCodeStore, InMemoryTimeEntryStore};
use tally_engine::domain::services::{
    BookingCodeResolver, ReportingServiceImpl, TimeLoggingServiceImpl,
};

use crate::config::{ReportingSettings, Settings};

/// Shared state for all handlers.
///
/// The bundled wiring uses the in-memory stores; a deployment swaps in
/// adapters over its real storage at this seam. The engine services
/// themselves are stateless and safe to share.
#[derive(Clone)]
pub struct AppState {
    pub booking_codes: Arc<InMemoryBookingCodeStore>,
    pub resolver: Arc<BookingCodeResolver<InMemoryBookingCodeStore>>,
    pub time_logging:
        Arc<TimeLoggingServiceImpl<InMemoryTimeEntryStore, InMemoryBookingCodeStore>>,
    pub reporting: Arc<ReportingServiceImpl<InMemoryTimeEntryStore>>,
    pub reporting_defaults: ReportingSettings,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let booking_codes = Arc::new(InMemoryBookingCodeStore::new());
        let time_entries = Arc::new(InMemoryTimeEntryStore::new());

        Self {
            resolver: Arc::new(BookingCodeResolver::new(Arc::clone(&booking_codes))),
            time_logging: Arc::new(TimeLoggingServiceImpl::new(
                Arc::clone(&time_entries),
                Arc::clone(&booking_codes),
            )),
            reporting: Arc::new(ReportingServiceImpl::new(time_entries)),
            booking_codes,
            reporting_defaults: settings.reporting.clone(),
        }
    }
}
