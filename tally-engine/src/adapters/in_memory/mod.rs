mod booking_codes;
mod time_entries;

pub use booking_codes::InMemoryBookingCodeStore;
pub use time_entries::InMemoryTimeEntryStore;
