mod booking_codes;
mod time_entries;

pub use booking_codes::BookingCodeStore;
pub use time_entries::TimeEntryStore;
