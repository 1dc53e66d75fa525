mod booking_code;
mod ids;
mod matrix;
mod period;
mod time_entry;

pub use booking_code::*;
pub use ids::*;
pub use matrix::*;
pub use period::*;
pub use time_entry::*;
