mod aggregator;
mod matrix;
mod reporting;
mod resolver;
mod time_logging;
mod validator;

pub use aggregator::{aggregate, aggregate_by, AggregateMap, Dimension};
pub use matrix::MatrixBuilder;
pub use reporting::ReportingServiceImpl;
pub use resolver::BookingCodeResolver;
pub use time_logging::TimeLoggingServiceImpl;
pub use validator::{parse_duration_minutes, TimeEntryValidator};
