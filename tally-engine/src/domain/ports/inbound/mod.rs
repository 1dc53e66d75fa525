mod reporting;
mod time_logging;

pub use reporting::ReportingService;
pub use time_logging::TimeLoggingService;
