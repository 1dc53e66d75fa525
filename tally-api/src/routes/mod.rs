pub(crate) mod booking_codes;
pub(crate) mod error;
pub(crate) mod reports;
pub(crate) mod time_entries;

pub(crate) use error::ApiError;

/// Parse an RFC 3339 instant, e.g. `2025-04-13T09:00:00Z`.
pub(crate) fn parse_instant(s: &str) -> Result<time::OffsetDateTime, ApiError> {
    time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
        .map_err(|_| ApiError::bad_request(format!("could not parse instant: {}", s)))
}

/// Parse a plain calendar date, e.g. `2025-04-13`.
pub(crate) fn parse_date(s: &str) -> Result<time::Date, ApiError> {
    let format = time::format_description::parse("[year]-[month]-[day]").unwrap();
    time::Date::parse(s, &format)
        .map_err(|_| ApiError::bad_request(format!("could not parse date: {}", s)))
}
