use std::sync::Arc;

use crate::domain::{
    models::NewTimeEntry, ports::outbound::BookingCodeStore, EngineError, ValidationError,
};

/// Pure gate in front of every time entry write. Rules run in order and the
/// first failure wins:
///
/// 1. minutes is a positive integer,
/// 2. the booking code exists, is enabled, and its validity window contains
///    the entry's work date (not "now" — the work happened on that date),
/// 3. server and user references are non-empty (existence is the storage
///    collaborator's concern, not re-checked here).
pub struct TimeEntryValidator<S> {
    codes: Arc<S>,
}

impl<S: BookingCodeStore> TimeEntryValidator<S> {
    pub fn new(codes: Arc<S>) -> Self {
        Self { codes }
    }

    pub async fn validate(&self, candidate: &NewTimeEntry) -> Result<(), EngineError> {
        if candidate.minutes <= 0 {
            return Err(ValidationError::NonPositiveMinutes.into());
        }

        let code = self
            .codes
            .get(candidate.booking_code_id)
            .await?
            .ok_or(ValidationError::UnknownBookingCode(candidate.booking_code_id))?;

        if !code.enabled {
            return Err(ValidationError::DisabledBookingCode { code: code.code }.into());
        }
        if !code.has_well_formed_window() {
            return Err(ValidationError::InvalidCodeWindow { code: code.code }.into());
        }
        if !code.contains(candidate.date) {
            return Err(ValidationError::DateOutsideValidity { code: code.code }.into());
        }

        if candidate.server_id.is_empty() {
            return Err(ValidationError::MissingServerReference.into());
        }
        if candidate.user_id.is_empty() {
            return Err(ValidationError::MissingUserReference.into());
        }

        Ok(())
    }
}

/// Convert the UI's free-text time input to integer minutes.
///
/// Accepts plain minutes (`90`), hour/minute tokens (`1h 30m`, `2h`, `45m`,
/// `1.5h`) and clock notation (`1:30`). Anything that does not resolve to a
/// whole number of minutes is rejected with the same `ValidationError` kind
/// the validator uses, so unparseable input propagates like any other rule
/// failure.
pub fn parse_duration_minutes(input: &str) -> Result<i32, ValidationError> {
    let unparseable = || ValidationError::UnparseableDuration(input.to_string());
    let trimmed = input.trim().to_lowercase();

    if trimmed.is_empty() {
        return Err(unparseable());
    }

    // Plain integer minutes.
    if let Ok(minutes) = trimmed.parse::<i32>() {
        return Ok(minutes);
    }

    // Clock notation, "1:30".
    if let Some((h, m)) = trimmed.split_once(':') {
        let hours: i32 = h.parse().map_err(|_| unparseable())?;
        let minutes: i32 = m.parse().map_err(|_| unparseable())?;
        if !(0..60).contains(&minutes) {
            return Err(unparseable());
        }
        return Ok(hours * 60 + minutes);
    }

    // Unit tokens, "1h 30m" / "1.5h" / "45m".
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let mut total_minutes = 0.0_f64;
    let mut number = String::new();
    let mut saw_unit = false;

    for c in compact.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'h' | 'm' => {
                let value: f64 = number.parse().map_err(|_| unparseable())?;
                total_minutes += if c == 'h' { value * 60.0 } else { value };
                number.clear();
                saw_unit = true;
            }
            _ => return Err(unparseable()),
        }
    }

    if !saw_unit || !number.is_empty() {
        return Err(unparseable());
    }
    // Fractional minutes are rejected, not rounded.
    if total_minutes.fract() != 0.0 || total_minutes > i32::MAX as f64 {
        return Err(unparseable());
    }

    Ok(total_minutes as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::InMemoryBookingCodeStore;
    use crate::domain::models::{
        BookingCode, BookingCodeGroup, BookingCodeId, GroupId, ServerId, UserId,
    };
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn store_with_code(enabled: bool) -> Arc<InMemoryBookingCodeStore> {
        Arc::new(
            InMemoryBookingCodeStore::new()
                .with_group(BookingCodeGroup {
                    id: GroupId::new(1),
                    name: "infra".to_string(),
                    description: String::new(),
                })
                .with_code(BookingCode {
                    id: BookingCodeId::new(1),
                    group_id: GroupId::new(1),
                    code: "OPS-1".to_string(),
                    description: String::new(),
                    valid_from: datetime!(2025-01-01 00:00 UTC),
                    valid_to: datetime!(2025-06-30 23:59:59 UTC),
                    enabled,
                }),
        )
    }

    fn candidate(minutes: i32, date: OffsetDateTime) -> NewTimeEntry {
        NewTimeEntry {
            server_id: ServerId::new("srv-01"),
            booking_code_id: BookingCodeId::new(1),
            user_id: UserId::new("alice"),
            minutes,
            note: None,
            date,
        }
    }

    #[tokio::test]
    async fn accepts_a_valid_entry() {
        let v = TimeEntryValidator::new(store_with_code(true));
        let result = v.validate(&candidate(30, datetime!(2025-03-01 09:00 UTC))).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_zero_and_negative_minutes() {
        let v = TimeEntryValidator::new(store_with_code(true));

        for minutes in [0, -5] {
            let err = v
                .validate(&candidate(minutes, datetime!(2025-03-01 09:00 UTC)))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                EngineError::Validation(ValidationError::NonPositiveMinutes)
            ));
        }
    }

    #[tokio::test]
    async fn minutes_rule_wins_over_code_rules() {
        let v = TimeEntryValidator::new(store_with_code(false));

        let err = v
            .validate(&candidate(0, datetime!(2025-03-01 09:00 UTC)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::NonPositiveMinutes)
        ));
    }

    #[tokio::test]
    async fn rejects_entry_dated_before_the_window() {
        let v = TimeEntryValidator::new(store_with_code(true));

        let err = v
            .validate(&candidate(30, datetime!(2024-12-31 09:00 UTC)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::DateOutsideValidity { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_entry_dated_after_the_window_even_if_code_is_current() {
        let v = TimeEntryValidator::new(store_with_code(true));

        // Work date is what counts, not whether the code is active "now".
        let err = v
            .validate(&candidate(30, datetime!(2025-07-01 09:00 UTC)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::DateOutsideValidity { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_disabled_code() {
        let v = TimeEntryValidator::new(store_with_code(false));

        let err = v
            .validate(&candidate(30, datetime!(2025-03-01 09:00 UTC)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::DisabledBookingCode { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_code() {
        let v = TimeEntryValidator::new(store_with_code(true));
        let mut entry = candidate(30, datetime!(2025-03-01 09:00 UTC));
        entry.booking_code_id = BookingCodeId::new(99);

        let err = v.validate(&entry).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::UnknownBookingCode(_))
        ));
    }

    #[tokio::test]
    async fn rejects_empty_references() {
        let v = TimeEntryValidator::new(store_with_code(true));

        let mut entry = candidate(30, datetime!(2025-03-01 09:00 UTC));
        entry.server_id = ServerId::new("");
        let err = v.validate(&entry).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::MissingServerReference)
        ));

        let mut entry = candidate(30, datetime!(2025-03-01 09:00 UTC));
        entry.user_id = UserId::new("");
        let err = v.validate(&entry).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::MissingUserReference)
        ));
    }

    #[test]
    fn parses_common_duration_forms() {
        assert_eq!(parse_duration_minutes("90").unwrap(), 90);
        assert_eq!(parse_duration_minutes("1h 30m").unwrap(), 90);
        assert_eq!(parse_duration_minutes("1h30m").unwrap(), 90);
        assert_eq!(parse_duration_minutes("2h").unwrap(), 120);
        assert_eq!(parse_duration_minutes("45m").unwrap(), 45);
        assert_eq!(parse_duration_minutes("1.5h").unwrap(), 90);
        assert_eq!(parse_duration_minutes("1:30").unwrap(), 90);
    }

    #[test]
    fn rejects_unparseable_durations() {
        for input in ["", "abc", "1x", "1h xyz", "0.5m", "1:75"] {
            assert!(matches!(
                parse_duration_minutes(input),
                Err(ValidationError::UnparseableDuration(_))
            ));
        }
    }
}
