/// Returns the current Unix timestamp in milliseconds.
pub fn current_unix_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}

/// Parses an RFC 3339 timestamp into Unix milliseconds.
pub fn parse_rfc3339_to_unix_ms(raw: &str) -> Option<u64> {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw).ok()?;
    u64::try_from(parsed.timestamp_millis()).ok()
}

/// Whole hours elapsed between a creation instant and now, clamped at zero.
pub fn age_hours(created_unix_ms: u64, now_unix_ms: u64) -> u64 {
    now_unix_ms.saturating_sub(created_unix_ms) / 3_600_000
}

#[cfg(test)]
mod tests {
    use super::{age_hours, current_unix_timestamp_ms, parse_rfc3339_to_unix_ms};

    #[test]
    fn unit_parse_rfc3339_to_unix_ms_handles_valid_and_invalid_values() {
        assert_eq!(
            parse_rfc3339_to_unix_ms("1970-01-01T00:00:01Z"),
            Some(1_000)
        );
        assert_eq!(parse_rfc3339_to_unix_ms("not-a-timestamp"), None);
    }

    #[test]
    fn unit_age_hours_rounds_down_and_clamps_future_timestamps() {
        let created = 0;
        assert_eq!(age_hours(created, 3_599_999), 0);
        assert_eq!(age_hours(created, 3_600_000), 1);
        assert_eq!(age_hours(created, 90_000_000), 25);
        assert_eq!(age_hours(10_000, 5_000), 0);
    }

    #[test]
    fn functional_current_unix_timestamp_ms_is_monotonic_enough() {
        let first = current_unix_timestamp_ms();
        let second = current_unix_timestamp_ms();
        assert!(second >= first);
    }
}
