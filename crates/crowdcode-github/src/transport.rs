use std::time::Duration;

/// Returns true for GitHub status codes worth retrying.
pub fn is_retryable_github_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Returns true for transport-level failures worth retrying.
pub fn is_retryable_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Parses a `Retry-After` seconds value from response headers.
pub fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    let raw = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?;
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Backoff delay for the given attempt, preferring server guidance.
pub fn retry_delay(base_delay_ms: u64, attempt: usize, retry_after: Option<Duration>) -> Duration {
    if let Some(after) = retry_after {
        return after;
    }
    let exponent = u32::try_from(attempt.saturating_sub(1).min(6)).unwrap_or(6);
    Duration::from_millis(base_delay_ms.max(1).saturating_mul(1_u64 << exponent))
}

/// Truncates response bodies embedded in error messages.
pub fn truncate_for_error(raw: &str, max_chars: usize) -> String {
    if raw.chars().count() <= max_chars {
        return raw.to_string();
    }
    let truncated: String = raw.chars().take(max_chars).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{is_retryable_github_status, parse_retry_after, retry_delay, truncate_for_error};

    #[test]
    fn unit_is_retryable_github_status_covers_rate_limit_and_server_errors() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_github_status(status));
        }
        for status in [200, 301, 401, 403, 404, 422] {
            assert!(!is_retryable_github_status(status));
        }
    }

    #[test]
    fn unit_retry_delay_doubles_per_attempt_and_prefers_retry_after() {
        assert_eq!(retry_delay(100, 1, None), Duration::from_millis(100));
        assert_eq!(retry_delay(100, 2, None), Duration::from_millis(200));
        assert_eq!(retry_delay(100, 4, None), Duration::from_millis(800));
        assert_eq!(
            retry_delay(100, 4, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
    }

    #[test]
    fn unit_parse_retry_after_reads_seconds_and_ignores_garbage() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::RETRY_AFTER, "3".parse().expect("header"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(3)));

        headers.insert(
            reqwest::header::RETRY_AFTER,
            "soon".parse().expect("header"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn regression_truncate_for_error_bounds_long_bodies() {
        assert_eq!(truncate_for_error("short", 10), "short");
        let truncated = truncate_for_error(&"x".repeat(900), 10);
        assert_eq!(truncated, format!("{}...", "x".repeat(10)));
    }
}
