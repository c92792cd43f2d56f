use chrono::DateTime;

/// Parses an RFC 3339 timestamp into Unix seconds.
///
/// Unparseable input maps to `0` (the Unix epoch) instead of failing.
pub fn rfc3339_to_unix_or_zero(value: &str) -> i64 {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.timestamp())
        .unwrap_or(0)
}
