/// Reading snapshot staleness detection.
///
/// Advisories are only as current as the snapshot they were derived from.
/// When the data source stops updating, the dashboard should show "data
/// unavailable" rather than advisories from an hour-old reading. This module
/// lets the presentation layer make that call; the evaluator never looks at
/// timestamps.
///
/// # Clock injection
/// All functions accept a `now: DateTime<Utc>` parameter rather than calling
/// `Utc::now()` internally, so staleness is deterministic in tests.

use chrono::{DateTime, Utc};

use crate::model::ReadingSnapshot;

/// Default freshness window used when the config does not set one.
pub const DEFAULT_MAX_AGE_MINUTES: u64 = 60;

/// Returns `true` if the snapshot was observed more than `max_age_minutes`
/// before `now`.
///
/// Staleness is strictly greater than the threshold:
///   age > max_age_minutes  →  stale
///   age == max_age_minutes →  not stale
///
/// Returns an error if `observed_at` is missing or cannot be parsed.
/// Callers should treat errors as stale.
pub fn is_stale_at(
    snapshot: &ReadingSnapshot,
    max_age_minutes: u64,
    now: DateTime<Utc>,
) -> Result<bool, String> {
    let raw = snapshot
        .observed_at
        .as_deref()
        .ok_or_else(|| "no observation timestamp".to_string())?;
    let observed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("invalid observation timestamp '{}': {}", raw, e))?
        .with_timezone(&Utc);

    // Readings stamped in the future count as zero minutes old.
    let age_minutes = (now - observed).num_minutes().max(0) as u64;
    Ok(age_minutes > max_age_minutes)
}

/// Convenience wrapper that uses the real current time.
/// Use `is_stale_at` in tests to keep them deterministic.
pub fn is_stale(snapshot: &ReadingSnapshot, max_age_minutes: u64) -> Result<bool, String> {
    is_stale_at(snapshot, max_age_minutes, Utc::now())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn observed_at(datetime: &str) -> ReadingSnapshot {
        ReadingSnapshot {
            observed_at: Some(datetime.to_string()),
            ..Default::default()
        }
    }

    /// A fixed "now" used across all tests: 2024-11-05 09:00:00 UTC.
    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 5, 9, 0, 0).unwrap()
    }

    // --- Not stale ----------------------------------------------------------

    #[test]
    fn test_recent_snapshot_is_not_stale() {
        let snapshot = observed_at("2024-11-05T08:50:00Z");
        let stale = is_stale_at(&snapshot, 60, fixed_now()).expect("valid timestamp");
        assert!(!stale, "10-minute-old snapshot should not be stale with 60-min threshold");
    }

    #[test]
    fn test_snapshot_exactly_at_threshold_is_not_stale() {
        let snapshot = observed_at("2024-11-05T08:00:00Z");
        let stale = is_stale_at(&snapshot, 60, fixed_now()).expect("valid timestamp");
        assert!(!stale, "age equal to the threshold is not stale (strictly greater than)");
    }

    #[test]
    fn test_offset_timestamp_is_converted_to_utc() {
        // 14:30 at +05:30 is 09:00 UTC, zero minutes old.
        let snapshot = observed_at("2024-11-05T14:30:00+05:30");
        let stale = is_stale_at(&snapshot, 15, fixed_now()).expect("offset timestamp should parse");
        assert!(!stale);
    }

    #[test]
    fn test_future_timestamp_is_not_stale() {
        let snapshot = observed_at("2024-11-05T09:30:00Z");
        assert_eq!(is_stale_at(&snapshot, 1, fixed_now()), Ok(false));
    }

    // --- Stale --------------------------------------------------------------

    #[test]
    fn test_snapshot_one_minute_past_threshold_is_stale() {
        let snapshot = observed_at("2024-11-05T07:59:00Z");
        let stale = is_stale_at(&snapshot, 60, fixed_now()).expect("valid timestamp");
        assert!(stale, "61-minute-old snapshot should be stale with 60-min threshold");
    }

    #[test]
    fn test_same_snapshot_stale_under_tight_threshold_not_under_loose() {
        let snapshot = observed_at("2024-11-05T08:30:00Z");
        assert_eq!(is_stale_at(&snapshot, 20, fixed_now()), Ok(true));
        assert_eq!(is_stale_at(&snapshot, 60, fixed_now()), Ok(false));
    }

    // --- Error handling -----------------------------------------------------

    #[test]
    fn test_missing_timestamp_returns_error() {
        let result = is_stale_at(&ReadingSnapshot::default(), 60, fixed_now());
        assert!(result.is_err(), "snapshot without observed_at should be an error");
    }

    #[test]
    fn test_invalid_timestamp_returns_error() {
        let result = is_stale_at(&observed_at("yesterday"), 60, fixed_now());
        assert!(result.is_err(), "unparseable timestamp should return Err, got {:?}", result);
    }
}
