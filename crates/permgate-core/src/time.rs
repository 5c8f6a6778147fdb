//! Wall-clock helpers for cache timestamps.

use time::OffsetDateTime;

/// Current wall-clock time as epoch milliseconds.
///
/// Cached permission sets record this at population time; the value is for
/// observability only and never drives expiry.
#[must_use]
pub fn epoch_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
