//! The orphan classifier: pure predicates over resource metadata.
//!
//! A resource is a finding iff its name carries the marker, it is strictly
//! older than the age cutoff, and (for Lambdas) its recent invocation sum is
//! at or below the invocation threshold. No I/O happens here; the discovery
//! loop fetches metadata and owns per-region/per-kind error isolation.

use std::borrow::Cow;

use anyhow::{Context, Result};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Case-insensitive marker test. A name without the marker is never a
/// candidate, regardless of age.
pub fn name_has_marker(name: &str, marker: &str) -> bool {
    name.to_lowercase().contains(&marker.to_lowercase())
}

/// Strictly older than `now - age_days`. A timestamp equal to the cutoff is
/// NOT old, so `age_days = 0` never matches a resource created at `now`.
pub fn is_older_than(ts: OffsetDateTime, age_days: u64, now: OffsetDateTime) -> bool {
    let Ok(days) = i64::try_from(age_days) else {
        return false;
    };
    match now.checked_sub(Duration::days(days)) {
        Some(cutoff) => ts < cutoff,
        None => false,
    }
}

/// Activity predicate for Lambdas. `None` means the metrics query failed, and
/// a function with no data is never classified as orphaned (fail-closed).
pub fn lambda_is_idle(summed_invocations: Option<f64>, invoke_threshold: u64) -> bool {
    match summed_invocations {
        Some(sum) => sum <= invoke_threshold as f64,
        None => false,
    }
}

/// Parses the timestamp representations the provider hands back: RFC 3339
/// with a trailing `Z` or `+00:00` offset, and Lambda's `+0000`-style offset
/// without a colon. All normalize to the same comparable instant.
pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime> {
    let raw = raw.trim();
    OffsetDateTime::parse(&normalize_offset(raw), &Rfc3339)
        .with_context(|| format!("unrecognized timestamp: {raw}"))
}

fn normalize_offset(raw: &str) -> Cow<'_, str> {
    if raw.is_ascii() && raw.len() > 5 {
        let tail = &raw[raw.len() - 5..];
        if (tail.starts_with('+') || tail.starts_with('-'))
            && tail[1..].bytes().all(|b| b.is_ascii_digit())
        {
            let (head, minutes) = raw.split_at(raw.len() - 2);
            return Cow::Owned(format!("{head}:{minutes}"));
        }
    }
    Cow::Borrowed(raw)
}

/// The marker and age predicates bundled for a single discovery run.
#[derive(Debug, Clone)]
pub struct OrphanCheck {
    pub marker: String,
    pub age_days: u64,
    pub now: OffsetDateTime,
}

impl OrphanCheck {
    pub fn matches(&self, name: &str, created: OffsetDateTime) -> bool {
        name_has_marker(name, &self.marker) && is_older_than(created, self.age_days, self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-06-01 12:00:00 UTC);

    #[test]
    fn marker_is_case_insensitive_both_ways() {
        assert!(name_has_marker("my-Serverless-app", "serverless"));
        assert!(name_has_marker("MY-SERVERLESS-APP", "serverless"));
        assert!(name_has_marker("my-serverless-app", "SERVERLESS"));
        assert!(!name_has_marker("my-container-app", "serverless"));
        assert!(!name_has_marker("", "serverless"));
    }

    #[test]
    fn age_boundary_is_exclusive() {
        let cutoff = NOW - Duration::days(90);
        assert!(!is_older_than(cutoff, 90, NOW));
        assert!(is_older_than(cutoff - Duration::seconds(1), 90, NOW));
        assert!(!is_older_than(cutoff + Duration::seconds(1), 90, NOW));
    }

    #[test]
    fn zero_age_threshold_never_matches_a_fresh_resource() {
        assert!(!is_older_than(NOW, 0, NOW));
        assert!(is_older_than(NOW - Duration::seconds(1), 0, NOW));
    }

    #[test]
    fn absurd_age_threshold_matches_nothing() {
        assert!(!is_older_than(NOW - Duration::days(1), u64::MAX, NOW));
    }

    #[test]
    fn metrics_failure_is_fail_closed() {
        assert!(!lambda_is_idle(None, 0));
        assert!(!lambda_is_idle(None, u64::MAX));
    }

    #[test]
    fn idle_threshold_is_inclusive() {
        assert!(lambda_is_idle(Some(0.0), 0));
        assert!(lambda_is_idle(Some(5.0), 5));
        assert!(!lambda_is_idle(Some(5.1), 5));
    }

    #[test]
    fn parses_trailing_z() {
        let ts = parse_timestamp("2026-02-01T00:00:00Z").unwrap();
        assert_eq!(ts, datetime!(2026-02-01 00:00:00 UTC));
    }

    #[test]
    fn offset_variants_agree() {
        let z = parse_timestamp("2019-08-24T18:23:44.123Z").unwrap();
        let colon = parse_timestamp("2019-08-24T18:23:44.123+00:00").unwrap();
        let lambda_style = parse_timestamp("2019-08-24T18:23:44.123+0000").unwrap();
        assert_eq!(z, colon);
        assert_eq!(z, lambda_style);
    }

    #[test]
    fn non_utc_offset_without_colon_normalizes() {
        let ts = parse_timestamp("2026-01-01T09:00:00+0530").unwrap();
        assert_eq!(ts, datetime!(2026-01-01 03:30:00 UTC));
    }

    #[test]
    fn garbage_timestamp_is_an_error() {
        assert!(parse_timestamp("not-a-date").is_err());
        assert!(parse_timestamp("").is_err());
    }

    // A function named my-serverless-app-dev, last modified 120 days ago,
    // age threshold 90, invocation sum 0 against threshold 0: included.
    #[test]
    fn idle_old_marked_function_is_a_finding() {
        let check = OrphanCheck {
            marker: "serverless".to_string(),
            age_days: 90,
            now: NOW,
        };
        let modified = NOW - Duration::days(120);
        assert!(check.matches("my-serverless-app-dev", modified));
        assert!(lambda_is_idle(Some(0.0), 0));
    }

    #[test]
    fn marker_miss_excludes_regardless_of_age() {
        let check = OrphanCheck {
            marker: "serverless".to_string(),
            age_days: 90,
            now: NOW,
        };
        assert!(!check.matches("ancient-stack", NOW - Duration::days(3650)));
    }
}
