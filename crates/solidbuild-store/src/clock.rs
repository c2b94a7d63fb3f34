//! Wall-clock abstraction so completion timestamps stay testable.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of ISO-8601 UTC timestamps for completion records.
pub trait Clock {
    fn now_iso8601(&self) -> String;
}

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso8601(&self) -> String {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        iso8601_from_unix(secs)
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_iso8601(&self) -> String {
        self.0.clone()
    }
}

/// Format unix seconds as `YYYY-MM-DDThh:mm:ssZ`.
///
/// Civil-date conversion follows the days-from-civil inverse (Hinnant); valid
/// for the entire u64 range we can encounter.
fn iso8601_from_unix(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };

    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
}
