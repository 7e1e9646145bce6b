//! Countdown to the next local midnight.
//!
//! The daily reset boundary is local midnight: once a hold is completed, a
//! new one becomes available when the calendar day changes in the user's
//! timezone. This module derives everything from wall-clock time and holds
//! no state, so it is safe to recompute once a second for the lifetime of
//! whatever view displays it.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Free-running midnight countdown, independent of session state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyResetClock;

impl DailyResetClock {
    pub fn new() -> Self {
        Self
    }

    /// `HH:MM:SS` (zero-padded) until the next local midnight.
    pub fn countdown(&self) -> String {
        countdown_at(Local::now())
    }
}

/// Seconds until the next local midnight, computed against `now`.
///
/// Works on naive local time so the result matches the wall clock the user
/// sees. One second before midnight this is 1; one second after, 86399.
pub fn seconds_until_reset(now: DateTime<Local>) -> i64 {
    let today = now.date_naive();
    let Some(tomorrow) = today.succ_opt() else {
        return 0; // Calendar overflow, out of chrono's date range.
    };
    let Some(next_midnight) = tomorrow.and_hms_opt(0, 0, 0) else {
        return 0;
    };
    (next_midnight - now.naive_local()).num_seconds().max(0)
}

/// Format the countdown for a given instant as `HH:MM:SS`.
pub fn countdown_at(now: DateTime<Local>) -> String {
    let total = seconds_until_reset(now);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Calendar-day comparison in the local timezone.
///
/// This is the daily gate: a completion at 23:59 does not satisfy a session
/// initialized at 00:01 the next day, however few hours have elapsed.
pub fn is_same_local_day(a: DateTime<Utc>, b: DateTime<Local>) -> bool {
    a.with_timezone(&Local).date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn one_second_before_midnight() {
        assert_eq!(countdown_at(local(2026, 3, 14, 23, 59, 59)), "00:00:01");
    }

    #[test]
    fn one_second_after_midnight_wraps_to_next_day() {
        assert_eq!(countdown_at(local(2026, 3, 15, 0, 0, 1)), "23:59:59");
    }

    #[test]
    fn midday_countdown() {
        assert_eq!(countdown_at(local(2026, 3, 14, 12, 0, 0)), "12:00:00");
    }

    #[test]
    fn components_are_zero_padded() {
        assert_eq!(countdown_at(local(2026, 3, 14, 22, 55, 51)), "01:04:09");
    }

    #[test]
    fn same_day_matches_across_timezones() {
        let noon = local(2026, 3, 14, 12, 0, 0);
        assert!(is_same_local_day(noon.with_timezone(&Utc), noon));
    }

    #[test]
    fn prior_day_does_not_match() {
        let late = local(2026, 3, 14, 23, 59, 0);
        let next_morning = local(2026, 3, 15, 0, 1, 0);
        assert!(!is_same_local_day(late.with_timezone(&Utc), next_morning));
    }
}
