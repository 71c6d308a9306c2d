use chrono::{Datelike, NaiveDateTime, Timelike};

pub const MINUTES_PER_YEAR: i64 = 525_600;
pub const MINUTES_PER_MONTH: i64 = 43_800;
pub const MINUTES_PER_DAY: i64 = 1_440;
pub const MINUTE_MS: u32 = 60_000;

/// Integer naming the local calendar minute of `now`.
///
/// Months are weighted as 43800 minutes and counted from zero, as browser
/// calendars report them. The weighting ignores month lengths and leap years;
/// the value only has to be unique per minute, and changing it would
/// desynchronise every client that still uses it.
pub fn epoch_minute(now: NaiveDateTime) -> i64 {
    now.year() as i64 * MINUTES_PER_YEAR
        + now.month0() as i64 * MINUTES_PER_MONTH
        + now.day() as i64 * MINUTES_PER_DAY
        + now.hour() as i64 * 60
        + now.minute() as i64
}

pub fn same_window(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    epoch_minute(a) == epoch_minute(b)
}

/// Delay before the next minute boundary, for re-arming the refresh timer.
pub fn millis_until_next_minute(now: NaiveDateTime) -> u32 {
    // chrono encodes a leap second as nanos >= 1e9
    let millis = (now.nanosecond() / 1_000_000).min(999);
    MINUTE_MS - (now.second() * 1_000 + millis)
}
