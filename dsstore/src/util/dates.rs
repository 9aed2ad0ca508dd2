/*!
 Contains date parsing functions for `dutc` timestamps.
*/

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// `dutc` values count 1/65536 second ticks
pub const TIMESTAMP_FACTOR: u64 = 65536;

/// Get the date of the `dutc` epoch, `1904-01-01 00:00:00`
fn get_offset() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1904, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Create a date from a `dutc` timestamp
///
/// Returns [`None`] if the timestamp is too large to represent.
///
/// # Example:
///
/// ```
/// use dsstore::util::dates::get_date;
///
/// let date = get_date(3_600 * 65536).unwrap();
/// assert_eq!(date.to_string(), "1904-01-01 01:00:00");
/// ```
pub fn get_date(dutc: u64) -> Option<NaiveDateTime> {
    let seconds = i64::try_from(dutc / TIMESTAMP_FACTOR).ok()?;
    let nanos = ((dutc % TIMESTAMP_FACTOR) * 1_000_000_000 / TIMESTAMP_FACTOR) as i64;
    get_offset()?
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)?
        .checked_add_signed(TimeDelta::nanoseconds(nanos))
}

/// Format a date the way Finder displays it, i.e. `May 8, 2019 at 3:04 PM`
pub fn format(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y at %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use crate::util::dates::{format, get_date, TIMESTAMP_FACTOR};

    #[test]
    fn can_get_epoch() {
        let date = get_date(0).unwrap();
        assert_eq!(format(&date), "January 1, 1904 at 12:00 AM");
    }

    #[test]
    fn can_get_date() {
        // 2019-05-08 15:04:00 is 3640172640 seconds after 1904-01-01
        let date = get_date(3_640_172_640 * TIMESTAMP_FACTOR).unwrap();
        assert_eq!(format(&date), "May 8, 2019 at 3:04 PM");
    }

    #[test]
    fn can_keep_fractional_seconds() {
        let date = get_date(TIMESTAMP_FACTOR / 2).unwrap();
        assert_eq!(date.to_string(), "1904-01-01 00:00:00.500");
    }

    #[test]
    fn cant_get_huge_date() {
        assert!(get_date(u64::MAX).is_none());
    }
}
