// timestamp.rs — Long-format timestamp rendering
//
// Recent timestamps print "Mon day HH:MM"; anything at or older than six
// months prints "Mon day  Year" instead.

use chrono::{Local, TimeZone};

/// Six months of seconds, using the historical 30-day month ls uses.
pub const SIX_MONTHS_SECS: i64 = 6 * 30 * 24 * 60 * 60;

const RECENT_FORMAT: &str = "%b %e %H:%M";
const OLD_FORMAT: &str = "%b %e  %Y";

/// Format a timestamp for the long-format column.
///
/// `now` is the reference time in Unix seconds. Returns None when the
/// timestamp cannot be represented in local time; the caller reports the
/// failure and leaves the field empty.
pub fn format_timestamp(secs: i64, now: i64) -> Option<String> {
    let dt = Local.timestamp_opt(secs, 0).single()?;
    // exactly at the boundary counts as old
    let recent = secs > now - SIX_MONTHS_SECS;
    let fmt = if recent { RECENT_FORMAT } else { OLD_FORMAT };
    Some(dt.format(fmt).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn recent_timestamp_has_clock_time() {
        let s = format_timestamp(NOW - 3600, NOW).unwrap();
        assert!(s.contains(':'), "expected HH:MM in {:?}", s);
    }

    #[test]
    fn old_timestamp_has_year() {
        let old = NOW - SIX_MONTHS_SECS - 1;
        let s = format_timestamp(old, NOW).unwrap();
        let year = Local.timestamp_opt(old, 0).single().unwrap().year();
        assert!(s.contains(&year.to_string()), "expected year in {:?}", s);
        assert!(!s.contains(':'));
    }

    #[test]
    fn boundary_exactly_six_months_uses_year_form() {
        let boundary = NOW - SIX_MONTHS_SECS;
        let s = format_timestamp(boundary, NOW).unwrap();
        assert!(!s.contains(':'), "boundary must render year form, got {:?}", s);
    }

    #[test]
    fn one_second_inside_window_uses_clock_form() {
        let s = format_timestamp(NOW - SIX_MONTHS_SECS + 1, NOW).unwrap();
        assert!(s.contains(':'));
    }

    #[test]
    fn unrepresentable_timestamp_is_none() {
        assert!(format_timestamp(i64::MAX, NOW).is_none());
    }
}
