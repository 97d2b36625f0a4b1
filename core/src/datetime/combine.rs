// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Zoned};

use crate::datetime::TimeOfDay;

/// Anchors a calendar date and local time of day in the given zone.
///
/// Wall-clock times skipped or repeated by a DST transition are resolved with jiff's
/// `compatible` strategy: gaps move forward, folds take the earlier instant.
pub fn combine(date: Date, time: TimeOfDay, tz: &TimeZone) -> Result<Zoned, jiff::Error> {
    date.to_datetime(time.civil()).to_zoned(tz.clone())
}

/// Adds an exact number of minutes; crossing midnight simply moves to the next day.
pub fn add_minutes(start: &Zoned, minutes: u32) -> Result<Zoned, jiff::Error> {
    start.checked_add(SignedDuration::from_mins(i64::from(minutes)))
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};

    use super::*;

    #[test]
    fn combines_in_zone() {
        let tz = TimeZone::get("Europe/Berlin").unwrap();
        let time = TimeOfDay::new(18, 0).unwrap();
        let start = combine(date(2025, 6, 3), time, &tz).unwrap();
        assert_eq!(start.datetime(), datetime(2025, 6, 3, 18, 0, 0, 0));
        assert_eq!(start.time_zone().iana_name(), Some("Europe/Berlin"));
        assert_eq!(start.offset().seconds(), 2 * 3600);
    }

    #[test]
    fn end_crosses_midnight() {
        let time = TimeOfDay::new(23, 30).unwrap();
        let start = combine(date(2025, 6, 3), time, &TimeZone::UTC).unwrap();
        let end = add_minutes(&start, 90).unwrap();
        assert_eq!(end.datetime(), datetime(2025, 6, 4, 1, 0, 0, 0));
    }

    #[test]
    fn duration_is_exact_across_dst() {
        let tz = TimeZone::get("Europe/Berlin").unwrap();
        // clocks go forward at 02:00 on 2025-03-30
        let start = combine(date(2025, 3, 30), TimeOfDay::new(1, 0).unwrap(), &tz).unwrap();
        let end = add_minutes(&start, 120).unwrap();
        assert_eq!(end.datetime(), datetime(2025, 3, 30, 4, 0, 0, 0));
        assert_eq!(
            end.timestamp().as_second() - start.timestamp().as_second(),
            7200
        );
    }

    #[test]
    fn skipped_time_moves_forward() {
        let tz = TimeZone::get("Europe/Berlin").unwrap();
        let start = combine(date(2025, 3, 30), TimeOfDay::new(2, 30).unwrap(), &tz).unwrap();
        assert_eq!(start.datetime(), datetime(2025, 3, 30, 3, 30, 0, 0));
    }
}
