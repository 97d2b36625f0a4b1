// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Date;

use crate::recurrence::Weekday;

/// Resolves the `ordinal`-th `weekday` of a month.
///
/// - `ordinal > 0`: the first matching day of the month advanced by `ordinal - 1` weeks.
///   The result is NOT clamped to the month, so a 5th Monday in a month with four Mondays
///   lands in the following month; callers decide whether that counts.
/// - `ordinal == -1`: walks back from the last day of the month to the matching weekday.
///
/// Returns `None` for the unsupported ordinals (`0`, `-2` and below) and for dates outside
/// the representable range.
pub fn nth_weekday_of_month(year: i16, month: i8, weekday: Weekday, ordinal: i8) -> Option<Date> {
    let first = Date::new(year, month, 1).ok()?;
    let target = weekday.sunday_zero_offset();

    match ordinal {
        1.. => {
            let lead = (target - first.weekday().to_sunday_zero_offset()).rem_euclid(7);
            let days = i32::from(lead) + 7 * (i32::from(ordinal) - 1);
            first.checked_add(days.days()).ok()
        }
        -1 => {
            let last = first.last_of_month();
            let back = (last.weekday().to_sunday_zero_offset() - target).rem_euclid(7);
            last.checked_sub(i32::from(back).days()).ok()
        }
        _ => None,
    }
}
