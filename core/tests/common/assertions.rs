// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use atelier_core::Occurrence;
use jiff::Zoned;
use jiff::civil::Date;

/// Asserts that occurrences are sorted by start instant.
///
/// # Panics
///
/// Panics if an adjacent pair is out of order.
pub fn assert_sorted(occurrences: &[Occurrence]) {
    for pair in occurrences.windows(2) {
        assert!(
            pair[0].start.timestamp() <= pair[1].start.timestamp(),
            "occurrences out of order: {} after {}",
            pair[0].start,
            pair[1].start
        );
    }
}

/// Asserts that every occurrence is dated within `[from, to]`.
///
/// # Panics
///
/// Panics if an occurrence falls outside the window.
pub fn assert_window(occurrences: &[Occurrence], from: Date, to: Date) {
    for o in occurrences {
        assert!(
            (from..=to).contains(&o.date),
            "occurrence {} on {} outside [{from}, {to}]",
            o.id,
            o.date
        );
    }
}

/// Asserts a zoned timestamp's local date and wall-clock time.
///
/// # Panics
///
/// Panics if the local date or the hour/minute differ.
///
/// # Example
///
/// ```ignore
/// assert_zoned(&occurrence.start, date(2025, 6, 3), 18, 0);
/// ```
pub fn assert_zoned(zoned: &Zoned, date: Date, hour: i8, minute: i8) {
    assert_eq!(zoned.date(), date, "date mismatch for {zoned}");
    assert_eq!(
        (zoned.hour(), zoned.minute(), zoned.second()),
        (hour, minute, 0),
        "time mismatch for {zoned}"
    );
}
