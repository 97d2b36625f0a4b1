// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use atelier_core::{Config, Rule, RuleDraft, Weekday};
use jiff::civil::Date;
use jiff::tz::TimeZone;

/// The zone most fixtures are anchored in.
///
/// # Panics
///
/// Panics if the bundled time zone database lacks `Europe/Berlin`.
#[must_use]
pub fn berlin() -> TimeZone {
    TimeZone::get("Europe/Berlin").expect("Europe/Berlin should be available")
}

/// Creates a test configuration pinned to `Europe/Berlin`.
#[must_use]
pub fn test_config() -> Config {
    Config {
        timezone: Some("Europe/Berlin".to_string()),
        week_start: Weekday::Monday,
        coalesce: true,
    }
}

/// Creates an active weekly rule.
///
/// # Example
///
/// ```ignore
/// let rule = weekly_rule("r1", "w1", "TU", "18:00", 60, Some(date(2025, 1, 1)));
/// ```
#[must_use]
pub fn weekly_rule(
    id: &str,
    workshop_id: &str,
    byday: &str,
    start_time: &str,
    duration_minutes: u32,
    effective_from: Option<Date>,
) -> Rule {
    let mut draft = RuleDraft::new(
        workshop_id,
        "Studio A",
        start_time,
        duration_minutes,
        format!("FREQ=WEEKLY;BYDAY={byday}"),
    );
    draft.effective_from = effective_from;
    Rule::new(id, draft)
}

/// Creates an active monthly rule with an optional `BYSETPOS`.
#[must_use]
pub fn monthly_rule(id: &str, byday: &str, ordinal: Option<i8>, start_time: &str) -> Rule {
    let rrule = match ordinal {
        Some(n) => format!("FREQ=MONTHLY;BYDAY={byday};BYSETPOS={n}"),
        None => format!("FREQ=MONTHLY;BYDAY={byday}"),
    };
    Rule::new(id, RuleDraft::new("w1", "Studio B", start_time, 90, rrule))
}
