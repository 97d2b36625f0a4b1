// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::Zoned;
use jiff::civil::Date;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Parses a calendar date, `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<Date, String> {
    s.trim()
        .parse()
        .map_err(|e| format!("Invalid date `{s}`, expected YYYY-MM-DD: {e}"))
}

/// Resolves a possibly open-ended window: a missing bound is one week away from the other,
/// and a missing window is `default`.
pub fn resolve_window(
    from: Option<Date>,
    to: Option<Date>,
    default: (Date, Date),
) -> Result<(Date, Date), String> {
    let (from, to) = match (from, to) {
        (Some(from), Some(to)) => (from, to),
        (Some(from), None) => (from, from.saturating_add(6.days())),
        (None, Some(to)) => (to.saturating_sub(6.days()), to),
        (None, None) => default,
    };

    if from > to {
        return Err(format!("Invalid window: {from} is after {to}"));
    }
    Ok((from, to))
}

/// Formats a session as `HH:MM~HH:MM`, appending the end date when it differs.
pub fn format_time_range(start: &Zoned, end: &Zoned) -> String {
    if start.date() == end.date() {
        format!("{}~{}", start.strftime("%H:%M"), end.strftime("%H:%M"))
    } else {
        format!(
            "{}~{}",
            start.strftime("%H:%M"),
            end.strftime("%Y-%m-%d %H:%M")
        )
    }
}
