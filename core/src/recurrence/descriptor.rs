// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing and building of the constrained recurrence strings stored on rules.
//!
//! ```txt
//! recur = "FREQ=" ("WEEKLY" / "MONTHLY")
//!         [";BYDAY=" [ordinal] code *("," [ordinal] code)]
//!         [";BYSETPOS=" ordinal]
//! ```
//!
//! The parser is lenient: unknown parts, unknown weekday codes and malformed ordinals
//! are dropped instead of reported, so a legacy or corrupt rule still yields a descriptor.

use std::fmt::{self, Display};
use std::sync::OnceLock;

use regex::Regex;

use crate::recurrence::Weekday;

const KW_FREQ: &str = "FREQ";
const KW_BYDAY: &str = "BYDAY";
const KW_BYSETPOS: &str = "BYSETPOS";
const KW_WEEKLY: &str = "WEEKLY";
const KW_MONTHLY: &str = "MONTHLY";

/// How often a rule repeats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Frequency {
    /// Every week, on each listed weekday.
    #[default]
    Weekly,

    /// Every month, on the listed weekdays selected by the ordinal.
    Monthly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Weekly => f.write_str(KW_WEEKLY),
            Frequency::Monthly => f.write_str(KW_MONTHLY),
        }
    }
}

/// The structured form of a rule's repeat pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecurrenceDescriptor {
    /// Repeat frequency.
    pub frequency: Frequency,

    /// Weekdays the rule fires on, in the order they were written.
    pub weekdays: Vec<Weekday>,

    /// Which instance of each weekday within a month, 1..=5 or -1 for the last one.
    pub ordinal: Option<i8>,
}

impl RecurrenceDescriptor {
    /// A weekly pattern on the given weekdays.
    pub fn weekly(weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            frequency: Frequency::Weekly,
            weekdays: dedup(weekdays),
            ordinal: None,
        }
    }

    /// A monthly pattern on the given weekdays with an optional ordinal.
    pub fn monthly(weekdays: impl IntoIterator<Item = Weekday>, ordinal: Option<i8>) -> Self {
        Self {
            frequency: Frequency::Monthly,
            weekdays: dedup(weekdays),
            ordinal: ordinal.filter(|&o| o != 0),
        }
    }

    /// Parses a recurrence string.
    ///
    /// When the string carries no usable `BYDAY`, `fallback` (a legacy day name such as
    /// `Tuesday` or `Tue`, or a two-letter code) is used as the single weekday.
    pub fn parse(s: &str, fallback: Option<&str>) -> Self {
        let s = s.trim();
        let s = match s.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &s[6..],
            _ => s,
        };

        let mut frequency = None;
        let mut weekdays = Vec::new();
        let mut ordinal = None;

        for part in s.split(';').map(str::trim).filter(|a| !a.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                tracing::debug!(part, "ignoring recurrence part without value");
                continue;
            };

            let key = key.trim();
            let value = value.trim();
            if key.eq_ignore_ascii_case(KW_FREQ) {
                frequency = parse_frequency(value);
            } else if key.eq_ignore_ascii_case(KW_BYDAY) {
                weekdays.extend(value.split(',').filter_map(parse_byday_token));
            } else if key.eq_ignore_ascii_case(KW_BYSETPOS) {
                ordinal = parse_ordinal(value);
            } else {
                tracing::debug!(key, "ignoring unsupported recurrence part");
            }
        }

        if weekdays.is_empty() {
            weekdays.extend(fallback.and_then(Weekday::from_hint));
        }

        Self {
            frequency: frequency.unwrap_or_default(),
            weekdays: dedup(weekdays),
            ordinal,
        }
    }

    /// Builds the recurrence string, the left inverse of [`RecurrenceDescriptor::parse`].
    pub fn build(&self) -> String {
        self.to_string()
    }

    /// Whether a single ordinal is applied to several weekdays of a monthly pattern, which
    /// has no single calendar meaning. Expansion applies the ordinal to each weekday
    /// independently.
    pub fn is_ambiguous(&self) -> bool {
        self.frequency == Frequency::Monthly && self.ordinal.is_some() && self.weekdays.len() > 1
    }
}

impl Display for RecurrenceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_FREQ}={}", self.frequency)?;
        if !self.weekdays.is_empty() {
            write!(f, ";{KW_BYDAY}=")?;
            for (i, day) in self.weekdays.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{day}")?;
            }
        }
        if let Some(ordinal) = self.ordinal {
            write!(f, ";{KW_BYSETPOS}={ordinal}")?;
        }
        Ok(())
    }
}

fn parse_frequency(value: &str) -> Option<Frequency> {
    if value.eq_ignore_ascii_case(KW_WEEKLY) {
        Some(Frequency::Weekly)
    } else if value.eq_ignore_ascii_case(KW_MONTHLY) {
        Some(Frequency::Monthly)
    } else {
        tracing::debug!(value, "unsupported frequency, falling back to weekly");
        None
    }
}

/// Extracts the weekday of a `BYDAY` token, discarding any ordinal prefix such as the
/// `-1` in `-1SU`.
fn parse_byday_token(token: &str) -> Option<Weekday> {
    const RE: &str = r"^(?:[+-]?\d{1,2})?([A-Za-z]{2})$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let code = re.captures(token.trim())?.get(1)?;
    Weekday::from_code(code.as_str())
}

/// Takes the first value of a `BYSETPOS` list; zero and non-numeric values are ignored.
fn parse_ordinal(value: &str) -> Option<i8> {
    let first = value.split(',').next()?.trim();
    let first = first.strip_prefix('+').unwrap_or(first);
    match first.parse::<i8>() {
        Ok(0) => None,
        Ok(n) => Some(n),
        Err(_) => {
            tracing::debug!(value, "ignoring malformed ordinal");
            None
        }
    }
}

fn dedup(weekdays: impl IntoIterator<Item = Weekday>) -> Vec<Weekday> {
    let mut out: Vec<Weekday> = Vec::with_capacity(7);
    for day in weekdays {
        if !out.contains(&day) {
            out.push(day);
        }
    }
    out
}
