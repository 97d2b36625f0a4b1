// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::Time;

/// A local wall-clock time of day with minute precision, written `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: i8,
    minute: i8,
}

impl TimeOfDay {
    /// Creates a time of day, returning `None` when out of range.
    pub fn new(hour: i8, minute: i8) -> Option<Self> {
        ((0..24).contains(&hour) && (0..60).contains(&minute)).then_some(Self { hour, minute })
    }

    /// Hour, in `0..24`.
    pub const fn hour(self) -> i8 {
        self.hour
    }

    /// Minute, in `0..60`.
    pub const fn minute(self) -> i8 {
        self.minute
    }

    /// The civil time with zero seconds and sub-seconds.
    pub fn civil(self) -> Time {
        Time::constant(self.hour, self.minute, 0, 0)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Accepts `HH:mm`, a single-digit hour, and a trailing `:ss` which is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid time of day, expected HH:mm: {s}");

        let mut parts = s.trim().split(':');
        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        if let Some(second) = parts.next()
            && second.parse::<u8>().map_or(true, |a| a >= 60)
        {
            return Err(invalid());
        }
        if parts.next().is_some() || hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }

        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}
