// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

/// Day of the week, ordered Sunday first as in the two-letter recurrence codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    /// Sunday.
    #[cfg_attr(feature = "clap", clap(name = "su", alias = "sunday"))]
    Sunday,

    /// Monday.
    #[cfg_attr(feature = "clap", clap(name = "mo", alias = "monday"))]
    Monday,

    /// Tuesday.
    #[cfg_attr(feature = "clap", clap(name = "tu", alias = "tuesday"))]
    Tuesday,

    /// Wednesday.
    #[cfg_attr(feature = "clap", clap(name = "we", alias = "wednesday"))]
    Wednesday,

    /// Thursday.
    #[cfg_attr(feature = "clap", clap(name = "th", alias = "thursday"))]
    Thursday,

    /// Friday.
    #[cfg_attr(feature = "clap", clap(name = "fr", alias = "friday"))]
    Friday,

    /// Saturday.
    #[cfg_attr(feature = "clap", clap(name = "sa", alias = "saturday"))]
    Saturday,
}

const ALL: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// All weekdays, Sunday first.
    pub const fn all() -> [Weekday; 7] {
        ALL
    }

    /// The two-letter recurrence code, e.g. `TU`.
    pub const fn code(self) -> &'static str {
        match self {
            Weekday::Sunday => "SU",
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
        }
    }

    /// The English name, e.g. `Tuesday`.
    pub const fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Days since Sunday, in `0..=6`.
    pub const fn sunday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Looks up a two-letter code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        ALL.into_iter().find(|d| d.code().eq_ignore_ascii_case(code))
    }

    /// Resolves a free-text English day name such as `Tue`, `tues` or `TUESDAY`.
    ///
    /// At least three letters are required, so `T` or `Tu` never match a name; two-letter
    /// inputs are handled by [`Weekday::from_code`].
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name.len() < 3 {
            return None;
        }

        ALL.into_iter()
            .find(|d| d.name().to_ascii_lowercase().starts_with(&name))
    }

    /// Resolves either a two-letter code or an English day name.
    pub fn from_hint(hint: &str) -> Option<Self> {
        Self::from_code(hint).or_else(|| Self::from_name(hint))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hint(s).ok_or_else(|| format!("Invalid weekday: {s}"))
    }
}

impl TryFrom<String> for Weekday {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(value: Weekday) -> Self {
        value.code().to_string()
    }
}

impl From<Weekday> for jiff::civil::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sunday => jiff::civil::Weekday::Sunday,
            Weekday::Monday => jiff::civil::Weekday::Monday,
            Weekday::Tuesday => jiff::civil::Weekday::Tuesday,
            Weekday::Wednesday => jiff::civil::Weekday::Wednesday,
            Weekday::Thursday => jiff::civil::Weekday::Thursday,
            Weekday::Friday => jiff::civil::Weekday::Friday,
            Weekday::Saturday => jiff::civil::Weekday::Saturday,
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(value: jiff::civil::Weekday) -> Self {
        match value {
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_codes_case_insensitively() {
        assert_eq!(Weekday::from_code("tu"), Some(Weekday::Tuesday));
        assert_eq!(Weekday::from_code(" SA "), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_code("XX"), None);
    }

    #[test]
    fn resolves_short_and_long_names() {
        assert_eq!(Weekday::from_name("Tuesday"), Some(Weekday::Tuesday));
        assert_eq!(Weekday::from_name("tue"), Some(Weekday::Tuesday));
        assert_eq!(Weekday::from_name("THURS"), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_name("sun"), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_name("Tu"), None);
        assert_eq!(Weekday::from_name("Tuesdays"), None);
        assert_eq!(Weekday::from_name("holiday"), None);
    }

    #[test]
    fn hint_accepts_codes_and_names() {
        assert_eq!(Weekday::from_hint("FR"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_hint("friday"), Some(Weekday::Friday));
        assert_eq!("Wed".parse::<Weekday>(), Ok(Weekday::Wednesday));
        assert!("".parse::<Weekday>().is_err());
    }

    #[test]
    fn offsets_follow_sunday_first_order() {
        for (i, day) in Weekday::all().into_iter().enumerate() {
            assert_eq!(day.sunday_zero_offset() as usize, i);
            let jiff_day: jiff::civil::Weekday = day.into();
            assert_eq!(jiff_day.to_sunday_zero_offset(), day.sunday_zero_offset());
            assert_eq!(Weekday::from(jiff_day), day);
        }
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Weekday::Monday).unwrap();
        assert_eq!(json, r#""MO""#);
        let day: Weekday = serde_json::from_str(r#""monday""#).unwrap();
        assert_eq!(day, Weekday::Monday);
    }
}
