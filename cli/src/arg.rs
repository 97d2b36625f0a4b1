// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use atelier_core::{Frequency, TimeOfDay, Weekday};
use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use jiff::civil::Date;

use crate::util::{OutputFormat, parse_date};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    pub fn workshop() -> Arg {
        arg!(-w --workshop <WORKSHOP> "Only include this workshop")
    }

    pub fn get_workshop(matches: &ArgMatches) -> Option<String> {
        matches.get_one("workshop").cloned()
    }
}

/// Arguments shared by `rule new` and `rule edit`.
#[derive(Debug, Clone, Copy)]
pub struct RuleArgs {
    required: bool,
}

impl RuleArgs {
    pub const fn new(required: bool) -> Self {
        Self { required }
    }

    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the rule")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        match matches.get_one::<String>("id") {
            Some(id) => id.clone(),
            None => unreachable!("id is required"),
        }
    }

    pub fn workshop(self) -> Arg {
        arg!(-w --workshop <WORKSHOP> "The workshop the sessions belong to").required(self.required)
    }

    pub fn get_workshop(matches: &ArgMatches) -> Option<String> {
        matches.get_one("workshop").cloned()
    }

    pub fn studio(self) -> Arg {
        arg!(-s --studio <STUDIO> "The studio or room the sessions take place in")
    }

    pub fn get_studio(matches: &ArgMatches) -> Option<String> {
        matches.get_one("studio").cloned()
    }

    pub fn start(self) -> Arg {
        arg!(--start <START> "Local start time, HH:MM")
            .value_parser(|s: &str| s.parse::<TimeOfDay>())
            .required(self.required)
    }

    pub fn get_start(matches: &ArgMatches) -> Option<TimeOfDay> {
        matches.get_one("start").copied()
    }

    pub fn duration(self) -> Arg {
        arg!(-d --duration <MINUTES> "Session length in minutes")
            .value_parser(value_parser!(u32).range(1..))
            .required(self.required)
    }

    pub fn get_duration(matches: &ArgMatches) -> Option<u32> {
        matches.get_one("duration").copied()
    }

    pub fn rrule(self) -> Arg {
        arg!(--rrule <RRULE> "Recurrence, e.g. FREQ=WEEKLY;BYDAY=TU,TH")
            .conflicts_with_all(["day", "freq", "ordinal"])
    }

    pub fn get_rrule(matches: &ArgMatches) -> Option<String> {
        matches.get_one("rrule").cloned()
    }

    pub fn day(self) -> Arg {
        arg!(--day <DAY> "Weekday the sessions repeat on, may be repeated")
            .value_parser(value_parser!(Weekday))
            .action(ArgAction::Append)
            .value_delimiter(',')
    }

    pub fn get_days(matches: &ArgMatches) -> Vec<Weekday> {
        matches
            .get_many::<Weekday>("day")
            .map(|days| days.copied().collect())
            .unwrap_or_default()
    }

    pub fn freq(self) -> Arg {
        arg!(--freq <FREQ> "Repeat frequency").value_parser(value_parser!(Frequency))
    }

    pub fn get_freq(matches: &ArgMatches) -> Option<Frequency> {
        matches.get_one("freq").copied()
    }

    pub fn ordinal(self) -> Arg {
        arg!(--ordinal <N> "Which weekday of the month, 1 to 5 or -1 for the last")
            .value_parser(|s: &str| match s.trim().parse::<i8>() {
                Ok(n @ (-1 | 1..=5)) => Ok(n),
                _ => Err(format!("Invalid ordinal `{s}`, expected 1 to 5 or -1")),
            })
            .allow_hyphen_values(true)
    }

    pub fn get_ordinal(matches: &ArgMatches) -> Option<i8> {
        matches.get_one("ordinal").copied()
    }

    pub fn effective_from(self) -> Arg {
        arg!(--"effective-from" <DATE> "First date sessions may take place, YYYY-MM-DD")
            .value_parser(parse_date)
    }

    pub fn get_effective_from(matches: &ArgMatches) -> Option<Date> {
        matches.get_one("effective-from").copied()
    }

    pub fn timezone(self) -> Arg {
        arg!(--timezone <TZ> "IANA time zone the start time is in")
    }

    pub fn get_timezone(matches: &ArgMatches) -> Option<String> {
        matches.get_one("timezone").cloned()
    }

    pub fn inactive(self) -> Arg {
        arg!(--inactive "Keep the rule but stop generating sessions")
    }

    pub fn active(self) -> Arg {
        arg!(--active "Generate sessions from the rule again").conflicts_with("inactive")
    }

    /// `Some(true)` for `--active`, `Some(false)` for `--inactive`.
    pub fn get_active(matches: &ArgMatches) -> Option<bool> {
        let flag = |id: &str| matches.try_get_one::<bool>(id).ok().flatten().copied();
        match (flag("active"), flag("inactive")) {
            (_, Some(true)) => Some(false),
            (Some(true), _) => Some(true),
            _ => None,
        }
    }
}
