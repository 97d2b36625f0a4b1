// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use atelier_client::RuleClient;
use atelier_core::Atelier;
use clap::{ArgMatches, Command, arg};
use jiff::civil::Date;

use crate::arg::CommonArgs;
use crate::occurrence_formatter::OccurrenceFormatter;
use crate::util::{OutputFormat, parse_date, resolve_window};

/// Lists the sessions generated from the rules in a date window.
#[derive(Debug, Clone)]
pub struct CmdSessions {
    pub workshop: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdSessions {
    pub const NAME: &str = "sessions";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("s")
            .about("List sessions, the current week by default")
            .arg(CommonArgs::workshop())
            .arg(
                arg!(--from <DATE> "First day of the window, YYYY-MM-DD")
                    .value_parser(parse_date),
            )
            .arg(arg!(--to <DATE> "Last day of the window, YYYY-MM-DD").value_parser(parse_date))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            workshop: CommonArgs::get_workshop(matches),
            from: matches.get_one("from").copied(),
            to: matches.get_one("to").copied(),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, atelier: &Atelier<RuleClient>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing sessions...");
        let default = atelier.week_of(atelier.today());
        let (from, to) = resolve_window(self.from, self.to, default)?;

        let sessions = atelier
            .sessions(self.workshop.as_deref(), from, to)
            .await?;

        let formatter = OccurrenceFormatter::new()
            .with_output_format(self.output_format)
            .with_verbose(self.verbose);
        println!("{}", formatter.format(&sessions));
        Ok(())
    }
}
