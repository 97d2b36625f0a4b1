// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use atelier_client::RuleClient;
use atelier_core::{Atelier, Frequency, RecurrenceDescriptor, Rule, RuleDraft, TimeOfDay, Weekday};
use clap::{ArgMatches, Command};
use colored::Colorize;
use jiff::civil::Date;

use crate::arg::{CommonArgs, RuleArgs};
use crate::rule_formatter::RuleFormatter;
use crate::util::OutputFormat;

/// Recurrence given on the command line, either verbatim or piecewise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceArgs {
    pub rrule: Option<String>,
    pub days: Vec<Weekday>,
    pub freq: Option<Frequency>,
    pub ordinal: Option<i8>,
}

impl RecurrenceArgs {
    fn from(matches: &ArgMatches) -> Self {
        Self {
            rrule: RuleArgs::get_rrule(matches),
            days: RuleArgs::get_days(matches),
            freq: RuleArgs::get_freq(matches),
            ordinal: RuleArgs::get_ordinal(matches),
        }
    }

    fn is_empty(&self) -> bool {
        self.rrule.is_none() && self.days.is_empty() && self.freq.is_none() && self.ordinal.is_none()
    }

    /// Builds the recurrence string, filling unspecified parts from `base`.
    ///
    /// An ordinal without an explicit frequency implies a monthly pattern.
    pub fn build(&self, base: Option<&RecurrenceDescriptor>) -> Result<String, Box<dyn Error>> {
        if let Some(rrule) = &self.rrule {
            let descriptor = RecurrenceDescriptor::parse(rrule, None);
            if descriptor.weekdays.is_empty() {
                return Err(format!("Recurrence `{rrule}` names no weekday").into());
            }
            return Ok(descriptor.build());
        }

        let weekdays = match (self.days.is_empty(), base) {
            (false, _) => self.days.clone(),
            (true, Some(base)) => base.weekdays.clone(),
            (true, None) => return Err("Either --rrule or --day is required".into()),
        };
        if weekdays.is_empty() {
            return Err("At least one weekday is required".into());
        }

        let freq = match (self.freq, self.ordinal, base) {
            (Some(freq), _, _) => freq,
            (None, Some(_), _) => Frequency::Monthly,
            (None, None, Some(base)) => base.frequency,
            (None, None, None) => Frequency::Weekly,
        };

        let descriptor = match freq {
            Frequency::Weekly if self.ordinal.is_some() => {
                return Err("--ordinal only applies to monthly rules".into());
            }
            Frequency::Weekly => RecurrenceDescriptor::weekly(weekdays),
            Frequency::Monthly => {
                let ordinal = self.ordinal.or(base.and_then(|b| b.ordinal));
                RecurrenceDescriptor::monthly(weekdays, ordinal)
            }
        };

        if descriptor.is_ambiguous() {
            println!(
                "{} an ordinal with several weekdays applies to each weekday separately",
                "Warning:".yellow()
            );
        }
        Ok(descriptor.build())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRuleList {
    pub workshop: Option<String>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdRuleList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List recurring rules")
            .arg(CommonArgs::workshop())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            workshop: CommonArgs::get_workshop(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, atelier: &Atelier<RuleClient>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing rules...");
        let rules = atelier.load(self.workshop.as_deref()).await?;
        print_rules(&rules, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRuleNew {
    pub workshop: String,
    pub studio: String,
    pub start: TimeOfDay,
    pub duration: u32,
    pub recurrence: RecurrenceArgs,
    pub effective_from: Option<Date>,
    pub timezone: Option<String>,
    pub inactive: bool,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdRuleNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        let args = RuleArgs::new(true);
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new recurring rule")
            .arg(args.workshop())
            .arg(args.studio())
            .arg(args.start())
            .arg(args.duration())
            .arg(args.rrule())
            .arg(args.day())
            .arg(args.freq())
            .arg(args.ordinal())
            .arg(args.effective_from())
            .arg(args.timezone())
            .arg(args.inactive())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let workshop = RuleArgs::get_workshop(matches).ok_or("Workshop is required")?;
        let start = RuleArgs::get_start(matches).ok_or("Start time is required")?;
        let duration = RuleArgs::get_duration(matches).ok_or("Duration is required")?;
        let recurrence = RecurrenceArgs::from(matches);
        if recurrence.is_empty() {
            return Err("Either --rrule or --day is required for a new rule".into());
        }

        Ok(Self {
            workshop,
            studio: RuleArgs::get_studio(matches).unwrap_or_default(),
            start,
            duration,
            recurrence,
            effective_from: RuleArgs::get_effective_from(matches),
            timezone: RuleArgs::get_timezone(matches),
            inactive: RuleArgs::get_active(matches) == Some(false),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    /// The draft sent to the backend.
    pub fn draft(&self) -> Result<RuleDraft, Box<dyn Error>> {
        let mut draft = RuleDraft::new(
            self.workshop.trim(),
            self.studio.trim(),
            self.start.to_string(),
            self.duration,
            self.recurrence.build(None)?,
        );
        draft.effective_from = self.effective_from;
        draft.timezone = self.timezone.clone();
        draft.is_active = !self.inactive;
        Ok(draft)
    }

    pub async fn run(self, atelier: &Atelier<RuleClient>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new rule...");
        let draft = self.draft()?;
        let rule = atelier.create_rule(&draft).await?;
        print_rules(&[rule], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRuleEdit {
    pub id: String,
    pub workshop: Option<String>,
    pub studio: Option<String>,
    pub start: Option<TimeOfDay>,
    pub duration: Option<u32>,
    pub recurrence: RecurrenceArgs,
    pub effective_from: Option<Date>,
    pub timezone: Option<String>,
    pub active: Option<bool>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdRuleEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        let args = RuleArgs::new(false);
        Command::new(Self::NAME)
            .about("Edit a recurring rule")
            .arg(RuleArgs::id())
            .arg(args.workshop())
            .arg(args.studio())
            .arg(args.start())
            .arg(args.duration())
            .arg(args.rrule())
            .arg(args.day())
            .arg(args.freq())
            .arg(args.ordinal())
            .arg(args.effective_from())
            .arg(args.timezone())
            .arg(args.inactive())
            .arg(args.active())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RuleArgs::get_id(matches),
            workshop: RuleArgs::get_workshop(matches),
            studio: RuleArgs::get_studio(matches),
            start: RuleArgs::get_start(matches),
            duration: RuleArgs::get_duration(matches),
            recurrence: RecurrenceArgs::from(matches),
            effective_from: RuleArgs::get_effective_from(matches),
            timezone: RuleArgs::get_timezone(matches),
            active: RuleArgs::get_active(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    /// Applies the given overrides on top of an existing rule.
    pub fn apply(&self, rule: &Rule) -> Result<RuleDraft, Box<dyn Error>> {
        let mut draft = rule.draft.clone();
        if let Some(workshop) = &self.workshop {
            draft.workshop_id = workshop.trim().to_string();
        }
        if let Some(studio) = &self.studio {
            draft.studio = studio.trim().to_string();
        }
        if let Some(start) = self.start {
            draft.start_time = start.to_string();
        }
        if let Some(duration) = self.duration {
            draft.duration_minutes = duration;
        }
        if !self.recurrence.is_empty() {
            draft.recurrence = self.recurrence.build(Some(&rule.descriptor()))?;
            // the recurrence now names its weekdays explicitly
            draft.day_hint = None;
        }
        if let Some(effective_from) = self.effective_from {
            draft.effective_from = Some(effective_from);
        }
        if let Some(timezone) = &self.timezone {
            let timezone = timezone.trim();
            draft.timezone = (!timezone.is_empty()).then(|| timezone.to_string());
        }
        if let Some(active) = self.active {
            draft.is_active = active;
        }
        Ok(draft)
    }

    pub async fn run(self, atelier: &Atelier<RuleClient>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing rule...");
        atelier.load(None).await?;
        let rule = atelier
            .store()
            .get(&self.id)
            .await
            .ok_or_else(|| format!("Rule not found: {}", self.id))?;

        let draft = self.apply(&rule)?;
        let rule = atelier.update_rule(&rule.id, &draft).await?;
        print_rules(&[rule], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdRuleDelete {
    pub ids: Vec<String>,
}

impl CmdRuleDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete recurring rules")
            .arg(RuleArgs::id().num_args(1..))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let ids = matches
            .get_many::<String>("id")
            .map(|ids| ids.cloned().collect())
            .unwrap_or_default();
        Self { ids }
    }

    pub async fn run(self, atelier: &Atelier<RuleClient>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting rules...");
        for id in &self.ids {
            atelier.delete_rule(id).await?;
            println!("{} {}", "Deleted".green(), id);
        }
        Ok(())
    }
}

fn print_rules(rules: &[Rule], output_format: OutputFormat, verbose: bool) {
    let formatter = RuleFormatter::new()
        .with_output_format(output_format)
        .with_verbose(verbose);
    println!("{}", formatter.format(rules));
}
