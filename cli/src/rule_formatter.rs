// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use atelier_core::{Frequency, RecurrenceDescriptor, Rule};
use colored::Color;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct RuleFormatter {
    columns: Vec<RuleColumn>,
    format: OutputFormat,
}

impl RuleFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                RuleColumn::Id,
                RuleColumn::Workshop,
                RuleColumn::Studio,
                RuleColumn::Schedule,
                RuleColumn::Active,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.columns.extend([
                RuleColumn::EffectiveFrom,
                RuleColumn::Timezone,
                RuleColumn::Exceptions,
                RuleColumn::Rrule,
            ]);
        }
        self
    }

    pub fn format<'a>(&'a self, rules: &'a [Rule]) -> Display<'a> {
        Display {
            rules,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    rules: &'a [Rule],
    formatter: &'a RuleFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => {
                write!(f, "{}", Table::new(TableStyleJson::new(), columns, self.rules))
            }
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new().with_header(true), columns, self.rules)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleColumn {
    Id,
    Workshop,
    Studio,
    Schedule,
    Active,
    EffectiveFrom,
    Timezone,
    Exceptions,
    Rrule,
}

impl TableColumn<Rule> for RuleColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            RuleColumn::Id => "Id",
            RuleColumn::Workshop => "Workshop",
            RuleColumn::Studio => "Studio",
            RuleColumn::Schedule => "Schedule",
            RuleColumn::Active => "Active",
            RuleColumn::EffectiveFrom => "Effective From",
            RuleColumn::Timezone => "Timezone",
            RuleColumn::Exceptions => "Exceptions",
            RuleColumn::Rrule => "Rrule",
        }
        .into()
    }

    fn format<'a>(&self, rule: &'a Rule) -> Cow<'a, str> {
        match self {
            RuleColumn::Id => rule.id.as_str().into(),
            RuleColumn::Workshop => rule.workshop_id.as_str().into(),
            RuleColumn::Studio => rule.studio.as_str().into(),
            RuleColumn::Schedule => format_schedule(rule).into(),
            RuleColumn::Active => Cow::from(if rule.is_active { "yes" } else { "no" }),
            RuleColumn::EffectiveFrom => rule
                .effective_from
                .map(|d| d.to_string())
                .unwrap_or_default()
                .into(),
            RuleColumn::Timezone => rule.timezone.as_deref().unwrap_or_default().into(),
            RuleColumn::Exceptions => rule
                .exceptions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
                .into(),
            RuleColumn::Rrule => rule.recurrence.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, rule: &Rule) -> Option<Color> {
        match self {
            RuleColumn::Active if !rule.is_active => Some(Color::BrightBlack),
            RuleColumn::Schedule if rule.descriptor().is_ambiguous() => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Human-readable summary such as `weekly TU,TH 18:00 60m`.
fn format_schedule(rule: &Rule) -> String {
    let descriptor = rule.descriptor();
    format!(
        "{} {} {}m",
        format_recurrence(&descriptor),
        rule.start_time,
        rule.duration_minutes
    )
}

fn format_recurrence(descriptor: &RecurrenceDescriptor) -> String {
    let days = match descriptor.weekdays.as_slice() {
        [] => "?".to_string(),
        days => days
            .iter()
            .map(|d| d.code())
            .collect::<Vec<_>>()
            .join(","),
    };

    match (descriptor.frequency, descriptor.ordinal) {
        (Frequency::Weekly, _) => format!("weekly {days}"),
        (Frequency::Monthly, None) => format!("monthly every {days}"),
        (Frequency::Monthly, Some(-1)) => format!("monthly last {days}"),
        (Frequency::Monthly, Some(n)) => format!("monthly #{n} {days}"),
    }
}

#[cfg(test)]
mod tests {
    use atelier_core::{RuleDraft, Weekday};

    use super::*;

    fn rule(rrule: &str) -> Rule {
        Rule::new("r1", RuleDraft::new("w1", "Studio A", "18:00", 60, rrule))
    }

    #[test]
    fn test_format_schedule() {
        assert_eq!(format_schedule(&rule("FREQ=WEEKLY;BYDAY=TU,TH")), "weekly TU,TH 18:00 60m");
        assert_eq!(
            format_schedule(&rule("FREQ=MONTHLY;BYDAY=FR;BYSETPOS=-1")),
            "monthly last FR 18:00 60m"
        );
        assert_eq!(
            format_schedule(&rule("FREQ=MONTHLY;BYDAY=MO;BYSETPOS=2")),
            "monthly #2 MO 18:00 60m"
        );
        assert_eq!(format_schedule(&rule("FREQ=MONTHLY;BYDAY=WE")), "monthly every WE 18:00 60m");
        assert_eq!(format_schedule(&rule("FREQ=WEEKLY")), "weekly ? 18:00 60m");
    }

    #[test]
    fn test_format_recurrence_from_descriptor() {
        let d = RecurrenceDescriptor::monthly([Weekday::Sunday], Some(1));
        assert_eq!(format_recurrence(&d), "monthly #1 SU");
    }

    #[test]
    fn test_json_output() {
        let rules = vec![rule("FREQ=WEEKLY;BYDAY=TU")];
        let formatter = RuleFormatter::new().with_output_format(OutputFormat::Json);
        let out = formatter.format(&rules).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "r1");
        assert_eq!(value[0]["schedule"], "weekly TU 18:00 60m");
        assert_eq!(value[0]["active"], "yes");
    }
}
