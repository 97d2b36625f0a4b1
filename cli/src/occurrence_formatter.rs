// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use atelier_core::Occurrence;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, format_time_range};

#[derive(Debug)]
pub struct OccurrenceFormatter {
    columns: Vec<OccurrenceColumn>,
    format: OutputFormat,
}

impl OccurrenceFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                OccurrenceColumn::Date,
                OccurrenceColumn::Weekday,
                OccurrenceColumn::TimeRange,
                OccurrenceColumn::Studio,
                OccurrenceColumn::Workshop,
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
                OccurrenceColumn::Duration,
                OccurrenceColumn::Rule,
                OccurrenceColumn::Id,
            ]);
        }
        self
    }

    pub fn format<'a>(&'a self, occurrences: &'a [Occurrence]) -> Display<'a> {
        Display {
            occurrences,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    occurrences: &'a [Occurrence],
    formatter: &'a OccurrenceFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.occurrences)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.occurrences)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceColumn {
    Date,
    Weekday,
    TimeRange,
    Studio,
    Workshop,
    Duration,
    Rule,
    Id,
}

impl TableColumn<Occurrence> for OccurrenceColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            OccurrenceColumn::Date => "Date",
            OccurrenceColumn::Weekday => "Weekday",
            OccurrenceColumn::TimeRange => "Time Range",
            OccurrenceColumn::Studio => "Studio",
            OccurrenceColumn::Workshop => "Workshop",
            OccurrenceColumn::Duration => "Duration",
            OccurrenceColumn::Rule => "Rule",
            OccurrenceColumn::Id => "Id",
        }
        .into()
    }

    fn format<'a>(&self, o: &'a Occurrence) -> Cow<'a, str> {
        match self {
            OccurrenceColumn::Date => o.date.to_string().into(),
            OccurrenceColumn::Weekday => o.start.strftime("%a").to_string().into(),
            OccurrenceColumn::TimeRange => format_time_range(&o.start, &o.end).into(),
            OccurrenceColumn::Studio => o.studio.as_str().into(),
            OccurrenceColumn::Workshop => o.workshop_id.as_str().into(),
            OccurrenceColumn::Duration => format!("{}m", o.duration_minutes).into(),
            OccurrenceColumn::Rule => o.rule_id.as_str().into(),
            OccurrenceColumn::Id => o.id.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            OccurrenceColumn::Duration => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}
