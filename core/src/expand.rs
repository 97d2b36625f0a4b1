// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Occurrence expansion.
//!
//! [`Expander::expand`] turns a set of rules into the sessions falling inside a short window
//! (typically one week). Each rule is expanded independently; only the final sort joins the
//! per-rule results. Malformed rules never fail the run: they are logged and contribute
//! nothing.

use std::collections::BTreeSet;

use jiff::ToSpan;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::datetime::{TimeOfDay, add_minutes, combine, nth_weekday_of_month};
use crate::occurrence::Occurrence;
use crate::recurrence::{Frequency, RecurrenceDescriptor, Weekday};
use crate::rule::Rule;

/// Width of the slices used by [`Expander::expand_range`].
const SLICE_DAYS: i32 = 7;

/// Expands rules into occurrences, anchoring start times in a default zone unless a rule
/// names its own.
#[derive(Debug, Clone)]
pub struct Expander {
    tz: TimeZone,
}

impl Expander {
    /// Creates an expander whose run uses `tz` for rules without their own zone.
    pub fn new(tz: TimeZone) -> Self {
        Self { tz }
    }

    /// The default zone of this expander.
    pub fn timezone(&self) -> &TimeZone {
        &self.tz
    }

    /// Expands `rules` over the inclusive window `[from, to]`.
    ///
    /// The result is sorted by start instant, ties broken by rule id, and is identical for
    /// identical inputs. The weekly branch only looks at the week containing `from` plus one
    /// week ahead, so windows wider than a week should go through
    /// [`Expander::expand_range`].
    #[tracing::instrument(level = "debug", skip_all, fields(%from, %to, rules = rules.len()))]
    pub fn expand(&self, rules: &[Rule], from: Date, to: Date) -> Vec<Occurrence> {
        if from > to {
            tracing::debug!("empty window");
            return Vec::new();
        }

        let mut occurrences: Vec<Occurrence> = rules
            .iter()
            .filter(|rule| rule.is_active)
            .flat_map(|rule| self.expand_rule(rule, from, to))
            .collect();

        sort(&mut occurrences);
        tracing::debug!(count = occurrences.len(), "expanded rules");
        occurrences
    }

    /// Expands `rules` over an arbitrarily wide inclusive window by slicing it into
    /// consecutive seven-day windows.
    #[tracing::instrument(level = "debug", skip_all, fields(%from, %to, rules = rules.len()))]
    pub fn expand_range(&self, rules: &[Rule], from: Date, to: Date) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        let mut cursor = from;
        while cursor <= to {
            let end = match cursor.checked_add((SLICE_DAYS - 1).days()) {
                Ok(end) if end < to => end,
                _ => to,
            };
            occurrences.extend(self.expand(rules, cursor, end));

            match end.checked_add(1.day()) {
                Ok(next) => cursor = next,
                Err(_) => break,
            }
        }

        sort(&mut occurrences);
        occurrences
    }

    fn expand_rule(&self, rule: &Rule, from: Date, to: Date) -> Vec<Occurrence> {
        if rule.duration_minutes == 0 {
            tracing::warn!(rule_id = %rule.id, "skipping rule with zero duration");
            return Vec::new();
        }

        let time: TimeOfDay = match rule.start_time.parse() {
            Ok(time) => time,
            Err(e) => {
                tracing::warn!(
                    rule_id = %rule.id,
                    start_time = %rule.start_time,
                    "skipping rule: {e}"
                );
                return Vec::new();
            }
        };

        let descriptor = rule.descriptor();
        let candidates = match descriptor.frequency {
            Frequency::Weekly => weekly_dates(&descriptor.weekdays, from),
            Frequency::Monthly => monthly_dates(rule, &descriptor, from, to),
        };
        if descriptor.weekdays.is_empty() {
            tracing::warn!(rule_id = %rule.id, rrule = %rule.recurrence, "rule has no weekday");
        }

        let tz = self.rule_timezone(rule);
        candidates
            .into_iter()
            .filter(|date| rule.effective_from.is_none_or(|d| *date >= d))
            .filter(|date| (from..=to).contains(date))
            .filter(|date| !rule.exceptions.contains(date))
            .filter_map(|date| {
                let anchored = combine(date, time, &tz).and_then(|start| {
                    add_minutes(&start, rule.duration_minutes).map(|end| (start, end))
                });
                match anchored {
                    Ok((start, end)) => Some(Occurrence::new(rule, date, start, end)),
                    Err(e) => {
                        tracing::warn!(rule_id = %rule.id, %date, "cannot anchor occurrence: {e}");
                        None
                    }
                }
            })
            .collect()
    }

    fn rule_timezone(&self, rule: &Rule) -> TimeZone {
        let Some(name) = rule.timezone.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return self.tz.clone();
        };

        match TimeZone::get(name) {
            Ok(tz) => tz,
            Err(e) => {
                tracing::warn!(
                    rule_id = %rule.id,
                    timezone = name,
                    "unknown timezone, using default: {e}"
                );
                self.tz.clone()
            }
        }
    }
}

/// One candidate per weekday: its date in the Sunday-started week containing `from`, pushed
/// one week ahead when it falls before `from`.
fn weekly_dates(weekdays: &[Weekday], from: Date) -> BTreeSet<Date> {
    let from_offset = from.weekday().to_sunday_zero_offset();
    weekdays
        .iter()
        .filter_map(|weekday| {
            let mut delta = i32::from(weekday.sunday_zero_offset() - from_offset);
            if delta < 0 {
                delta += 7;
            }
            from.checked_add(delta.days()).ok()
        })
        .collect()
}

/// Candidates for the month of `from` and the month of `to`.
fn monthly_dates(
    rule: &Rule,
    descriptor: &RecurrenceDescriptor,
    from: Date,
    to: Date,
) -> BTreeSet<Date> {
    if descriptor.is_ambiguous() {
        tracing::warn!(
            rule_id = %rule.id,
            rrule = %rule.recurrence,
            "monthly ordinal with several weekdays, applying it to each weekday"
        );
    }

    let mut months = vec![(from.year(), from.month())];
    if (to.year(), to.month()) != months[0] {
        months.push((to.year(), to.month()));
    }

    let mut dates = BTreeSet::new();
    for (year, month) in months {
        for &weekday in &descriptor.weekdays {
            match descriptor.ordinal {
                Some(ordinal @ (-1 | 1..=5)) => {
                    dates.extend(nth_weekday_of_month(year, month, weekday, ordinal));
                }
                Some(ordinal) => {
                    tracing::warn!(rule_id = %rule.id, ordinal, "unsupported monthly ordinal");
                }
                None => dates.extend(every_weekday_of_month(year, month, weekday)),
            }
        }
    }
    dates
}

fn every_weekday_of_month(year: i16, month: i8, weekday: Weekday) -> Vec<Date> {
    (1..=5)
        .filter_map(|n| nth_weekday_of_month(year, month, weekday, n))
        .filter(|d| d.month() == month)
        .collect()
}

fn sort(occurrences: &mut [Occurrence]) {
    occurrences.sort_by(|a, b| {
        a.start
            .timestamp()
            .cmp(&b.start.timestamp())
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::rule::RuleDraft;

    fn rule(id: &str, start: &str, rrule: &str) -> Rule {
        Rule::new(id, RuleDraft::new("w1", "Studio A", start, 60, rrule))
    }

    fn utc() -> Expander {
        Expander::new(TimeZone::UTC)
    }

    #[test]
    fn weekly_candidate_advances_one_week() {
        // 2025-06-04 is a Wednesday
        let dates = weekly_dates(&[Weekday::Tuesday, Weekday::Friday], date(2025, 6, 4));
        let dates: Vec<_> = dates.into_iter().collect();
        assert_eq!(dates, vec![date(2025, 6, 6), date(2025, 6, 10)]);
    }

    #[test]
    fn weekly_candidate_on_window_start() {
        let dates = weekly_dates(&[Weekday::Monday], date(2025, 6, 2));
        assert_eq!(dates.into_iter().collect::<Vec<_>>(), vec![date(2025, 6, 2)]);
    }

    #[test]
    fn every_weekday_of_month_stays_in_month() {
        let fridays = every_weekday_of_month(2025, 5, Weekday::Friday);
        assert_eq!(
            fridays,
            vec![
                date(2025, 5, 2),
                date(2025, 5, 9),
                date(2025, 5, 16),
                date(2025, 5, 23),
                date(2025, 5, 30),
            ]
        );
        assert_eq!(every_weekday_of_month(2025, 4, Weekday::Friday).len(), 4);
    }

    #[test]
    fn skips_zero_duration_and_bad_start_time() {
        let mut zero = rule("r1", "18:00", "FREQ=WEEKLY;BYDAY=TU");
        zero.duration_minutes = 0;
        let bad = rule("r2", "6pm", "FREQ=WEEKLY;BYDAY=TU");
        let good = rule("r3", "18:00", "FREQ=WEEKLY;BYDAY=TU");

        let out = utc().expand(&[zero, bad, good], date(2025, 6, 2), date(2025, 6, 8));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule_id, "r3");
    }

    #[test]
    fn unknown_rule_timezone_falls_back_to_default() {
        let mut r = rule("r1", "18:00", "FREQ=WEEKLY;BYDAY=TU");
        r.timezone = Some("Mars/Olympus_Mons".to_string());

        let out = utc().expand(&[r], date(2025, 6, 2), date(2025, 6, 8));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start.time_zone().iana_name(), TimeZone::UTC.iana_name());
    }

    #[test]
    fn unsupported_ordinal_yields_nothing() {
        let r = rule("r1", "18:00", "FREQ=MONTHLY;BYDAY=FR;BYSETPOS=-2");
        let out = utc().expand(&[r], date(2025, 4, 1), date(2025, 4, 30));
        assert!(out.is_empty());
    }

    #[test]
    fn reversed_window_is_empty() {
        let r = rule("r1", "18:00", "FREQ=WEEKLY;BYDAY=TU");
        assert!(utc().expand(&[r.clone()], date(2025, 6, 8), date(2025, 6, 2)).is_empty());
        assert!(utc().expand_range(&[r], date(2025, 6, 8), date(2025, 6, 2)).is_empty());
    }

    #[test]
    fn expand_range_covers_every_week() {
        let r = rule("r1", "18:00", "FREQ=WEEKLY;BYDAY=TU");
        let out = utc().expand_range(&[r], date(2025, 6, 1), date(2025, 6, 30));
        let dates: Vec<_> = out.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 6, 3), date(2025, 6, 10), date(2025, 6, 17), date(2025, 6, 24)]
        );
    }
}
