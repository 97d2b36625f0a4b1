// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recurrence::RecurrenceDescriptor;

/// A persisted recurrence definition: "this workshop runs every Tuesday at 18:00 for 60
/// minutes in Studio A, starting from a given date".
///
/// The JSON shape follows the rule persistence backend: camel-case fields, `durationMin`
/// and `rrule`. Identifiers may arrive as bare ids or embedded objects and are normalized
/// with [`resolve_reference`] while deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Unique identifier assigned by the backend.
    #[serde(alias = "_id", deserialize_with = "de_reference")]
    pub id: String,

    #[serde(flatten)]
    pub draft: RuleDraft,
}

/// The editable part of a [`Rule`], used for creation and updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    /// The workshop this rule schedules; never dereferenced by the engine.
    #[serde(alias = "workshop", deserialize_with = "de_reference")]
    pub workshop_id: String,

    /// Label of the room or resource the sessions take place in.
    #[serde(default)]
    pub studio: String,

    /// Local start time, `HH:mm`. Kept verbatim so a malformed value only affects this rule.
    pub start_time: String,

    /// Length of each session in minutes.
    #[serde(rename = "durationMin", alias = "durationMinutes")]
    pub duration_minutes: u32,

    /// Recurrence string, see [`RecurrenceDescriptor`].
    #[serde(rename = "rrule", alias = "recurrence", default)]
    pub recurrence: String,

    /// Legacy free-text day name used when the recurrence string has no weekday.
    #[serde(
        default,
        alias = "dayOfWeek",
        alias = "day",
        skip_serializing_if = "Option::is_none"
    )]
    pub day_hint: Option<String>,

    /// IANA zone the start time is interpreted in; the run's default zone when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// First date the rule may produce sessions on.
    #[serde(default, deserialize_with = "de_loose_date_opt")]
    pub effective_from: Option<Date>,

    /// Dates on which the rule produces nothing.
    #[serde(default, deserialize_with = "de_loose_dates")]
    pub exceptions: Vec<Date>,

    /// Inactive rules are kept but never expanded.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Rule {
    /// Creates a rule from its identifier and draft.
    pub fn new(id: impl Into<String>, draft: RuleDraft) -> Self {
        Self {
            id: id.into(),
            draft,
        }
    }

    /// Parses the recurrence string, falling back to the legacy day hint.
    pub fn descriptor(&self) -> RecurrenceDescriptor {
        RecurrenceDescriptor::parse(&self.recurrence, self.day_hint.as_deref())
    }
}

impl std::ops::Deref for Rule {
    type Target = RuleDraft;

    fn deref(&self) -> &Self::Target {
        &self.draft
    }
}

impl std::ops::DerefMut for Rule {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.draft
    }
}

impl RuleDraft {
    /// A weekly draft with sensible defaults, mostly used by tests and the command line.
    pub fn new(
        workshop_id: impl Into<String>,
        studio: impl Into<String>,
        start_time: impl Into<String>,
        duration_minutes: u32,
        recurrence: impl Into<String>,
    ) -> Self {
        Self {
            workshop_id: workshop_id.into(),
            studio: studio.into(),
            start_time: start_time.into(),
            duration_minutes,
            recurrence: recurrence.into(),
            day_hint: None,
            timezone: None,
            effective_from: None,
            exceptions: Vec::new(),
            is_active: true,
        }
    }
}

/// Normalizes a reference that may arrive as a string, a number or an embedded object
/// carrying `id`, `_id` or `$oid`, into the canonical string identifier.
///
/// Returns `None` for empty strings and shapes that carry no identifier.
pub fn resolve_reference(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["id", "_id", "$oid"]
            .into_iter()
            .filter_map(|key| map.get(key))
            .find_map(resolve_reference),
        _ => None,
    }
}

const fn default_active() -> bool {
    true
}

fn de_reference<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    resolve_reference(&value)
        .ok_or_else(|| de::Error::custom(format!("invalid reference: {value}")))
}

/// Accepts `YYYY-MM-DD` as well as full ISO-8601 timestamps, keeping the date part.
fn parse_loose_date(s: &str) -> Option<Date> {
    s.trim().get(..10)?.parse().ok()
}

fn de_loose_date_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_loose_date(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {s}"))),
    }
}

fn de_loose_dates<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Date>, D::Error> {
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .iter()
        .filter_map(|s| {
            let date = parse_loose_date(s);
            if date.is_none() {
                tracing::warn!(value = %s, "ignoring malformed exception date");
            }
            date
        })
        .collect())
}
