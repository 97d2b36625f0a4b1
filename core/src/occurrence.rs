// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rule::Rule;

/// Namespace for occurrence identifiers; changing it changes every booking reference.
const OCCURRENCE_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c2e_9b84_5d07_a1c3_0e5f_7d92_4b18);

/// One concrete, dated session produced by expanding a [`Rule`] over a window.
///
/// Occurrences are recomputed on every request and never stored; the `id` is stable across
/// runs, so consumers may use it to build booking references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: String,
    pub rule_id: String,
    pub workshop_id: String,
    pub studio: String,
    pub duration_minutes: u32,

    /// Calendar date the occurrence was generated for, in the rule's zone.
    pub date: Date,
    pub start: Zoned,
    pub end: Zoned,
}

impl Occurrence {
    pub(crate) fn new(rule: &Rule, date: Date, start: Zoned, end: Zoned) -> Self {
        Self {
            id: occurrence_id(&rule.id, date),
            rule_id: rule.id.clone(),
            workshop_id: rule.workshop_id.clone(),
            studio: rule.studio.clone(),
            duration_minutes: rule.duration_minutes,
            date,
            start,
            end,
        }
    }
}

/// Deterministic identifier for the occurrence of `rule_id` on `date`.
pub fn occurrence_id(rule_id: &str, date: Date) -> String {
    let name = format!("{rule_id}/{date}");
    Uuid::new_v5(&OCCURRENCE_NAMESPACE, name.as_bytes()).to_string()
}
