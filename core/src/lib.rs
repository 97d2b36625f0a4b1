// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurring session scheduling: recurrence rules in, dated sessions out.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    unsafe_code,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

mod atelier;
mod coalesce;
mod config;
mod datetime;
mod expand;
mod occurrence;
mod recurrence;
mod rule;
mod store;

pub use crate::atelier::Atelier;
pub use crate::coalesce::RequestCoalescer;
pub use crate::config::{APP_NAME, Config};
pub use crate::datetime::{TimeOfDay, add_minutes, combine, nth_weekday_of_month};
pub use crate::expand::Expander;
pub use crate::occurrence::{Occurrence, occurrence_id};
pub use crate::recurrence::{Frequency, RecurrenceDescriptor, Weekday};
pub use crate::rule::{Rule, RuleDraft, resolve_reference};
pub use crate::store::{RuleBackend, RuleStore};
