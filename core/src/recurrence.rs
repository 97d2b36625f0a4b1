// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

mod descriptor;
mod weekday;

pub use descriptor::{Frequency, RecurrenceDescriptor};
pub use weekday::Weekday;
