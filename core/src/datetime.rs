// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

mod combine;
mod nth_weekday;
mod time_of_day;

pub use combine::{add_minutes, combine};
pub use nth_weekday::nth_weekday_of_month;
pub use time_of_day::TimeOfDay;
