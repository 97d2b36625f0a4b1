// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Command line front end of Atelier: manage recurring rules and list the sessions they
//! generate.

mod arg;
mod cli;
mod cmd_generate_completion;
mod cmd_rule;
mod cmd_sessions;
mod config;
mod occurrence_formatter;
mod rule_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
