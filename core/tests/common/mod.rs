// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Rule factories (fixtures)
//! - An in-memory rule backend with failure injection
//! - Custom assertion helpers

mod assertions;
mod backend;
mod fixtures;

#[allow(unused_imports)]
pub use assertions::{assert_sorted, assert_window, assert_zoned};
#[allow(unused_imports)]
pub use backend::{MemoryBackend, MemoryError};
#[allow(unused_imports)]
pub use fixtures::{berlin, monthly_rule, test_config, weekly_rule};
