// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides test data factories for rooms, events and windows.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{
    at, booking, cleaning, date, maintenance, sample_rooms, test_config, week_of, write_temp_file,
};
