// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod anchor;
mod util;

pub use anchor::DateAnchor;
pub use util::{RangePosition, STABLE_FORMAT_DATEONLY, STABLE_FORMAT_DATETIME};
pub(crate) use util::{shift_days, start_of_day, week_start};
