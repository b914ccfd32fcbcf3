// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for gateway device control.
//!
//! This module provides type-safe representations of values used in device
//! commands and state. Each type ensures values are within their valid
//! ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`OutletPower`] - On/Off state of a smart outlet
//! - [`BlindPosition`] - Blind position in percent (0.0-100.0)
//! - [`BatteryLevel`] - Battery charge in percent (0-100)

mod battery;
mod blind_position;
mod outlet_power;

pub use battery::BatteryLevel;
pub use blind_position::BlindPosition;
pub use outlet_power::OutletPower;
