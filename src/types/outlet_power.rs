// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of a smart outlet.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the power state of a smart outlet.
///
/// The gateway encodes outlet power as 0 (off) or 1 (on).
///
/// # Examples
///
/// ```
/// use tradgw_lib::types::OutletPower;
///
/// let on = OutletPower::On;
/// let off = OutletPower::Off;
///
/// assert_eq!(on.as_num(), 1);
/// assert_eq!(off.as_num(), 0);
/// assert!(on.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutletPower {
    /// Outlet is off.
    Off,
    /// Outlet is on.
    On,
}

impl OutletPower {
    /// Returns the numeric value used on the wire.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Returns `true` when the outlet is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Decodes the wire value (0 or 1).
    ///
    /// Any nonzero value is treated as on, matching gateway behavior.
    #[must_use]
    pub const fn from_num(value: u8) -> Self {
        if value == 0 { Self::Off } else { Self::On }
    }
}

impl fmt::Display for OutletPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "Off"),
            Self::On => write!(f, "On"),
        }
    }
}

impl FromStr for OutletPower {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            _ => Err(ValueError::InvalidOutletPower(s.to_string())),
        }
    }
}

impl From<bool> for OutletPower {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
