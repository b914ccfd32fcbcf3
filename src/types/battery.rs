// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery charge level.

use std::fmt;

use crate::error::ValueError;

/// Battery charge of a device, in percent (0-100).
///
/// Gateways report 0 both for devices without a battery sensor and for a
/// genuinely flat battery; the two cannot be told apart on the wire.
/// Listings therefore suppress the battery column for a zero reading rather
/// than guessing.
///
/// # Examples
///
/// ```
/// use tradgw_lib::types::BatteryLevel;
///
/// let level = BatteryLevel::new(87)?;
/// assert_eq!(level.percent(), 87);
/// assert!(!level.is_unreported());
///
/// assert!(BatteryLevel::new(0)?.is_unreported());
/// assert!(BatteryLevel::new(101).is_err());
/// # Ok::<(), tradgw_lib::error::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// Creates a new battery level.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidBatteryLevel`] if the value exceeds 100.
    pub fn new(percent: u8) -> Result<Self, ValueError> {
        if percent > 100 {
            return Err(ValueError::InvalidBatteryLevel(u16::from(percent)));
        }
        Ok(Self(percent))
    }

    /// Returns the charge in percent.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Returns `true` for a zero reading.
    ///
    /// Zero means either "no battery sensor" or "flat battery"; the wire
    /// format does not distinguish them.
    #[must_use]
    pub const fn is_unreported(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
