// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blind position value.

use std::fmt;

use crate::error::ValueError;

/// Position of a blind, in percent.
///
/// The gateway reports blind positions as a float between 0.0 (fully open)
/// and 100.0 (fully closed).
///
/// Note that some blind firmware spuriously reports 0.0 even when the blind
/// is not at position 0; see
/// [`needs_blind_write`](crate::policy::needs_blind_write) for how commands
/// compensate.
///
/// # Examples
///
/// ```
/// use tradgw_lib::types::BlindPosition;
///
/// let pos = BlindPosition::new(62.5)?;
/// assert_eq!(pos.value(), 62.5);
/// assert_eq!(pos.as_percent(), 62);
///
/// assert!(BlindPosition::new(120.0).is_err());
/// # Ok::<(), tradgw_lib::error::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlindPosition(f32);

impl BlindPosition {
    /// A fully open blind.
    pub const OPEN: Self = Self(0.0);

    /// A fully closed blind.
    pub const CLOSED: Self = Self(100.0);

    /// Creates a new blind position.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidBlindPosition`] if the value is outside
    /// 0.0–100.0 or not finite.
    pub fn new(value: f32) -> Result<Self, ValueError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValueError::InvalidBlindPosition(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw position value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Returns the position truncated to a whole percent, as shown in
    /// device listings.
    #[must_use]
    pub fn as_percent(&self) -> u8 {
        // Range is checked at construction, so the cast cannot wrap.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = self.0 as u8;
        percent
    }
}

impl fmt::Display for BlindPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
