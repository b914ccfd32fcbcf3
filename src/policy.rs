// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write-avoidance policy for device commands.
//!
//! The gateway applies writes unconditionally, so it is up to the client to
//! skip commands that would not change anything. The predicates here
//! compare the observed state against the target and decide whether a write
//! must go out. Blinds get one exception: firmware sometimes reports
//! position 0 for a blind that is not actually at 0, so a zero target is
//! always written through rather than trusted against the cached value.

use crate::device::{Device, DeviceKind};
use crate::error::Error;
use crate::types::{BlindPosition, OutletPower};

/// Decides whether a blind position write must be issued.
///
/// Returns `true` when the target differs from the current position, and
/// always for a zero target (the spurious-zero firmware bug).
///
/// # Examples
///
/// ```
/// use tradgw_lib::policy::needs_blind_write;
/// use tradgw_lib::types::BlindPosition;
///
/// let at = |v| BlindPosition::new(v).unwrap();
///
/// assert!(!needs_blind_write(at(50.0), at(50.0)));
/// assert!(needs_blind_write(at(30.0), at(60.0)));
/// // Zero targets are always written through.
/// assert!(needs_blind_write(at(0.0), at(0.0)));
/// ```
#[must_use]
pub fn needs_blind_write(current: BlindPosition, target: BlindPosition) -> bool {
    current.value() != target.value() || target.value() == 0.0
}

/// Decides whether an outlet power write must be issued.
///
/// Plain comparison; outlets have no known reporting defect.
#[must_use]
pub fn needs_outlet_write(current: OutletPower, target: OutletPower) -> bool {
    current != target
}

/// Applies [`needs_blind_write`] to a device snapshot.
///
/// # Errors
///
/// Returns [`Error::WrongDeviceType`] when the device is not a blind.
pub fn blind_write_needed(device: &Device, target: BlindPosition) -> Result<bool, Error> {
    match device.kind {
        DeviceKind::Blind { position } => Ok(needs_blind_write(position, target)),
        ref other => Err(Error::WrongDeviceType {
            id: device.id,
            expected: "Blind",
            actual: other.label().to_string(),
        }),
    }
}

/// Applies [`needs_outlet_write`] to a device snapshot.
///
/// # Errors
///
/// Returns [`Error::WrongDeviceType`] when the device is not an outlet.
pub fn outlet_write_needed(device: &Device, target: OutletPower) -> Result<bool, Error> {
    match device.kind {
        DeviceKind::Outlet { power } => Ok(needs_outlet_write(power, target)),
        ref other => Err(Error::WrongDeviceType {
            id: device.id,
            expected: "Outlet",
            actual: other.label().to_string(),
        }),
    }
}
