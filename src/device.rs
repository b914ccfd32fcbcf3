// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device model for gateway-attached devices.
//!
//! The gateway reports every device as one flat record with a numeric type
//! code and a handful of optional control fields. This module decodes that
//! record into a [`Device`] whose control state lives in a [`DeviceKind`]
//! variant, so outlet power or blind position can only be read after
//! matching on the kind.

use std::fmt;

use serde::Deserialize;

use crate::error::{TransportError, ValueError};
use crate::types::{BatteryLevel, BlindPosition, OutletPower};

/// Stable unique identifier of a gateway device.
///
/// # Examples
///
/// ```
/// use tradgw_lib::device::DeviceId;
///
/// let id = DeviceId::new(65554);
/// assert_eq!(id.value(), 65554);
/// assert_eq!(id.to_string(), "65554");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    /// Creates a device identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DeviceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Kind of a gateway device, with kind-specific control state.
///
/// The wire type codes are 0 (remote), 3 (outlet), 4 (motion sensor),
/// 6 (signal repeater) and 7 (blind); every other code is preserved as
/// [`DeviceKind::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceKind {
    /// Handheld remote control.
    Remote,
    /// Smart outlet with its current power state.
    Outlet {
        /// Current relay state.
        power: OutletPower,
    },
    /// Motion sensor.
    Motion,
    /// Signal repeater.
    Repeater,
    /// Motorized blind with its current position.
    Blind {
        /// Current position in percent.
        position: BlindPosition,
    },
    /// A type code this library does not know.
    Unknown {
        /// The raw wire type code.
        type_code: u16,
    },
}

impl DeviceKind {
    /// Returns the wire type code for this kind.
    #[must_use]
    pub const fn type_code(&self) -> u16 {
        match self {
            Self::Remote => 0,
            Self::Outlet { .. } => 3,
            Self::Motion => 4,
            Self::Repeater => 6,
            Self::Blind { .. } => 7,
            Self::Unknown { type_code } => *type_code,
        }
    }

    /// Returns the label used in device listings.
    ///
    /// Unknown codes render as `"Unknow"`, kept verbatim from the gateway
    /// firmware's own listing output so scripted consumers keep matching.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Outlet { .. } => "Outlet",
            Self::Motion => "Motion",
            Self::Repeater => "Repeater",
            Self::Blind { .. } => "Blind",
            Self::Unknown { .. } => "Unknow",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Snapshot of one gateway device.
///
/// Devices are never mutated by this library; state changes go through the
/// transport and show up in the next snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Stable unique identifier.
    pub id: DeviceId,
    /// Display name configured on the gateway.
    pub name: String,
    /// Whether the gateway currently considers the device reachable.
    pub alive: bool,
    /// Last-seen timestamp as reported, nominally Unix seconds.
    ///
    /// Some device firmware erroneously reports seconds elapsed since last
    /// seen instead of an absolute epoch; see
    /// [`humanize_last_seen`](crate::format::humanize_last_seen).
    pub last_seen: i64,
    /// Registration time, Unix seconds.
    pub created_at: i64,
    /// Battery charge; zero means unreported.
    pub battery: BatteryLevel,
    /// Device kind with kind-specific control state.
    pub kind: DeviceKind,
}

impl Device {
    /// Decodes a raw gateway record into a typed device.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MissingField`] when a typed device lacks
    /// its control field, or [`TransportError::MalformedResponse`] when a
    /// field value is out of range.
    pub fn from_raw(raw: RawDeviceRecord) -> Result<Self, TransportError> {
        let kind = match raw.device_type {
            0 => DeviceKind::Remote,
            3 => {
                let power = raw
                    .outlet_power
                    .ok_or(TransportError::MissingField("outletPower"))?;
                DeviceKind::Outlet {
                    power: OutletPower::from_num(power),
                }
            }
            4 => DeviceKind::Motion,
            6 => DeviceKind::Repeater,
            7 => {
                let position = raw
                    .blind_position
                    .ok_or(TransportError::MissingField("blindPosition"))?;
                DeviceKind::Blind {
                    position: BlindPosition::new(position).map_err(malformed)?,
                }
            }
            other => DeviceKind::Unknown { type_code: other },
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            alive: raw.alive != 0,
            last_seen: raw.last_seen_epoch,
            created_at: raw.created_at_epoch,
            battery: BatteryLevel::new(raw.battery_percent).map_err(malformed)?,
            kind,
        })
    }

    /// Returns the outlet power state, if this device is an outlet.
    #[must_use]
    pub const fn outlet_power(&self) -> Option<OutletPower> {
        match self.kind {
            DeviceKind::Outlet { power } => Some(power),
            _ => None,
        }
    }

    /// Returns the blind position, if this device is a blind.
    #[must_use]
    pub const fn blind_position(&self) -> Option<BlindPosition> {
        match self.kind {
            DeviceKind::Blind { position } => Some(position),
            _ => None,
        }
    }
}

fn malformed(err: ValueError) -> TransportError {
    TransportError::MalformedResponse(err.to_string())
}

/// Flat device record as the gateway reports it.
///
/// Control fields are optional on the wire; [`Device::from_raw`] enforces
/// that the field matching the type code is present.
///
/// # Examples
///
/// ```
/// use tradgw_lib::device::{Device, DeviceKind, RawDeviceRecord};
///
/// let raw: RawDeviceRecord = serde_json::from_str(
///     r#"{
///         "id": 65540,
///         "name": "Kitchen outlet",
///         "deviceType": 3,
///         "alive": 1,
///         "lastSeenEpoch": 1700000000,
///         "createdAtEpoch": 1650000000,
///         "batteryPercent": 0,
///         "outletPower": 1
///     }"#,
/// )?;
///
/// let device = Device::from_raw(raw).unwrap();
/// assert!(matches!(device.kind, DeviceKind::Outlet { .. }));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeviceRecord {
    /// Stable unique identifier.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Numeric type code.
    pub device_type: u16,
    /// Reachability flag, 0 or 1.
    pub alive: u8,
    /// Last-seen timestamp, nominally Unix seconds.
    pub last_seen_epoch: i64,
    /// Registration time, Unix seconds.
    pub created_at_epoch: i64,
    /// Battery charge in percent, 0 when unreported.
    #[serde(default)]
    pub battery_percent: u8,
    /// Outlet relay state, present only for outlets.
    #[serde(default)]
    pub outlet_power: Option<u8>,
    /// Blind position, present only for blinds.
    #[serde(default)]
    pub blind_position: Option<f32>,
}
