// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation of device snapshots as table rows.
//!
//! One device becomes one [`DisplayRow`] of plain display cells: id, type
//! label, humanized last-seen, kind-specific state glyph, battery glyph,
//! name. The cells are strings only; alignment is the
//! [`TableFormatter`](super::TableFormatter)'s job.

use chrono::{DateTime, Utc};

use crate::device::{Device, DeviceKind};
use crate::types::OutletPower;

use super::width::{BATTERY_GLYPH, KEYCAP_ONE, KEYCAP_ZERO, RULER_GLYPH};

/// One device rendered as an ordered sequence of display cells.
///
/// Built, rendered and discarded within a single listing call.
pub type DisplayRow = Vec<String>;

/// Header matching the cells produced by [`present`].
pub const DEVICE_TABLE_HEADER: [&str; 6] = ["ID", "Type", "Seen", "State", "Battery", "Name"];

/// Reported last-seen values below this threshold are taken to be elapsed
/// seconds rather than an absolute epoch when the naive reading puts the
/// device more than a year in the past. 1e7 seconds is roughly 116 days, so
/// a genuine epoch under the threshold would date from early 1970.
const ELAPSED_SECONDS_CUTOFF: i64 = 10_000_000;

const HOUR_SECS: i64 = 3600;
const DAY_SECS: i64 = 24 * HOUR_SECS;
const YEAR_SECS: i64 = 365 * DAY_SECS;

/// Maps a device snapshot to its display cells.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tradgw_lib::device::{Device, DeviceId, DeviceKind};
/// use tradgw_lib::format::present;
/// use tradgw_lib::types::{BatteryLevel, OutletPower};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// let device = Device {
///     id: DeviceId::new(65540),
///     name: "Kitchen outlet".to_string(),
///     alive: true,
///     last_seen: now.timestamp() - 3 * 3600,
///     created_at: 1_650_000_000,
///     battery: BatteryLevel::default(),
///     kind: DeviceKind::Outlet { power: OutletPower::On },
/// };
///
/// let row = present(&device, now);
/// assert_eq!(row[0], "65540");
/// assert_eq!(row[1], "Outlet");
/// assert_eq!(row[2], "3h 00m");
/// ```
#[must_use]
pub fn present(device: &Device, now: DateTime<Utc>) -> DisplayRow {
    vec![
        device.id.to_string(),
        device.kind.label().to_string(),
        humanize_last_seen(device.last_seen, device.created_at, now),
        state_cell(&device.kind),
        battery_cell(device),
        device.name.clone(),
    ]
}

/// Humanizes a device's last-seen timestamp relative to `now`.
///
/// The reported value is nominally an absolute Unix epoch, but some device
/// firmware populates it with seconds elapsed since last seen instead. When
/// the naive reading yields more than a year of silence *and* the raw value
/// is small enough to be implausible as an epoch, the value is reinterpreted
/// as "seconds ago". The threshold is a heuristic: a device genuinely last
/// seen in early 1970 would be misread, which no real gateway reports.
///
/// Buckets, after the possible correction:
/// - over a year: the registration date, `YYYY-MM-DD`
/// - over a week: `"N days"`, rounded
/// - over a day: `"D days H hours"`, days floored
/// - over ten hours: `"N hours"`, rounded
/// - otherwise: `"Hh MMm"`, hours floored, minutes zero-padded
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn humanize_last_seen(last_seen: i64, created_at: i64, now: DateTime<Utc>) -> String {
    let now_epoch = now.timestamp();
    let mut elapsed = now_epoch - last_seen;

    // Firmware defect: the field held "seconds ago", not an epoch.
    if elapsed > YEAR_SECS && last_seen < ELAPSED_SECONDS_CUTOFF {
        elapsed = last_seen;
    }
    let elapsed = elapsed.max(0);

    if elapsed > YEAR_SECS {
        return DateTime::<Utc>::from_timestamp(created_at, 0)
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
    }

    let hours = elapsed as f64 / 3600.0;
    let minutes = elapsed as f64 / 60.0;

    if elapsed > 7 * DAY_SECS {
        format!("{} days", (hours / 24.0).round() as i64)
    } else if elapsed > DAY_SECS {
        let days = (hours / 24.0).floor();
        let rem_hours = (hours.round() - days * 24.0) as i64;
        format!("{} days {} hours", days as i64, rem_hours)
    } else if elapsed > 10 * HOUR_SECS {
        format!("{} hours", hours.round() as i64)
    } else {
        let whole_hours = hours.floor();
        let rem_minutes = (minutes.round() - whole_hours * 60.0) as i64;
        format!("{}h {:02}m", whole_hours as i64, rem_minutes)
    }
}

/// Kind-specific state cell: keycap digit for outlets, ruler glyph plus
/// position for blinds, empty for everything else.
fn state_cell(kind: &DeviceKind) -> String {
    match kind {
        DeviceKind::Outlet { power } => match power {
            OutletPower::On => KEYCAP_ONE.to_string(),
            OutletPower::Off => KEYCAP_ZERO.to_string(),
        },
        DeviceKind::Blind { position } => {
            format!("{RULER_GLYPH}{}%", position.as_percent())
        }
        _ => String::new(),
    }
}

/// Battery cell, suppressed for a zero reading.
fn battery_cell(device: &Device) -> String {
    if device.battery.is_unreported() {
        String::new()
    } else {
        format!("{BATTERY_GLYPH}{}", device.battery)
    }
}
