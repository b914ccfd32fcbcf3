// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full device listings rendered as tables.
//!
//! These functions tie the presentation pipeline together: sort and filter
//! the snapshots, map each device to a [`DisplayRow`](super::DisplayRow),
//! and hand the rows to the [`TableFormatter`](super::TableFormatter).

use chrono::{DateTime, Utc};

use crate::device::{Device, DeviceKind};
use crate::error::Result;

use super::table::TableFormatter;
use super::view::{DEVICE_TABLE_HEADER, present};
use super::width::BATTERY_GLYPH;

/// Renders all devices as one aligned table string.
///
/// Devices are ordered by id, then grouped by type code, with unreachable
/// devices sorted first. Unreachable devices are hidden unless
/// `include_dead` is set.
///
/// # Errors
///
/// Returns an error only if table rendering fails, which cannot happen for
/// rows built here; the `Result` keeps the signature uniform with other
/// fallible listing calls.
pub fn render_device_table(
    devices: &[Device],
    now: DateTime<Utc>,
    include_dead: bool,
) -> Result<String> {
    let mut devices: Vec<&Device> = devices
        .iter()
        .filter(|device| include_dead || device.alive)
        .collect();
    devices.sort_by_key(|device| device.id);
    devices.sort_by_key(|device| device.kind.type_code());
    devices.sort_by_key(|device| device.alive);

    let rows: Vec<Vec<String>> = devices
        .iter()
        .map(|device| present(device, now))
        .collect();

    let table = TableFormatter::new().render(&DEVICE_TABLE_HEADER, &rows)?;
    Ok(table)
}

/// Renders a name/battery table for battery-powered devices.
///
/// Only reachable remotes, motion sensors and blinds appear, sorted by
/// name.
///
/// # Errors
///
/// Same as [`render_device_table`].
pub fn render_battery_table(devices: &[Device]) -> Result<String> {
    let mut devices: Vec<&Device> = devices
        .iter()
        .filter(|device| {
            device.alive
                && matches!(
                    device.kind,
                    DeviceKind::Remote | DeviceKind::Motion | DeviceKind::Blind { .. }
                )
        })
        .collect();
    devices.sort_by(|a, b| a.name.cmp(&b.name));

    let rows: Vec<Vec<String>> = devices
        .iter()
        .map(|device| vec![device.name.clone(), device.battery.to_string()])
        .collect();

    let table = TableFormatter::new().render(&["Name", BATTERY_GLYPH], &rows)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::device::DeviceId;
    use crate::types::{BatteryLevel, BlindPosition, OutletPower};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn device(id: u32, name: &str, alive: bool, kind: DeviceKind, battery: u8) -> Device {
        Device {
            id: DeviceId::new(id),
            name: name.to_string(),
            alive,
            last_seen: now().timestamp() - 300,
            created_at: 1_650_000_000,
            battery: BatteryLevel::new(battery).unwrap(),
            kind,
        }
    }

    fn fixture() -> Vec<Device> {
        vec![
            device(
                65552,
                "Hall blind",
                true,
                DeviceKind::Blind {
                    position: BlindPosition::new(40.0).unwrap(),
                },
                74,
            ),
            device(
                65540,
                "Kitchen outlet",
                true,
                DeviceKind::Outlet {
                    power: OutletPower::On,
                },
                0,
            ),
            device(65541, "Old remote", false, DeviceKind::Remote, 12),
            device(65545, "Sofa remote", true, DeviceKind::Remote, 87),
        ]
    }

    #[test]
    fn dead_devices_hidden_by_default() {
        let table = render_device_table(&fixture(), now(), false).unwrap();
        assert!(!table.contains("Old remote"));
        assert!(table.contains("Sofa remote"));
    }

    #[test]
    fn dead_devices_listed_first_when_included() {
        let table = render_device_table(&fixture(), now(), true).unwrap();
        let dead_line = table.lines().position(|l| l.contains("Old remote"));
        let alive_line = table.lines().position(|l| l.contains("Sofa remote"));
        assert!(dead_line.unwrap() < alive_line.unwrap());
    }

    #[test]
    fn devices_grouped_by_type_code() {
        let table = render_device_table(&fixture(), now(), false).unwrap();
        let position = |name: &str| table.lines().position(|l| l.contains(name)).unwrap();
        // Remote (0) before Outlet (3) before Blind (7).
        assert!(position("Sofa remote") < position("Kitchen outlet"));
        assert!(position("Kitchen outlet") < position("Hall blind"));
    }

    #[test]
    fn all_lines_share_one_visible_width() {
        use crate::format::width::visible_width;
        let table = render_device_table(&fixture(), now(), true).unwrap();
        let mut widths = table.lines().map(visible_width);
        let first = widths.next().unwrap();
        assert!(widths.all(|w| w == first));
    }

    #[test]
    fn battery_table_filters_and_sorts_by_name() {
        let table = render_battery_table(&fixture()).unwrap();
        // Outlets never appear; dead remotes neither.
        assert!(!table.contains("Kitchen outlet"));
        assert!(!table.contains("Old remote"));
        let position = |name: &str| table.lines().position(|l| l.contains(name)).unwrap();
        assert!(position("Hall blind") < position("Sofa remote"));
        assert!(table.contains("74%"));
        assert!(table.contains("87%"));
    }

    #[test]
    fn empty_device_list_renders_header_only() {
        let table = render_device_table(&[], now(), true).unwrap();
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("ID"));
    }
}
