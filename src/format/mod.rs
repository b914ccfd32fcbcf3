// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device listing presentation.
//!
//! This module turns device snapshots into aligned, boxed text tables:
//!
//! - [`WidthTable`] / [`visible_width`]: terminal width of glyph-bearing
//!   strings
//! - [`TableFormatter`]: box-drawn tables padded against visible width
//! - [`present`] / [`humanize_last_seen`]: one device as display cells
//! - [`render_device_table`] / [`render_battery_table`]: full listings
//!
//! Everything here is a pure function over immutable snapshots; rendering
//! never touches the transport.

mod listing;
mod table;
mod view;
mod width;

pub use listing::{render_battery_table, render_device_table};
pub use table::TableFormatter;
pub use view::{DEVICE_TABLE_HEADER, DisplayRow, humanize_last_seen, present};
pub use width::{
    BATTERY_GLYPH, KEYCAP_ONE, KEYCAP_ZERO, RULER_GLYPH, WidthTable, visible_width,
};
