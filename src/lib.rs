// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `TradGW` Lib - A Rust library to query and control smart devices behind
//! a Trådfri-style home gateway.
//!
//! The secure transport and wire protocol are consumed as a capability
//! (the [`transport::Transport`] and [`transport::Connect`] traits); this
//! library supplies the policy and presentation layers on top:
//!
//! - **Resilient reads**: one reconnect-and-retry around device fetches,
//!   with bad identifiers failing fast
//! - **Write avoidance**: commands are only sent when they would change
//!   device state, with a write-through exception for the blind
//!   spurious-zero firmware bug
//! - **Device listings**: aligned, box-drawn tables whose columns stay
//!   straight even when cells carry wide symbolic glyphs
//!
//! # Quick Start
//!
//! ```no_run
//! use tradgw_lib::ResilientDeviceAccessor;
//! use tradgw_lib::config::Credentials;
//! use tradgw_lib::device::DeviceId;
//! use tradgw_lib::transport::Connect;
//!
//! # async fn example<C: Connect>(connector: C) -> tradgw_lib::Result<()> {
//! let credentials = Credentials::load("gateway.key.json")?;
//! let accessor = ResilientDeviceAccessor::connect(connector, credentials).await?;
//!
//! // Render the device listing.
//! println!("{}", accessor.device_table(false).await?);
//!
//! // Turn an outlet on; the write is skipped if it is already on.
//! accessor.turn_outlet_on(DeviceId::new(65540)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Rendering Without a Gateway
//!
//! The presentation layer works on plain snapshots and needs no
//! connection:
//!
//! ```
//! use tradgw_lib::format::{TableFormatter, visible_width};
//!
//! let formatter = TableFormatter::new();
//! let table = formatter.render(
//!     &["ID", "Name"],
//!     &[vec!["65540".to_string(), "Kitchen outlet".to_string()]],
//! )?;
//!
//! // Every line of a rendered table has the same visible width.
//! let widths: Vec<usize> = table.lines().map(visible_width).collect();
//! assert!(widths.iter().all(|w| *w == widths[0]));
//! # Ok::<(), tradgw_lib::error::TableError>(())
//! ```

mod accessor;
pub mod config;
pub mod device;
pub mod error;
pub mod format;
pub mod policy;
pub mod transport;
pub mod types;

pub use accessor::ResilientDeviceAccessor;
pub use config::Credentials;
pub use device::{Device, DeviceId, DeviceKind, RawDeviceRecord};
pub use error::{Error, Result, TableError, TransportError, ValueError};
pub use format::{TableFormatter, WidthTable, render_battery_table, render_device_table};
pub use types::{BatteryLevel, BlindPosition, OutletPower};
