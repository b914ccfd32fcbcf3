// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport seam to the gateway.
//!
//! The secure session and wire protocol live outside this library. What the
//! library needs is captured by two small traits: [`Transport`], the
//! operations of one live gateway session, and [`Connect`], the factory
//! that builds a fresh session from credentials. The
//! [`accessor`](crate::accessor) module drives both: it holds the current
//! session and, on a transient failure, asks the factory for a replacement
//! instead of patching the old one.

use crate::config::Credentials;
use crate::device::{Device, DeviceId};
use crate::error::TransportError;
use crate::types::{BlindPosition, OutletPower};

/// Operations of one live gateway session.
///
/// All methods report failures as [`TransportError`]; the retry policy on
/// top of this trait decides which of those are worth a reconnect.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Lists every device the gateway knows.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the response cannot
    /// be decoded.
    async fn list_devices(&self) -> Result<Vec<Device>, TransportError>;

    /// Fetches a single device snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MalformedId`] when the gateway rejects the
    /// identifier, or another `TransportError` for session failures.
    async fn get_device(&self, id: DeviceId) -> Result<Device, TransportError>;

    /// Sets the relay state of an outlet.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the write fails.
    async fn set_outlet_power(
        &self,
        id: DeviceId,
        power: OutletPower,
    ) -> Result<(), TransportError>;

    /// Sets the position of a blind.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the write fails.
    async fn set_blind_position(
        &self,
        id: DeviceId,
        position: BlindPosition,
    ) -> Result<(), TransportError>;
}

/// Factory capability that opens gateway sessions.
///
/// Reconnection goes through this trait: the accessor never repairs a
/// session in place, it asks for a new one and drops the old.
#[allow(async_fn_in_trait)]
pub trait Connect {
    /// The session type this factory produces.
    type Session: Transport;

    /// Opens a new authenticated session against the gateway.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the connection or authentication fails.
    async fn connect(&self, credentials: &Credentials) -> Result<Self::Session, TransportError>;
}
