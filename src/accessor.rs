// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resilient access to gateway devices.
//!
//! [`ResilientDeviceAccessor`] owns the live gateway session and wraps
//! every read in a one-shot recovery policy: a transient failure triggers
//! exactly one reconnect through the [`Connect`] factory followed by one
//! retry; a malformed-identifier failure is surfaced immediately, since no
//! reconnect can fix it. Writes are never retried.
//!
//! The accessor also carries the high-level command operations (outlet
//! power, blind position). Each one fetches a fresh snapshot, checks the
//! device kind, and consults the [`policy`](crate::policy) module so
//! redundant writes are suppressed instead of sent.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::config::Credentials;
use crate::device::{Device, DeviceId, DeviceKind};
use crate::error::{Error, Result};
use crate::format::{render_battery_table, render_device_table};
use crate::policy;
use crate::transport::{Connect, Transport};
use crate::types::{BlindPosition, OutletPower};

/// Gateway device accessor with a one-shot reconnect-and-retry policy.
///
/// The accessor holds the active session behind a lock; reconnection
/// replaces the session wholesale rather than repairing it, so a caller
/// never observes a half-reestablished connection.
///
/// # Examples
///
/// ```no_run
/// use tradgw_lib::ResilientDeviceAccessor;
/// use tradgw_lib::config::Credentials;
/// # use tradgw_lib::transport::Connect;
/// # async fn example<C: Connect>(connector: C) -> tradgw_lib::Result<()> {
/// let credentials = Credentials::load("gateway.key.json")?;
/// let accessor = ResilientDeviceAccessor::connect(connector, credentials).await?;
///
/// for device in accessor.list_devices().await? {
///     println!("{} {}", device.id, device.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ResilientDeviceAccessor<C: Connect> {
    connector: C,
    credentials: Credentials,
    session: RwLock<C::Session>,
}

impl<C: Connect> ResilientDeviceAccessor<C> {
    /// Opens the initial gateway session.
    ///
    /// # Errors
    ///
    /// Returns the transport failure if the first connection attempt fails;
    /// the initial connect is not retried.
    pub async fn connect(connector: C, credentials: Credentials) -> Result<Self> {
        let session = connector.connect(&credentials).await?;
        Ok(Self {
            connector,
            credentials,
            session: RwLock::new(session),
        })
    }

    /// Fetches a single device, retrying once after a reconnect.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDevice`] when the gateway rejects the identifier;
    ///   no reconnect is attempted.
    /// - [`Error::Access`] when the retried attempt fails too.
    pub async fn get_device(&self, id: DeviceId) -> Result<Device> {
        let first = self.session.read().await.get_device(id).await;
        let err = match first {
            Ok(device) => return Ok(device),
            Err(err) if err.is_invalid_device() => {
                return Err(Error::InvalidDevice { id, source: err });
            }
            Err(err) => err,
        };

        tracing::warn!(%id, error = %err, "Device read failed, reconnecting");
        self.reconnect().await?;

        self.session
            .read()
            .await
            .get_device(id)
            .await
            .map_err(|source| Error::Access { source })
    }

    /// Fetches all devices, retrying once after a reconnect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Access`] when the retried attempt fails too.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let first = self.session.read().await.list_devices().await;
        let err = match first {
            Ok(devices) => return Ok(devices),
            Err(err) => err,
        };

        tracing::warn!(error = %err, "Device list failed, reconnecting");
        self.reconnect().await?;

        self.session
            .read()
            .await
            .list_devices()
            .await
            .map_err(|source| Error::Access { source })
    }

    /// Fetches all devices of one wire type code.
    ///
    /// # Errors
    ///
    /// Same as [`list_devices`](Self::list_devices).
    pub async fn devices_of_type(&self, type_code: u16) -> Result<Vec<Device>> {
        let devices = self.list_devices().await?;
        Ok(devices
            .into_iter()
            .filter(|device| device.kind.type_code() == type_code)
            .collect())
    }

    /// Renders the device listing as an aligned table.
    ///
    /// Unreachable devices are hidden unless `include_dead` is set.
    ///
    /// # Errors
    ///
    /// Same as [`list_devices`](Self::list_devices).
    pub async fn device_table(&self, include_dead: bool) -> Result<String> {
        let devices = self.list_devices().await?;
        render_device_table(&devices, Utc::now(), include_dead)
    }

    /// Renders the battery listing for battery-powered devices.
    ///
    /// # Errors
    ///
    /// Same as [`list_devices`](Self::list_devices).
    pub async fn battery_table(&self) -> Result<String> {
        let devices = self.list_devices().await?;
        render_battery_table(&devices)
    }

    // ========== Outlet Control ==========

    /// Returns whether an outlet is currently on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongDeviceType`] when the device is not an outlet,
    /// plus the read errors of [`get_device`](Self::get_device).
    pub async fn is_outlet_on(&self, id: DeviceId) -> Result<bool> {
        let device = self.get_device(id).await?;
        match device.kind {
            DeviceKind::Outlet { power } => Ok(power.is_on()),
            ref other => Err(wrong_type(&device, "Outlet", other)),
        }
    }

    /// Turns an outlet on.
    ///
    /// # Errors
    ///
    /// Same as [`set_outlet_power`](Self::set_outlet_power).
    pub async fn turn_outlet_on(&self, id: DeviceId) -> Result<()> {
        self.set_outlet_power(id, OutletPower::On).await
    }

    /// Turns an outlet off.
    ///
    /// # Errors
    ///
    /// Same as [`set_outlet_power`](Self::set_outlet_power).
    pub async fn turn_outlet_off(&self, id: DeviceId) -> Result<()> {
        self.set_outlet_power(id, OutletPower::Off).await
    }

    /// Sets an outlet's power state, skipping the write when the outlet
    /// already reports the target state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongDeviceType`] for non-outlets,
    /// [`Error::Write`] when the issued write fails (never retried), plus
    /// the read errors of [`get_device`](Self::get_device).
    pub async fn set_outlet_power(&self, id: DeviceId, target: OutletPower) -> Result<()> {
        let device = self.get_device(id).await?;
        if !policy::outlet_write_needed(&device, target)? {
            tracing::debug!(%id, state = %target, "Outlet already in target state, write suppressed");
            return Ok(());
        }

        self.session
            .read()
            .await
            .set_outlet_power(id, target)
            .await
            .map_err(|source| Error::Write { source })?;
        tracing::info!(%id, name = %device.name, state = %target, "Outlet switched");
        Ok(())
    }

    // ========== Blind Control ==========

    /// Returns a blind's current position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongDeviceType`] when the device is not a blind,
    /// plus the read errors of [`get_device`](Self::get_device).
    pub async fn blind_position(&self, id: DeviceId) -> Result<BlindPosition> {
        let device = self.get_device(id).await?;
        match device.kind {
            DeviceKind::Blind { position } => Ok(position),
            ref other => Err(wrong_type(&device, "Blind", other)),
        }
    }

    /// Moves a blind to a target position.
    ///
    /// The write is skipped when the blind already reports the target
    /// position, except for a zero target, which is always written through
    /// because blind firmware can falsely report position 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongDeviceType`] for non-blinds, [`Error::Write`]
    /// when the issued write fails (never retried), plus the read errors of
    /// [`get_device`](Self::get_device).
    pub async fn set_blind_position(&self, id: DeviceId, target: BlindPosition) -> Result<()> {
        let device = self.get_device(id).await?;
        if !policy::blind_write_needed(&device, target)? {
            tracing::debug!(%id, position = %target, "Blind already at target position, write suppressed");
            return Ok(());
        }

        self.session
            .read()
            .await
            .set_blind_position(id, target)
            .await
            .map_err(|source| Error::Write { source })?;
        tracing::info!(%id, name = %device.name, position = %target, "Blind moved");
        Ok(())
    }

    /// Replaces the active session with a freshly authenticated one.
    async fn reconnect(&self) -> Result<()> {
        let fresh = self
            .connector
            .connect(&self.credentials)
            .await
            .map_err(|source| Error::Access { source })?;
        *self.session.write().await = fresh;
        tracing::debug!("Gateway session reestablished");
        Ok(())
    }
}

fn wrong_type(device: &Device, expected: &'static str, actual: &DeviceKind) -> Error {
    Error::WrongDeviceType {
        id: device.id,
        expected,
        actual: actual.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crate::error::TransportError;
    use crate::types::BatteryLevel;

    fn outlet(id: u32, power: OutletPower) -> Device {
        Device {
            id: DeviceId::new(id),
            name: "Kitchen outlet".to_string(),
            alive: true,
            last_seen: 1_700_000_000,
            created_at: 1_650_000_000,
            battery: BatteryLevel::default(),
            kind: DeviceKind::Outlet { power },
        }
    }

    fn blind(id: u32, position: f32) -> Device {
        Device {
            id: DeviceId::new(id),
            name: "Hall blind".to_string(),
            alive: true,
            last_seen: 1_700_000_000,
            created_at: 1_650_000_000,
            battery: BatteryLevel::new(80).unwrap(),
            kind: DeviceKind::Blind {
                position: BlindPosition::new(position).unwrap(),
            },
        }
    }

    fn transient() -> TransportError {
        TransportError::ConnectionFailed("peer reset".to_string())
    }

    #[derive(Default)]
    struct MockState {
        connects: usize,
        get_responses: VecDeque<std::result::Result<Device, TransportError>>,
        list_responses: VecDeque<std::result::Result<Vec<Device>, TransportError>>,
        writes: Vec<(DeviceId, String)>,
        fail_writes: bool,
    }

    #[derive(Clone)]
    struct MockGateway(Arc<Mutex<MockState>>);

    impl MockGateway {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(MockState::default())))
        }

        fn on_get(&self, response: std::result::Result<Device, TransportError>) {
            self.0.lock().unwrap().get_responses.push_back(response);
        }

        fn on_list(&self, response: std::result::Result<Vec<Device>, TransportError>) {
            self.0.lock().unwrap().list_responses.push_back(response);
        }

        fn fail_writes(&self) {
            self.0.lock().unwrap().fail_writes = true;
        }

        fn connects(&self) -> usize {
            self.0.lock().unwrap().connects
        }

        fn writes(&self) -> Vec<(DeviceId, String)> {
            self.0.lock().unwrap().writes.clone()
        }
    }

    struct MockSession(Arc<Mutex<MockState>>);

    impl Connect for MockGateway {
        type Session = MockSession;

        async fn connect(
            &self,
            _credentials: &Credentials,
        ) -> std::result::Result<MockSession, TransportError> {
            self.0.lock().unwrap().connects += 1;
            Ok(MockSession(Arc::clone(&self.0)))
        }
    }

    impl Transport for MockSession {
        async fn list_devices(&self) -> std::result::Result<Vec<Device>, TransportError> {
            self.0
                .lock()
                .unwrap()
                .list_responses
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get_device(&self, id: DeviceId) -> std::result::Result<Device, TransportError> {
            self.0
                .lock()
                .unwrap()
                .get_responses
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::MalformedId(id.to_string())))
        }

        async fn set_outlet_power(
            &self,
            id: DeviceId,
            power: OutletPower,
        ) -> std::result::Result<(), TransportError> {
            let mut state = self.0.lock().unwrap();
            if state.fail_writes {
                return Err(transient());
            }
            state.writes.push((id, format!("power={power}")));
            Ok(())
        }

        async fn set_blind_position(
            &self,
            id: DeviceId,
            position: BlindPosition,
        ) -> std::result::Result<(), TransportError> {
            let mut state = self.0.lock().unwrap();
            if state.fail_writes {
                return Err(transient());
            }
            state.writes.push((id, format!("position={position}")));
            Ok(())
        }
    }

    async fn accessor(gateway: &MockGateway) -> ResilientDeviceAccessor<MockGateway> {
        let credentials = Credentials::new("client", "gw:5684", "psk");
        ResilientDeviceAccessor::connect(gateway.clone(), credentials)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn get_device_succeeds_first_try_without_reconnect() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(outlet(65540, OutletPower::On)));
        let accessor = accessor(&gateway).await;

        let device = accessor.get_device(DeviceId::new(65540)).await.unwrap();
        assert_eq!(device.id, DeviceId::new(65540));
        // Only the initial connect.
        assert_eq!(gateway.connects(), 1);
    }

    #[tokio::test]
    async fn transient_failure_reconnects_once_and_retries() {
        let gateway = MockGateway::new();
        gateway.on_get(Err(transient()));
        gateway.on_get(Ok(outlet(65540, OutletPower::Off)));
        let accessor = accessor(&gateway).await;

        let device = accessor.get_device(DeviceId::new(65540)).await.unwrap();
        assert_eq!(device.outlet_power(), Some(OutletPower::Off));
        // Initial connect plus exactly one reconnect.
        assert_eq!(gateway.connects(), 2);
    }

    #[tokio::test]
    async fn second_failure_surfaces_access_error() {
        let gateway = MockGateway::new();
        gateway.on_get(Err(transient()));
        gateway.on_get(Err(transient()));
        let accessor = accessor(&gateway).await;

        let result = accessor.get_device(DeviceId::new(65540)).await;
        assert!(matches!(result.unwrap_err(), Error::Access { .. }));
        assert_eq!(gateway.connects(), 2);
    }

    #[tokio::test]
    async fn malformed_id_fails_fast_without_reconnect() {
        let gateway = MockGateway::new();
        gateway.on_get(Err(TransportError::MalformedId("65zzz".to_string())));
        let accessor = accessor(&gateway).await;

        let result = accessor.get_device(DeviceId::new(65540)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidDevice { .. }));
        assert_eq!(gateway.connects(), 1);
    }

    #[tokio::test]
    async fn list_devices_retries_once() {
        let gateway = MockGateway::new();
        gateway.on_list(Err(transient()));
        gateway.on_list(Ok(vec![outlet(65540, OutletPower::On), blind(65541, 30.0)]));
        let accessor = accessor(&gateway).await;

        let devices = accessor.list_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(gateway.connects(), 2);
    }

    #[tokio::test]
    async fn devices_of_type_filters_by_code() {
        let gateway = MockGateway::new();
        gateway.on_list(Ok(vec![outlet(65540, OutletPower::On), blind(65541, 30.0)]));
        let accessor = accessor(&gateway).await;

        let blinds = accessor.devices_of_type(7).await.unwrap();
        assert_eq!(blinds.len(), 1);
        assert_eq!(blinds[0].id, DeviceId::new(65541));
    }

    #[tokio::test]
    async fn outlet_write_suppressed_when_state_matches() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(outlet(65540, OutletPower::On)));
        let accessor = accessor(&gateway).await;

        accessor.turn_outlet_on(DeviceId::new(65540)).await.unwrap();
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn outlet_write_issued_on_state_change() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(outlet(65540, OutletPower::Off)));
        let accessor = accessor(&gateway).await;

        accessor.turn_outlet_on(DeviceId::new(65540)).await.unwrap();
        assert_eq!(
            gateway.writes(),
            vec![(DeviceId::new(65540), "power=On".to_string())]
        );
    }

    #[tokio::test]
    async fn outlet_command_rejects_blind() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(blind(65541, 30.0)));
        let accessor = accessor(&gateway).await;

        let result = accessor.turn_outlet_off(DeviceId::new(65541)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::WrongDeviceType {
                expected: "Outlet",
                ..
            }
        ));
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn blind_write_suppressed_when_position_matches() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(blind(65541, 50.0)));
        let accessor = accessor(&gateway).await;

        accessor
            .set_blind_position(DeviceId::new(65541), BlindPosition::new(50.0).unwrap())
            .await
            .unwrap();
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn blind_zero_target_writes_through() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(blind(65541, 0.0)));
        let accessor = accessor(&gateway).await;

        accessor
            .set_blind_position(DeviceId::new(65541), BlindPosition::OPEN)
            .await
            .unwrap();
        assert_eq!(
            gateway.writes(),
            vec![(DeviceId::new(65541), "position=0.00".to_string())]
        );
    }

    #[tokio::test]
    async fn failed_write_is_not_retried() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(blind(65541, 20.0)));
        gateway.fail_writes();
        let accessor = accessor(&gateway).await;

        let result = accessor
            .set_blind_position(DeviceId::new(65541), BlindPosition::new(80.0).unwrap())
            .await;
        assert!(matches!(result.unwrap_err(), Error::Write { .. }));
        // The write failure triggered no reconnect.
        assert_eq!(gateway.connects(), 1);
    }

    #[tokio::test]
    async fn is_outlet_on_reads_kind_state() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(outlet(65540, OutletPower::On)));
        gateway.on_get(Ok(outlet(65540, OutletPower::Off)));
        let accessor = accessor(&gateway).await;

        assert!(accessor.is_outlet_on(DeviceId::new(65540)).await.unwrap());
        assert!(!accessor.is_outlet_on(DeviceId::new(65540)).await.unwrap());
    }

    #[tokio::test]
    async fn blind_position_reads_kind_state() {
        let gateway = MockGateway::new();
        gateway.on_get(Ok(blind(65541, 62.5)));
        let accessor = accessor(&gateway).await;

        let position = accessor.blind_position(DeviceId::new(65541)).await.unwrap();
        assert_eq!(position, BlindPosition::new(62.5).unwrap());
    }
}
