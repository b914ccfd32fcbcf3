// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `tradgw` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! transport communication, device access and retry exhaustion, command
//! validation, table rendering, and value constraints.

use thiserror::Error;

use crate::device::DeviceId;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when querying
/// or controlling devices through a gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// The gateway rejected the device identifier as malformed or unknown.
    ///
    /// This is never retried: a bad identifier does not become valid by
    /// reconnecting.
    #[error("invalid device {id}: {source}")]
    InvalidDevice {
        /// The identifier that was rejected.
        id: DeviceId,
        /// The underlying transport failure.
        source: TransportError,
    },

    /// A transport operation failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A read failed even after one reconnect-and-retry cycle.
    #[error("device access failed after reconnect: {source}")]
    Access {
        /// The failure from the retried attempt.
        source: TransportError,
    },

    /// A command was issued against a device of the wrong kind.
    ///
    /// This is a caller error (wrong id in a config, for example) and is
    /// never retried.
    #[error("device {id} is a {actual}, expected {expected}")]
    WrongDeviceType {
        /// The device that was targeted.
        id: DeviceId,
        /// The kind the command requires.
        expected: &'static str,
        /// The kind the device actually is.
        actual: String,
    },

    /// A state-change write failed. Writes are never retried.
    #[error("device write failed: {source}")]
    Write {
        /// The underlying transport failure.
        source: TransportError,
    },

    /// Table input had an inconsistent shape.
    #[error("malformed table: {0}")]
    Table(#[from] TableError),

    /// A value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Credentials could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors surfaced by the transport collaborator.
///
/// The transport itself (DTLS session, wire protocol) is outside this
/// library; these variants are the shape its failures arrive in.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The gateway could not parse the device identifier, or no device
    /// with that identifier exists.
    #[error("malformed or unknown device id: {0}")]
    MalformedId(String),

    /// Connection to the gateway failed or was lost.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The gateway rejected the pre-shared key.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The gateway returned a payload this library could not decode.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A device record lacked a field its type code requires.
    #[error("device record is missing field: {0}")]
    MissingField(&'static str),
}

impl TransportError {
    /// Returns `true` when the failure concerns the device identifier
    /// itself rather than the session.
    ///
    /// Such failures are not transient and must not trigger a reconnect.
    #[must_use]
    pub const fn is_invalid_device(&self) -> bool {
        matches!(self, Self::MalformedId(_))
    }
}

/// Errors related to table rendering input shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row's column count differs from the header's.
    #[error("row {row} has {actual} columns, expected {expected}")]
    ColumnCountMismatch {
        /// Zero-based index of the offending data row.
        row: usize,
        /// Column count of the header.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
    },

    /// The header itself was empty.
    ///
    /// A zero-column table has no meaningful frame, so this is rejected
    /// outright instead of emitting a degenerate `╔╗` box. Strictly
    /// tighter than the row/header mismatch check alone.
    #[error("table header has no columns")]
    EmptyHeader,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A blind position is outside 0.0–100.0.
    #[error("blind position {0} is out of range [0, 100]")]
    InvalidBlindPosition(f32),

    /// A battery level is above 100.
    #[error("battery level {0} is out of range [0, 100]")]
    InvalidBatteryLevel(u16),

    /// An invalid outlet power string was provided.
    #[error("invalid outlet power state: {0}")]
    InvalidOutletPower(String),
}

/// Errors related to loading gateway credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credentials file could not be read.
    #[error("cannot read credentials file '{path}': {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The credentials file was not valid JSON.
    #[error("cannot parse credentials file '{path}': {source}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// The underlying JSON failure.
        source: serde_json::Error,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_classifies_malformed_id() {
        let err = TransportError::MalformedId("65zzz".to_string());
        assert!(err.is_invalid_device());

        let err = TransportError::ConnectionFailed("peer reset".to_string());
        assert!(!err.is_invalid_device());

        let err = TransportError::Timeout(5000);
        assert!(!err.is_invalid_device());
    }

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidBlindPosition(120.0);
        assert_eq!(
            err.to_string(),
            "blind position 120 is out of range [0, 100]"
        );
    }

    #[test]
    fn table_error_display() {
        let err = TableError::ColumnCountMismatch {
            row: 2,
            expected: 6,
            actual: 5,
        };
        assert_eq!(err.to_string(), "row 2 has 5 columns, expected 6");
    }

    #[test]
    fn error_from_transport_error() {
        let err: Error = TransportError::AuthenticationFailed.into();
        assert!(matches!(
            err,
            Error::Transport(TransportError::AuthenticationFailed)
        ));
    }
}
