// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway credentials.
//!
//! The initial key exchange that produces these credentials is outside this
//! library; here they are only loaded and handed to a
//! [`Connect`](crate::transport::Connect) factory. Field names match the
//! JSON key file the exchange writes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Credentials for an authenticated gateway session.
///
/// # Examples
///
/// ```
/// use tradgw_lib::config::Credentials;
///
/// let creds: Credentials = serde_json::from_str(
///     r#"{
///         "client_id": "tradgw-client",
///         "gateway_address": "192.168.1.2:5684",
///         "psk": "secret-token"
///     }"#,
/// )?;
/// assert_eq!(creds.gateway_address, "192.168.1.2:5684");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Client identifier registered with the gateway.
    pub client_id: String,
    /// Gateway address, `host:port`.
    pub gateway_address: String,
    /// Pre-shared key obtained from the initial token exchange.
    pub psk: String,
}

impl Credentials {
    /// Creates credentials from their parts.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        gateway_address: impl Into<String>,
        psk: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            gateway_address: gateway_address.into(),
            psk: psk.into(),
        }
    }

    /// Loads credentials from a JSON key file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid credentials JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
