//! Shared message types for the HTTP command API.
//!
//! These are the JSON bodies the WiFi transport exchanges with the vision
//! host and the mobile app. They are kept in one place so the server, the
//! integration tests, and any future on-target JSON surface agree on the
//! exact field names the original clients expect.
//!
//! # Example
//!
//! ```
//! use rs_plotter::messages::EyeDataRequest;
//!
//! let json = r#"{"packet": "U050R100"}"#;
//! let req: EyeDataRequest = serde_json::from_str(json).unwrap();
//! assert_eq!(req.packet, "U050R100");
//! ```

use serde::{Deserialize, Serialize};

extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::DeviceConfig;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /api/eye-data`.
///
/// The `packet` field carries one 8-character wire packet; it is validated
/// by the link decoder, not here, so a malformed packet string is *not* a
/// request error.
///
/// # JSON Example
///
/// ```json
/// {"packet": "U050R100"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeDataRequest {
    /// One 8-character wire packet.
    pub packet: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response to `/start` and `/stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    /// `"started"` or `"stopped"`.
    pub status: String,
    /// Enable-gate state after the command.
    pub enabled: bool,
}

impl ControlResponse {
    /// Response for a `/start` command.
    pub fn started() -> Self {
        Self {
            status: "started".to_string(),
            enabled: true,
        }
    }

    /// Response for a `/stop` command.
    pub fn stopped() -> Self {
        Self {
            status: "stopped".to_string(),
            enabled: false,
        }
    }
}

/// Response to `/status`. Never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"enabled"` or `"disabled"`.
    pub status: String,
    /// Enable-gate state.
    pub enabled: bool,
    /// WiFi connectivity as seen by the device.
    pub wifi: bool,
}

impl StatusResponse {
    /// Build from the gate and connectivity flags.
    pub fn new(enabled: bool, wifi: bool) -> Self {
        let status = if enabled { "enabled" } else { "disabled" };
        Self {
            status: status.to_string(),
            enabled,
            wifi,
        }
    }
}

/// Response to `GET /api/discover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverResponse {
    /// Device name from [`DeviceConfig`].
    pub device: String,
    /// Fixed device type tag clients match on.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Crate version.
    pub version: String,
    /// Supported command names.
    pub capabilities: Vec<String>,
}

impl DiscoverResponse {
    /// Discovery payload for this firmware.
    pub fn new(device: &DeviceConfig) -> Self {
        Self {
            device: device.name.as_str().to_string(),
            device_type: "eye-tracker-plotter".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: ["start", "stop", "status", "eye-data"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Response to a successfully ingested `POST /api/eye-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedResponse {
    /// Always `"processed"`.
    pub status: String,
}

impl ProcessedResponse {
    /// The fixed success payload.
    pub fn new() -> Self {
        Self {
            status: "processed".to_string(),
        }
    }
}

impl Default for ProcessedResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Error payload for 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

impl ErrorResponse {
    /// Build an error payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
