//! Shared configuration system for desktop and on-target builds.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_plotter::config::{Config, SerialConfig, WebConfig};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_serial(SerialConfig::default().with_port("/dev/ttyACM0"))
//!     .with_web(WebConfig::default().with_port(80));
//! ```

use heapless::String as HString;

use crate::pid::{PidGains, OUTPUT_LIMIT};

/// Maximum length for short config strings (device names, port paths).
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings.
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a `&str`, truncating if too long.
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// WiFi connection configuration.
    pub wifi: WifiConfig,
    /// Command-server configuration.
    pub web: WebConfig,
    /// Serial link configuration.
    pub serial: SerialConfig,
    /// Control-loop configuration.
    pub control: ControlConfig,
    /// Device identification.
    pub device: DeviceConfig,
}

impl Config {
    /// Set WiFi configuration.
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Set web configuration.
    pub fn with_web(mut self, web: WebConfig) -> Self {
        self.web = web;
        self
    }

    /// Set serial configuration.
    pub fn with_serial(mut self, serial: SerialConfig) -> Self {
        self.serial = serial;
        self
    }

    /// Set control configuration.
    pub fn with_control(mut self, control: ControlConfig) -> Self {
        self.control = control;
        self
    }

    /// Set device configuration.
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// WiFi connection configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WifiConfig {
    /// WiFi network SSID.
    pub ssid: ShortString,
    /// WiFi password.
    pub password: ShortString,
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u32,
    /// Whether WiFi is enabled.
    pub enabled: bool,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: ShortString::new(),
            password: ShortString::new(),
            connect_timeout_ms: 30_000,
            enabled: true,
        }
    }
}

impl WifiConfig {
    /// Set the SSID.
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Enable or disable WiFi.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if WiFi credentials are configured.
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Web Config
// ============================================================================

/// Command-server configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WebConfig {
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS for all origins.
    pub cors_permissive: bool,
    /// Whether the command server is enabled.
    pub enabled: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_permissive: true,
            enabled: true,
        }
    }
}

impl WebConfig {
    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS mode.
    pub fn with_cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Enable or disable the command server.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// ============================================================================
// Serial Config
// ============================================================================

/// Serial link configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// Serial port path (empty = auto/unset).
    pub port: ShortString,
    /// Baud rate.
    pub baud: u32,
    /// Per-iteration read timeout in milliseconds.
    ///
    /// Kept short so servicing the link never stalls the control loop past
    /// its single-digit-millisecond budget.
    pub read_timeout_ms: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: ShortString::new(),
            baud: 115_200,
            read_timeout_ms: 5,
        }
    }
}

impl SerialConfig {
    /// Set the port path.
    pub fn with_port(mut self, port: &str) -> Self {
        self.port = short_string(port);
        self
    }

    /// Set the baud rate.
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout_ms(mut self, ms: u32) -> Self {
        self.read_timeout_ms = ms;
        self
    }
}

// ============================================================================
// Control Config
// ============================================================================

/// Control-loop configuration: per-axis gains and the output limit.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlConfig {
    /// Vertical axis gains.
    pub vertical: PidGains,
    /// Horizontal axis gains.
    pub horizontal: PidGains,
    /// Symmetric duty limit (also bounds the integral accumulator).
    pub output_limit: f32,
    /// Host tick interval in milliseconds.
    pub tick_interval_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            vertical: PidGains::new(0.8, 0.05, 0.01),
            horizontal: PidGains::new(0.8, 0.05, 0.01),
            output_limit: OUTPUT_LIMIT,
            tick_interval_ms: 10,
        }
    }
}

impl ControlConfig {
    /// Set the vertical axis gains.
    pub fn with_vertical(mut self, gains: PidGains) -> Self {
        self.vertical = gains;
        self
    }

    /// Set the horizontal axis gains.
    pub fn with_horizontal(mut self, gains: PidGains) -> Self {
        self.horizontal = gains;
        self
    }

    /// Set the output limit.
    pub fn with_output_limit(mut self, limit: f32) -> Self {
        self.output_limit = limit;
        self
    }

    /// Set the tick interval.
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name.
    pub name: ShortString,
    /// Device ID (for multi-plotter setups).
    pub id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("rs-plotter"),
            id: short_string("plotter1"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the device ID.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = short_string(id);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
