//! # rs-plotter
//!
//! Motor-control firmware core for an eye-tracking plotter: two DC motors
//! follow the tracked eye via closed-loop PID, fed by directional
//! position-error packets over a wired serial link or a WiFi/HTTP
//! transport, with a remotely toggled enable/disable gate.
//!
//! ## Features
//!
//! - **Hardware abstraction**: traits for the two-axis motor drive and pin
//!   capabilities, with recording mocks for desktop testing
//! - **Resynchronizing link decoder**: a corrupted byte costs at most one
//!   buffer's worth of packets, never the stream alignment
//! - **Per-axis PID**: trapezoidal integration, windup clamp, mandatory
//!   reset on every enable-gate transition
//! - **Command server**: axum HTTP endpoints for start/stop/status,
//!   discovery, and direct eye-data ingestion (feature `web`)
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `packet` - wire format and validation
//! - `decoder` - non-blocking resynchronizing link decoder
//! - `error_map` - packet → signed per-axis error (home-nudge policy)
//! - `pid` - per-axis discrete PID controller
//! - `motor` - signed duty → H-bridge direction + PWM magnitude
//! - `plotter` - the controller tying decoder, gate, PIDs, and driver together
//! - `traits` / `hal` - hardware seams and mock implementations
//! - `services` - WiFi command server (feature-gated)
//!
//! ## Example
//!
//! ```rust
//! use rs_plotter::hal::MockDriver;
//! use rs_plotter::motor::Axis;
//! use rs_plotter::PlotterController;
//!
//! let mut plotter = PlotterController::new(MockDriver::new());
//!
//! // Remote /start command opens the gate
//! plotter.start(0).unwrap();
//!
//! // Bytes arrive from the link; tick runs one control iteration
//! plotter.feed(b"U050R100");
//! plotter.tick(20).unwrap();
//!
//! assert!(plotter.driver().output(Axis::Vertical).pwm > 0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration system for desktop and on-target builds.
pub mod config;
/// Non-blocking resynchronizing link decoder.
pub mod decoder;
/// Motion Command to signed per-axis error mapping.
pub mod error_map;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Signed duty to H-bridge drive conversion.
pub mod motor;
/// Wire packet format and validation.
pub mod packet;
/// Per-axis discrete PID controller.
pub mod pid;
/// Main plotter controller coordinating decoder, gate, PIDs, and driver.
pub mod plotter;
/// Core traits for hardware abstraction.
pub mod traits;

/// Shared message types for the HTTP command API (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

/// Network services for the WiFi command transport (feature-gated).
#[cfg(feature = "web")]
pub mod services;

// Re-exports for convenience
pub use config::{Config, ControlConfig, DeviceConfig, SerialConfig, WebConfig, WifiConfig};
pub use decoder::PacketDecoder;
pub use error_map::axis_errors;
pub use motor::{Axis, AxisOutput, DriveDirection, HBridge, HBridgeDriver};
pub use packet::{HorizontalDirection, MotionCommand, VerticalDirection};
pub use pid::{PidController, PidGains};
pub use plotter::{PlotterController, PlotterState};
pub use traits::{Clock, DigitalOutput, MotorDriver, PwmOutput};

// Message re-exports (for the HTTP API)
#[cfg(feature = "serde")]
pub use messages::{
    ControlResponse, DiscoverResponse, ErrorResponse, EyeDataRequest, ProcessedResponse,
    StatusResponse,
};
