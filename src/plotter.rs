//! Main plotter controller that ties everything together.
//!
//! [`PlotterController`] owns the link decoder, one PID per axis, the
//! enable gate, and the motor-driver capability. The host loop calls
//! [`tick`](PlotterController::tick) with a monotonic millisecond
//! timestamp; everything inside is non-blocking and allocation-free, so
//! the loop's latency budget holds whether it runs on a bare polling loop
//! or inside an async task.
//!
//! # Overview
//!
//! Per tick:
//! - poll the decoder for one complete command (bytes arrive via
//!   [`feed`](PlotterController::feed) between ticks);
//! - while **enabled**: a decoded command runs the error mapper and both
//!   PID calculations and drives the motors; no command means the last
//!   duty is held (the drive stage latches between writes);
//! - while **disabled**: both outputs are forced to zero every tick, and
//!   incoming bytes keep draining through the decoder so the link cannot
//!   back up while the plotter is paused.
//!
//! Both gate transitions reset both PID controllers; without the reset a
//! stale integral would kick the carriage the instant control resumes.
//!
//! # Example
//!
//! ```rust
//! use rs_plotter::hal::MockDriver;
//! use rs_plotter::plotter::PlotterController;
//!
//! let mut plotter = PlotterController::new(MockDriver::new());
//!
//! plotter.start(0).unwrap();
//! plotter.feed(b"U050R100");
//! plotter.tick(20).unwrap();
//!
//! let state = plotter.state();
//! assert!(state.enabled);
//! assert!(state.duty_v > 0.0);
//! ```

use crate::config::ControlConfig;
use crate::decoder::PacketDecoder;
use crate::error_map::axis_errors;
use crate::motor::{Axis, AxisOutput};
use crate::packet::MotionCommand;
use crate::pid::PidController;
use crate::traits::MotorDriver;

/// Main plotter controller.
///
/// Generic over the motor-driver capability so tests substitute a
/// recording fake for real pin writes.
///
/// # Thread Safety
///
/// The controller itself is not thread-safe; the control loop and the
/// command handlers must not interleave. In the WiFi build both go through
/// [`SharedPlotterState`](crate::services::SharedPlotterState), which
/// wraps the controller in a mutex.
pub struct PlotterController<D: MotorDriver> {
    driver: D,
    decoder: PacketDecoder,
    pid_v: PidController,
    pid_h: PidController,
    enabled: bool,
    duty_v: f32,
    duty_h: f32,
    last_command: Option<MotionCommand>,
}

impl<D: MotorDriver> PlotterController<D> {
    /// Create a controller with default gains, disabled.
    ///
    /// The PID time base starts at 0 ms; hosts should pass `tick`
    /// timestamps measured from their own startup instant.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, &ControlConfig::default())
    }

    /// Create a controller with explicit control configuration, disabled.
    pub fn with_config(driver: D, config: &ControlConfig) -> Self {
        Self {
            driver,
            decoder: PacketDecoder::new(),
            pid_v: PidController::with_output_limit(config.vertical, config.output_limit, 0),
            pid_h: PidController::with_output_limit(config.horizontal, config.output_limit, 0),
            enabled: false,
            duty_v: 0.0,
            duty_h: 0.0,
            last_command: None,
        }
    }

    /// Push raw link bytes into the decoder.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.decoder.feed(bytes);
    }

    /// Push an 8-character packet string (the WiFi eye-data path).
    ///
    /// Routed through the same decoder as serial bytes, so validation and
    /// resynchronization behave identically on both transports.
    pub fn feed_packet(&mut self, packet: &str) {
        self.decoder.feed(packet.as_bytes());
    }

    /// Run one control iteration at time `now_ms`.
    ///
    /// Returns the command decoded this iteration, if any. Driver errors
    /// propagate; decode failures do not (the decoder recovers locally).
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<MotionCommand>, D::Error> {
        let decoded = self.decoder.poll();

        if !self.enabled {
            // Keep draining the link, but force both outputs to zero.
            self.duty_v = 0.0;
            self.duty_h = 0.0;
            if let Some(cmd) = decoded {
                self.last_command = Some(cmd);
            }
            self.driver.stop_all()?;
            return Ok(decoded);
        }

        if let Some(cmd) = decoded {
            let (err_v, err_h) = axis_errors(&cmd);
            let duty_v = self.pid_v.calculate(err_v, now_ms);
            let duty_h = self.pid_h.calculate(err_h, now_ms);

            self.driver
                .drive(Axis::Vertical, AxisOutput::from_duty(duty_v))?;
            self.driver
                .drive(Axis::Horizontal, AxisOutput::from_duty(duty_h))?;

            self.duty_v = duty_v;
            self.duty_h = duty_h;
            self.last_command = Some(cmd);
        }
        // No command this iteration: hold the last duty, no writes.

        Ok(decoded)
    }

    /// Enable the gate and reset both PID controllers.
    pub fn start(&mut self, now_ms: u64) -> Result<(), D::Error> {
        self.set_enabled(true, now_ms)
    }

    /// Disable the gate, zero both outputs, reset both PID controllers.
    pub fn stop(&mut self, now_ms: u64) -> Result<(), D::Error> {
        self.set_enabled(false, now_ms)
    }

    /// Set the enable gate.
    ///
    /// Every call resets both PID controllers, including a repeated
    /// `/start`: control resuming with a stale integral is never safe, and
    /// an idempotent reset costs nothing.
    pub fn set_enabled(&mut self, enabled: bool, now_ms: u64) -> Result<(), D::Error> {
        self.enabled = enabled;
        self.pid_v.reset(now_ms);
        self.pid_h.reset(now_ms);
        if !enabled {
            self.duty_v = 0.0;
            self.duty_h = 0.0;
            self.driver.stop_all()?;
        }
        Ok(())
    }

    /// Whether the enable gate is open.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Snapshot of the controller state for UI/API.
    pub fn state(&self) -> PlotterState {
        PlotterState {
            enabled: self.enabled,
            duty_v: self.duty_v,
            duty_h: self.duty_h,
            output_v: AxisOutput::from_duty(self.duty_v),
            output_h: AxisOutput::from_duty(self.duty_h),
            last_command: self.last_command,
        }
    }

    /// Integral accumulators `(vertical, horizontal)`, for diagnostics.
    pub fn integrals(&self) -> (f32, f32) {
        (self.pid_v.integral(), self.pid_h.integral())
    }

    /// Bytes currently waiting in the link decoder.
    pub fn buffered_bytes(&self) -> usize {
        self.decoder.buffered()
    }

    /// Borrow the motor driver (for inspecting mocks in tests).
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// Full state snapshot for UI/API.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotterState {
    /// Whether the enable gate is open.
    pub enabled: bool,
    /// Last signed vertical duty.
    pub duty_v: f32,
    /// Last signed horizontal duty.
    pub duty_h: f32,
    /// Derived vertical drive output.
    pub output_v: AxisOutput,
    /// Derived horizontal drive output.
    pub output_h: AxisOutput,
    /// Most recently decoded command, if any.
    pub last_command: Option<MotionCommand>,
}
