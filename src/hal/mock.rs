//! Mock implementations for testing without hardware.
//!
//! Test doubles for the hardware traits, enabling development and testing
//! on desktop without a plotter attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDriver`] | [`MotorDriver`] | Records per-axis drive calls |
//! | [`MockPin`] | [`DigitalOutput`] | Records direction-pin levels |
//! | [`MockPwm`] | [`PwmOutput`] | Records PWM duty writes |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use rs_plotter::hal::MockDriver;
//! use rs_plotter::motor::{Axis, AxisOutput};
//! use rs_plotter::traits::MotorDriver;
//!
//! let mut driver = MockDriver::new();
//! driver.drive(Axis::Vertical, AxisOutput::from_duty(120.0)).unwrap();
//!
//! assert_eq!(driver.output(Axis::Vertical).pwm, 120);
//! assert_eq!(driver.drive_count, 1);
//! ```
//!
//! [`MotorDriver`]: crate::traits::MotorDriver
//! [`DigitalOutput`]: crate::traits::DigitalOutput
//! [`PwmOutput`]: crate::traits::PwmOutput
//! [`Clock`]: crate::traits::Clock

use crate::motor::{Axis, AxisOutput};
use crate::traits::{Clock, DigitalOutput, MotorDriver, PwmOutput};

extern crate alloc;
use alloc::vec::Vec;

/// Mock motor driver for testing.
///
/// Records the last output applied to each axis plus the full write
/// history. Use the public fields to inspect state after test operations.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Last output applied per axis, indexed by [`Axis`].
    pub outputs: [AxisOutput; 2],
    /// Every drive call in order: (axis, output).
    pub history: Vec<(Axis, AxisOutput)>,
    /// Number of times `drive` was called.
    pub drive_count: usize,
}

impl MockDriver {
    /// Creates a new mock driver with both axes stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last output applied to the given axis.
    pub fn output(&self, axis: Axis) -> AxisOutput {
        self.outputs[axis as usize]
    }

    /// True if both axes currently sit at zero PWM.
    pub fn is_stopped(&self) -> bool {
        self.outputs.iter().all(|o| o.pwm == 0)
    }
}

impl MotorDriver for MockDriver {
    type Error = ();

    fn drive(&mut self, axis: Axis, output: AxisOutput) -> Result<(), ()> {
        self.outputs[axis as usize] = output;
        self.history.push((axis, output));
        self.drive_count += 1;
        Ok(())
    }
}

/// Mock digital output pin.
#[derive(Debug, Default)]
pub struct MockPin {
    level: bool,
    /// Number of level writes.
    pub write_count: usize,
}

impl MockPin {
    /// Creates a pin driven low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pin level.
    pub fn is_high(&self) -> bool {
        self.level
    }
}

impl DigitalOutput for MockPin {
    type Error = ();

    fn set_high(&mut self) -> Result<(), ()> {
        self.level = true;
        self.write_count += 1;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), ()> {
        self.level = false;
        self.write_count += 1;
        Ok(())
    }
}

/// Mock PWM pin recording every duty write.
#[derive(Debug, Default)]
pub struct MockPwm {
    duty: u8,
    /// Every duty value written, in order.
    pub writes: Vec<u8>,
}

impl MockPwm {
    /// Creates a PWM pin at zero duty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duty value written.
    pub fn duty(&self) -> u8 {
        self.duty
    }
}

impl PwmOutput for MockPwm {
    type Error = ();

    fn set_duty(&mut self, duty: u8) -> Result<(), ()> {
        self.duty = duty;
        self.writes.push(duty);
        Ok(())
    }
}

/// Mock clock for testing.
///
/// # Example
///
/// ```rust
/// use rs_plotter::hal::MockClock;
/// use rs_plotter::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a clock starting at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::DriveDirection;

    #[test]
    fn mock_driver_default_is_stopped() {
        let driver = MockDriver::new();
        assert!(driver.is_stopped());
        assert_eq!(driver.drive_count, 0);
        assert!(driver.history.is_empty());
    }

    #[test]
    fn mock_driver_records_history() {
        let mut driver = MockDriver::new();
        driver
            .drive(Axis::Horizontal, AxisOutput::from_duty(-42.0))
            .unwrap();

        assert_eq!(driver.drive_count, 1);
        assert_eq!(driver.output(Axis::Horizontal).pwm, 42);
        assert_eq!(
            driver.output(Axis::Horizontal).direction,
            DriveDirection::Reverse
        );
        assert_eq!(driver.history.len(), 1);
        assert!(!driver.is_stopped());
    }

    #[test]
    fn mock_driver_stop_all() {
        let mut driver = MockDriver::new();
        driver
            .drive(Axis::Vertical, AxisOutput::from_duty(100.0))
            .unwrap();
        driver.stop_all().unwrap();
        assert!(driver.is_stopped());
    }

    #[test]
    fn mock_pin_levels() {
        let mut pin = MockPin::new();
        assert!(!pin.is_high());
        pin.set_high().unwrap();
        assert!(pin.is_high());
        pin.set_low().unwrap();
        assert!(!pin.is_high());
        assert_eq!(pin.write_count, 2);
    }

    #[test]
    fn mock_pwm_records_writes() {
        let mut pwm = MockPwm::new();
        pwm.set_duty(10).unwrap();
        pwm.set_duty(200).unwrap();
        assert_eq!(pwm.duty(), 200);
        assert_eq!(pwm.writes, vec![10, 200]);
    }

    #[test]
    fn mock_clock_set_and_advance() {
        let mut clock = MockClock::new();
        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);
        clock.advance(500);
        assert_eq!(clock.now_ms(), 1500);
    }
}
