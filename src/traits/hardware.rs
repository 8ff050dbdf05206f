//! Hardware abstraction traits for motor drive and timing.
//!
//! These interfaces let the control core run against real H-bridge hardware
//! or desktop test doubles without change.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotorDriver`] | Two-axis drive: direction + PWM magnitude |
//! | [`DigitalOutput`] | Single H-bridge direction pin |
//! | [`PwmOutput`] | PWM-capable enable pin |
//! | [`Clock`] | Millisecond time source for the control loop |
//!
//! For testing and desktop development use the mocks from
//! [`crate::hal::mock`]. A real board implements [`DigitalOutput`] and
//! [`PwmOutput`] over its GPIO/timer peripherals and gets [`MotorDriver`]
//! for free via [`HBridgeDriver`](crate::motor::HBridgeDriver).

use crate::motor::{Axis, AxisOutput};

/// A single digital output pin (H-bridge direction input).
pub trait DigitalOutput {
    /// Error type for pin writes.
    type Error;

    /// Drive the pin high.
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Drive the pin low.
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Drive the pin to the given level.
    fn set_level(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}

/// A PWM-capable output pin (H-bridge enable input).
pub trait PwmOutput {
    /// Error type for duty writes.
    type Error;

    /// Write an 8-bit duty cycle (0 = off, 255 = full).
    fn set_duty(&mut self, duty: u8) -> Result<(), Self::Error>;
}

/// Motor driver trait - abstracts the plotter's two-axis drive stage.
///
/// Implementations translate an [`AxisOutput`] (direction sign plus 8-bit
/// PWM magnitude) into whatever the drive hardware needs. Writes are
/// fire-and-forget side effects; there are no read-back operations.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_plotter::motor::{Axis, AxisOutput};
/// use rs_plotter::traits::MotorDriver;
///
/// struct MyDriver { /* hardware handles */ }
///
/// impl MotorDriver for MyDriver {
///     type Error = ();
///
///     fn drive(&mut self, axis: Axis, output: AxisOutput) -> Result<(), ()> {
///         // Set direction pins, write PWM...
///         Ok(())
///     }
/// }
/// ```
pub trait MotorDriver {
    /// Error type for drive operations.
    type Error;

    /// Apply a direction and PWM magnitude to one axis.
    fn drive(&mut self, axis: Axis, output: AxisOutput) -> Result<(), Self::Error>;

    /// Convenience method to zero both axes.
    fn stop_all(&mut self) -> Result<(), Self::Error> {
        self.drive(Axis::Vertical, AxisOutput::zero())?;
        self.drive(Axis::Horizontal, AxisOutput::zero())
    }
}

/// Millisecond time source for the control loop.
///
/// Must be monotonically increasing. On desktop this wraps
/// `std::time::Instant`; under test use
/// [`MockClock`](crate::hal::MockClock).
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;
}
