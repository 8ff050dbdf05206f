//! Signed duty → H-bridge drive conversion.
//!
//! A PID duty is a signed value in `[-255, 255]`; the drive stage splits it
//! into a direction sign (which H-bridge leg conducts) and an 8-bit PWM
//! magnitude on the enable pin. [`HBridgeDriver`] wires two [`HBridge`]s
//! (one per axis) into a [`MotorDriver`] over the pin capability traits, so
//! the same truth-table logic runs on real GPIO or on recording fakes.

use crate::traits::{DigitalOutput, MotorDriver, PwmOutput};

/// The plotter's two independent linear axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Vertical carriage axis.
    Vertical = 0,
    /// Horizontal carriage axis.
    Horizontal = 1,
}

/// H-bridge polarity for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DriveDirection {
    /// Forward leg conducting (non-negative duty).
    #[default]
    Forward,
    /// Reverse leg conducting (negative duty).
    Reverse,
}

/// Derived drive value for one axis: polarity plus PWM magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisOutput {
    /// H-bridge polarity.
    pub direction: DriveDirection,
    /// PWM magnitude written to the enable pin.
    pub pwm: u8,
}

impl AxisOutput {
    /// Split a signed duty into polarity and clamped magnitude.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_plotter::motor::{AxisOutput, DriveDirection};
    ///
    /// let out = AxisOutput::from_duty(-300.0);
    /// assert_eq!(out.direction, DriveDirection::Reverse);
    /// assert_eq!(out.pwm, 255);
    /// ```
    pub fn from_duty(duty: f32) -> Self {
        let direction = if duty >= 0.0 {
            DriveDirection::Forward
        } else {
            DriveDirection::Reverse
        };
        let pwm = duty.abs().clamp(0.0, 255.0) as u8;
        Self { direction, pwm }
    }

    /// Stopped output: forward polarity, zero magnitude.
    pub const fn zero() -> Self {
        Self {
            direction: DriveDirection::Forward,
            pwm: 0,
        }
    }
}

/// One H-bridge channel: two direction pins and a PWM enable pin.
///
/// Truth table: `Forward` → forward pin high, reverse pin low; `Reverse` →
/// the inverse. The magnitude always goes to the enable pin, so a zero
/// output coasts the motor regardless of polarity.
#[derive(Debug)]
pub struct HBridge<F, R, P> {
    forward: F,
    reverse: R,
    enable: P,
}

impl<E, F, R, P> HBridge<F, R, P>
where
    F: DigitalOutput<Error = E>,
    R: DigitalOutput<Error = E>,
    P: PwmOutput<Error = E>,
{
    /// Assemble a bridge from its three pins.
    pub fn new(forward: F, reverse: R, enable: P) -> Self {
        Self {
            forward,
            reverse,
            enable,
        }
    }

    /// Apply one axis output to the pins.
    pub fn apply(&mut self, output: AxisOutput) -> Result<(), E> {
        match output.direction {
            DriveDirection::Forward => {
                self.forward.set_high()?;
                self.reverse.set_low()?;
            }
            DriveDirection::Reverse => {
                self.forward.set_low()?;
                self.reverse.set_high()?;
            }
        }
        self.enable.set_duty(output.pwm)
    }
}

/// Two-axis [`MotorDriver`] built from a pair of H-bridges.
#[derive(Debug)]
pub struct HBridgeDriver<F, R, P> {
    vertical: HBridge<F, R, P>,
    horizontal: HBridge<F, R, P>,
}

impl<E, F, R, P> HBridgeDriver<F, R, P>
where
    F: DigitalOutput<Error = E>,
    R: DigitalOutput<Error = E>,
    P: PwmOutput<Error = E>,
{
    /// Assemble a driver from the two per-axis bridges.
    pub fn new(vertical: HBridge<F, R, P>, horizontal: HBridge<F, R, P>) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl<E, F, R, P> MotorDriver for HBridgeDriver<F, R, P>
where
    F: DigitalOutput<Error = E>,
    R: DigitalOutput<Error = E>,
    P: PwmOutput<Error = E>,
{
    type Error = E;

    fn drive(&mut self, axis: Axis, output: AxisOutput) -> Result<(), E> {
        match axis {
            Axis::Vertical => self.vertical.apply(output),
            Axis::Horizontal => self.horizontal.apply(output),
        }
    }
}
