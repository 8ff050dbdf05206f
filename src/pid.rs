//! Discrete PID controller, one instance per plotter axis.
//!
//! The controller is driven with caller-supplied millisecond timestamps
//! rather than reading a clock itself; the host loop passes the same
//! `now_ms` it uses everywhere else, which keeps the math deterministic
//! under test (see [`crate::hal::MockClock`]).
//!
//! Windup protection is two-fold: the integral accumulator is clamped to
//! the output range *before* the output terms are combined, and callers
//! reset the controller on every enable-gate transition so a stale
//! integral can never produce a spike when control resumes.

/// Gain constants for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
}

impl PidGains {
    /// Create a new gain set.
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self { kp, ki, kd }
    }
}

/// Symmetric output limit matching the 8-bit PWM range.
pub const OUTPUT_LIMIT: f32 = 255.0;

/// Per-axis PID controller with trapezoidal integration and windup clamp.
///
/// # Example
///
/// ```
/// use rs_plotter::pid::{PidController, PidGains};
///
/// let mut pid = PidController::new(PidGains::new(1.0, 0.0, 0.0), 0);
/// let duty = pid.calculate(100.0, 10);
/// assert_eq!(duty, 100.0); // pure proportional
/// ```
#[derive(Clone, Debug)]
pub struct PidController {
    gains: PidGains,
    output_limit: f32,
    last_ms: u64,
    last_error: f32,
    integral: f32,
}

impl PidController {
    /// Create a controller with the default [`OUTPUT_LIMIT`].
    pub fn new(gains: PidGains, now_ms: u64) -> Self {
        Self::with_output_limit(gains, OUTPUT_LIMIT, now_ms)
    }

    /// Create a controller with an explicit symmetric output limit.
    pub fn with_output_limit(gains: PidGains, output_limit: f32, now_ms: u64) -> Self {
        Self {
            gains,
            output_limit,
            last_ms: now_ms,
            last_error: 0.0,
            integral: 0.0,
        }
    }

    /// Compute a signed duty for the given error at time `now_ms`.
    ///
    /// The time delta is floored at 1 ms so two calls within the same
    /// millisecond cannot blow up the derivative term.
    pub fn calculate(&mut self, error: f32, now_ms: u64) -> f32 {
        let dt_ms = now_ms.saturating_sub(self.last_ms).max(1);
        let dt = dt_ms as f32 / 1000.0;

        let derivative = (error - self.last_error) / dt;

        // Trapezoidal accumulation, clamped independently of the output
        // clamp so windup stays bounded even before saturation.
        self.integral += (error + self.last_error) / 2.0 * dt;
        self.integral = self.integral.clamp(-self.output_limit, self.output_limit);

        self.last_error = error;
        self.last_ms = now_ms;

        let output =
            self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative;
        output.clamp(-self.output_limit, self.output_limit)
    }

    /// Zero the integral and last-error state and restamp the clock.
    ///
    /// Must be called whenever control resumes after being disabled.
    pub fn reset(&mut self, now_ms: u64) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.last_ms = now_ms;
    }

    /// Current integral accumulator value.
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// The configured gains.
    pub fn gains(&self) -> PidGains {
        self.gains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P_ONLY: PidGains = PidGains::new(1.0, 0.0, 0.0);
    const I_ONLY: PidGains = PidGains::new(0.0, 1.0, 0.0);
    const D_ONLY: PidGains = PidGains::new(0.0, 0.0, 1.0);
    const FULL: PidGains = PidGains::new(0.8, 0.05, 0.01);

    #[test]
    fn pure_proportional() {
        let mut pid = PidController::new(P_ONLY, 0);
        assert_eq!(pid.calculate(50.0, 10), 50.0);
        assert_eq!(pid.calculate(-75.0, 20), -75.0);
    }

    #[test]
    fn integral_accumulates_trapezoidally() {
        let mut pid = PidController::new(I_ONLY, 0);
        // First call: (0 + 10)/2 * 0.1s = 0.5
        let out = pid.calculate(10.0, 100);
        assert!((out - 0.5).abs() < 1e-6);
        // Second call: 0.5 + (10 + 10)/2 * 0.1s = 1.5
        let out = pid.calculate(10.0, 200);
        assert!((out - 1.5).abs() < 1e-6);
    }

    #[test]
    fn derivative_uses_error_delta_over_dt() {
        let mut pid = PidController::new(D_ONLY, 0);
        // First call: (10 - 0) / 0.1s = 100
        let out = pid.calculate(10.0, 100);
        assert!((out - 100.0).abs() < 1e-4);
        // Unchanged error: derivative is zero.
        let out = pid.calculate(10.0, 200);
        assert!(out.abs() < 1e-6);
    }

    #[test]
    fn dt_floored_at_one_millisecond() {
        let mut pid = PidController::new(D_ONLY, 0);
        // Same-timestamp call uses dt = 1 ms, not zero.
        let out = pid.calculate(1.0, 0);
        assert!((out - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn output_clamped_to_limit() {
        let mut pid = PidController::new(P_ONLY, 0);
        assert_eq!(pid.calculate(999.0, 10), OUTPUT_LIMIT);
        assert_eq!(pid.calculate(-999.0, 20), -OUTPUT_LIMIT);
    }

    #[test]
    fn integral_clamped_before_output() {
        let mut pid = PidController::new(I_ONLY, 0);
        // Large sustained error for many seconds would integrate far past
        // the limit without the clamp.
        let mut now = 0;
        for _ in 0..100 {
            now += 1000;
            pid.calculate(999.0, now);
        }
        assert_eq!(pid.integral(), OUTPUT_LIMIT);
    }

    #[test]
    fn zero_error_keeps_output_at_zero() {
        let mut pid = PidController::new(FULL, 0);
        let mut now = 0;
        for _ in 0..50 {
            now += 20;
            let out = pid.calculate(0.0, now);
            assert_eq!(out, 0.0);
            assert_eq!(pid.integral(), 0.0);
        }
    }

    #[test]
    fn reset_matches_fresh_controller() {
        for error in [0.0, 42.0, -999.0, 100.0] {
            let mut fresh = PidController::new(FULL, 500);
            let fresh_out = fresh.calculate(error, 520);

            let mut used = PidController::new(FULL, 0);
            used.calculate(300.0, 100);
            used.calculate(-120.0, 250);
            used.reset(500);
            let reset_out = used.calculate(error, 520);

            assert_eq!(reset_out, fresh_out, "error {error}");
        }
    }

    #[test]
    fn reset_zeroes_integral() {
        let mut pid = PidController::new(I_ONLY, 0);
        pid.calculate(100.0, 1000);
        assert!(pid.integral() > 0.0);
        pid.reset(2000);
        assert_eq!(pid.integral(), 0.0);
    }

    #[test]
    fn clock_going_backwards_is_treated_as_one_millisecond() {
        let mut pid = PidController::new(I_ONLY, 1000);
        let out = pid.calculate(10.0, 500);
        // dt = 1 ms: (0 + 10)/2 * 0.001 = 0.005
        assert!((out - 0.005).abs() < 1e-6);
    }
}
