//! Hardware abstraction layer implementations.
//!
//! Currently ships the mock implementations used for desktop development
//! and testing; board-specific pin and PWM implementations plug into the
//! same traits.

pub mod mock;

pub use mock::{MockClock, MockDriver, MockPin, MockPwm};
