//! Unified shared state for the command server and the control loop.
//!
//! `SharedPlotterState` provides thread-safe access to a single
//! [`PlotterController`] shared between the axum handlers and the tick
//! loop. On the original single-thread target the enable gate needed no
//! lock; here both sides run on a real scheduler, so every touch of the
//! controller goes through one mutex and a `reset()` can never interleave
//! with a `calculate()`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_plotter::services::SharedPlotterState;
//!
//! let state = Arc::new(SharedPlotterState::new(controller));
//!
//! // Handlers mutate through the closure API
//! let now_ms = state.now_ms();
//! state.with_controller(|c| c.start(now_ms));
//!
//! // The tick loop does the same
//! state.with_controller(|c| c.tick(state.now_ms()));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::config::DeviceConfig;
use crate::plotter::{PlotterController, PlotterState};
use crate::traits::MotorDriver;

/// Shared state wrapping the controller, a unified time base, and the
/// connectivity flag reported by `/status`.
///
/// # Thread Safety
///
/// Uses `Mutex` (not `RwLock`) because the tick loop writes every
/// iteration, making reader/writer separation pointless and writer
/// starvation a concern.
pub struct SharedPlotterState<D: MotorDriver> {
    /// The controller - needs mutable access for commands and ticks.
    controller: Mutex<PlotterController<D>>,

    /// Time base for all `now_ms()` calls across handlers and the loop.
    start_time: Instant,

    /// WiFi link health, surfaced by `/status`.
    wifi_connected: AtomicBool,

    /// Identity surfaced by `/api/discover`.
    device: DeviceConfig,
}

impl<D: MotorDriver> SharedPlotterState<D> {
    /// Create shared state wrapping a controller.
    ///
    /// `start_time` is set to `Instant::now()` and becomes the epoch for
    /// every `now_ms()` call; the controller's PID time base starts at the
    /// same zero.
    pub fn new(controller: PlotterController<D>) -> Self {
        Self {
            controller: Mutex::new(controller),
            start_time: Instant::now(),
            wifi_connected: AtomicBool::new(true),
            device: DeviceConfig::default(),
        }
    }

    /// Set the device identity used by `/api/discover`.
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Current timestamp in milliseconds since state creation.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// The device identity.
    pub fn device(&self) -> &DeviceConfig {
        &self.device
    }

    /// Access the controller under the lock.
    ///
    /// The closure pattern keeps the lock from being held across await
    /// points in async handlers.
    pub fn with_controller<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut PlotterController<D>) -> R,
    {
        let mut guard = self.controller.lock().unwrap();
        f(&mut guard)
    }

    /// Read-only state snapshot (brief lock).
    pub fn state(&self) -> PlotterState {
        self.controller.lock().unwrap().state()
    }

    /// Record WiFi link health for `/status`.
    pub fn set_wifi_connected(&self, connected: bool) {
        self.wifi_connected.store(connected, Ordering::Relaxed);
    }

    /// Current WiFi link health.
    pub fn wifi_connected(&self) -> bool {
        self.wifi_connected.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockDriver;

    fn shared() -> SharedPlotterState<MockDriver> {
        SharedPlotterState::new(PlotterController::new(MockDriver::new()))
    }

    #[test]
    fn creation_starts_near_zero() {
        let state = shared();
        assert!(state.now_ms() < 100);
        assert!(!state.state().enabled);
    }

    #[test]
    fn with_controller_mutates() {
        let state = shared();
        let now_ms = state.now_ms();
        state.with_controller(|c| c.start(now_ms)).unwrap();
        assert!(state.state().enabled);
    }

    #[test]
    fn wifi_flag_round_trips() {
        let state = shared();
        assert!(state.wifi_connected());
        state.set_wifi_connected(false);
        assert!(!state.wifi_connected());
    }

    #[test]
    fn device_identity_is_configurable() {
        let state = shared().with_device(DeviceConfig::default().with_name("Bench Plotter"));
        assert_eq!(state.device().name.as_str(), "Bench Plotter");
    }

    #[test]
    fn concurrent_access_does_not_deadlock() {
        use std::sync::Arc;
        use std::thread;

        let state = Arc::new(shared());
        let writer = Arc::clone(&state);
        let reader = Arc::clone(&state);

        let handle1 = thread::spawn(move || {
            for i in 0..50 {
                let now_ms = writer.now_ms();
                let _ = writer.with_controller(|c| {
                    if i % 2 == 0 {
                        c.start(now_ms)
                    } else {
                        c.stop(now_ms)
                    }
                });
            }
        });

        let handle2 = thread::spawn(move || {
            for _ in 0..50 {
                let _ = reader.state();
                let _ = reader.now_ms();
            }
        });

        handle1.join().unwrap();
        handle2.join().unwrap();
        let _ = state.state();
    }
}
