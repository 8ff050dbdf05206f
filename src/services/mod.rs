//! Network services for the WiFi command transport (feature-gated).

mod shared;
mod web;

pub use shared::SharedPlotterState;
pub use web::{build_router, run_server, run_server_with_state, run_tick_loop, WebServerConfig};
