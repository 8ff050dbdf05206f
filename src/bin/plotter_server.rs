//! Desktop command server with mock motor hardware.
//!
//! Runs the WiFi command transport against a [`MockDriver`], allowing the
//! vision host and the mobile app to be exercised without a plotter
//! attached:
//! - `GET /start`, `/stop`, `/status`
//! - `GET /api/discover`
//! - `POST /api/eye-data` with `{"packet": "U050R100"}`
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin plotter_server --features web
//! ```
//!
//! Edit the `Config::default()` call in `main()` to customize the port or
//! gains via the builder pattern.

use std::sync::Arc;

use rs_plotter::hal::MockDriver;
use rs_plotter::services::{
    run_server_with_state, run_tick_loop, SharedPlotterState, WebServerConfig,
};
use rs_plotter::{Config, PlotterController};

fn main() -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        println!("=================================");
        println!("  rs-plotter Command Server");
        println!("=================================");
        println!();

        // Central configuration - modify this for your setup
        let config = Config::default();
        // Example of customization:
        // let config = Config::default()
        //     .with_web(rs_plotter::WebConfig::default().with_port(80))
        //     .with_device(rs_plotter::DeviceConfig::default()
        //         .with_name("Desk Plotter")
        //         .with_id("plotter1"));

        let controller = PlotterController::with_config(MockDriver::new(), &config.control);
        let state = Arc::new(
            SharedPlotterState::new(controller).with_device(config.device.clone()),
        );

        // Control loop runs alongside the server on the shared state.
        tokio::spawn(run_tick_loop(
            Arc::clone(&state),
            u64::from(config.control.tick_interval_ms),
        ));

        run_server_with_state(state, WebServerConfig::from_config(&config.web)).await?;
        Ok(())
    })
}
