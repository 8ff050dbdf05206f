//! Serial-link host loop.
//!
//! Opens the wired link at 115200 baud, feeds incoming bytes through the
//! link decoder, and runs the control loop against a mock driver, logging
//! each decoded packet and the resulting duties. This is the desktop
//! bring-up path for the serial transport; on hardware the same loop runs
//! with the board's H-bridge driver in place of the mock.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin serial_link --features serial -- /dev/ttyACM0
//! ```

use std::io::Read;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info, warn};

use rs_plotter::hal::MockDriver;
use rs_plotter::{Config, PlotterController, SerialConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port_path = std::env::args()
        .nth(1)
        .context("usage: serial_link <port>")?;
    let config = Config::default().with_serial(SerialConfig::default().with_port(&port_path));

    let mut port = serialport::new(config.serial.port.as_str(), config.serial.baud)
        .timeout(Duration::from_millis(u64::from(config.serial.read_timeout_ms)))
        .open()
        .with_context(|| format!("opening serial port {port_path}"))?;

    info!(port = %port_path, baud = config.serial.baud, "serial link up");

    let mut plotter = PlotterController::with_config(MockDriver::new(), &config.control);
    plotter
        .start(0)
        .map_err(|_| anyhow::anyhow!("motor driver rejected start"))?;

    let started = Instant::now();
    let mut buf = [0u8; 64];

    loop {
        // Bounded read: a timeout is "no bytes this iteration", not an error.
        match port.read(&mut buf) {
            Ok(0) => {}
            Ok(n) => plotter.feed(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
            Err(e) => return Err(e).context("serial read"),
        }

        let now_ms = started.elapsed().as_millis() as u64;
        match plotter.tick(now_ms) {
            Ok(Some(cmd)) => {
                let wire = cmd.encode();
                let state = plotter.state();
                debug!(
                    packet = %core::str::from_utf8(&wire).unwrap_or("????????"),
                    duty_v = state.duty_v,
                    duty_h = state.duty_h,
                    "drive"
                );
            }
            Ok(None) => {}
            Err(_) => warn!("motor driver write failed"),
        }

        std::thread::sleep(Duration::from_millis(u64::from(
            config.control.tick_interval_ms,
        )));
    }
}
