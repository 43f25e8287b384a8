//! FuzzyFan main entry point
//!
//! Hexagonal architecture around a synchronous polling loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SerialTransport ─▶ LineLink        LogEventSink         │
//! │                     (Telemetry+     (EventSink)          │
//! │                      Actuator)                           │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ───────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          ControlLoop (pure logic)              │      │
//! │  │  parse · FanController (fuzzy) · quantize      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use tracing_subscriber::prelude::*;

use fuzzyfan::adapters::link::LineLink;
use fuzzyfan::adapters::log_sink::LogEventSink;
use fuzzyfan::adapters::serial::SerialTransport;
use fuzzyfan::app::service::ControlLoop;
use fuzzyfan::config::SystemConfig;
use fuzzyfan::control::FanController;

// ── Command line ──────────────────────────────────────────────

/// Fuzzy-logic fan controller for a serial temperature/humidity sensor.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long, env = "FUZZYFAN_CONFIG")]
    config: Option<PathBuf>,

    /// Serial device (e.g. /dev/ttyACM0, COM3)
    #[arg(short, long, env = "FUZZYFAN_PORT")]
    port: Option<String>,

    #[arg(short, long)]
    baud_rate: Option<u32>,

    /// Maximum wait for one serial read
    #[arg(long)]
    read_timeout_ms: Option<u64>,

    /// Sleep between polls when no data is waiting
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Wait after opening the port while the device resets
    #[arg(long)]
    settle_delay_ms: Option<u64>,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn apply(&self, config: &mut SystemConfig) {
        if let Some(port) = &self.port {
            config.port.clone_from(port);
        }
        if let Some(v) = self.baud_rate {
            config.baud_rate = v;
        }
        if let Some(v) = self.read_timeout_ms {
            config.read_timeout_ms = v;
        }
        if let Some(v) = self.poll_interval_ms {
            config.poll_interval_ms = v;
        }
        if let Some(v) = self.settle_delay_ms {
            config.settle_delay_ms = v;
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| args.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    info!("FuzzyFan v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => SystemConfig::load(path).context("loading configuration")?,
        None => SystemConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    // ── 2. Rule base (validated once, before any I/O) ─────────
    let controller = FanController::new(&config).context("building fuzzy rule base")?;
    info!(
        "rule base ready: {} rules, defuzzifier {:?}",
        controller.engine().rules().len(),
        controller.defuzzifier()
    );

    // ── 3. Operator interrupt ─────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            warn!("interrupt received, stopping");
            shutdown.store(true, Ordering::Relaxed);
        })
        .context("installing interrupt handler")?;
    }

    // ── 4. Transport ──────────────────────────────────────────
    let transport = SerialTransport::open(&config).context("connecting to the sensor node")?;
    info!(
        "waiting {} ms for {} to settle",
        config.settle_delay_ms,
        transport.name()
    );
    std::thread::sleep(config.settle_delay());
    let mut link = LineLink::new(transport);

    // ── 5. Control loop ───────────────────────────────────────
    // The port is released when `link` drops, on success and on error.
    let mut sink = LogEventSink::new();
    let mut app = ControlLoop::new(&controller);
    app.run(&mut link, &mut sink, &shutdown, config.poll_interval())
        .context("control loop aborted")?;
    Ok(())
}
