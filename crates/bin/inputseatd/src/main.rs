//! # inputseatd: input seat daemon
//!
//! Composition root that wires a device driver into the path backend.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise structured logging
//! - Construct the driver adapter selected by the configuration
//! - Add the configured device nodes and move them to their seats
//! - Log device events published on the in-process bus
//! - Tear every device down on SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no seat logic belongs here.

mod config;

use std::error::Error;
use std::sync::Arc;

use inputseat_adapter_evdev::EvdevDriver;
use inputseat_adapter_virtual::VirtualDriver;
use inputseat_app::backend::InputBackend;
use inputseat_app::event_bus::InProcessEventBus;
use inputseat_app::ports::DeviceDriver;
use inputseat_app::services::PathBackend;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DeviceConfig, DriverKind};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Event bus
    let bus = Arc::new(InProcessEventBus::new(256));
    let mut events = bus.subscribe();
    let logger = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::info!(
                    kind = ?event.kind,
                    seat = %event.seat,
                    device_id = %event.device.short(),
                    "{}",
                    event.devnode
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event logger lagging behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tracing::info!(driver = ?config.driver.kind, devices = config.devices.len(), "starting inputseatd");
    match config.driver.kind {
        DriverKind::Evdev => {
            let driver = config.devices.iter().fold(
                EvdevDriver::new().with_grab(config.driver.grab),
                |driver, device| match device.calibration {
                    Some(matrix) => driver.with_calibration(&device.path, matrix),
                    None => driver,
                },
            );
            run(driver, Arc::clone(&bus), &config.devices).await?;
        }
        DriverKind::Virtual => {
            let driver = config.devices.iter().fold(VirtualDriver::new(), |driver, device| {
                let driver = driver.with_behavior(&device.path, device.behavior);
                match device.calibration {
                    Some(matrix) => driver.with_calibration(&device.path, matrix.0),
                    None => driver,
                }
            });
            run(driver, Arc::clone(&bus), &config.devices).await?;
        }
    }

    // Closing the last sender lets the logger drain what is buffered and stop.
    drop(bus);
    logger.await?;
    Ok(())
}

/// Add the configured devices, wait for SIGINT, then shut the backend down.
async fn run<D: DeviceDriver>(
    driver: D,
    bus: Arc<InProcessEventBus>,
    devices: &[DeviceConfig],
) -> Result<(), Box<dyn Error>> {
    let mut backend = PathBackend::builder().driver(driver).publisher(bus).build()?;

    for device in devices {
        let handle = match backend.add_device(&device.path) {
            Ok(handle) => handle,
            Err(err) if err.is_device_rejection() => {
                tracing::warn!(error = %err, "skipping '{}'", device.path);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let Some(seat) = &device.seat else {
            continue;
        };
        if let Err(err) = backend.change_seat(handle, seat) {
            tracing::warn!(error = %err, "could not move '{}' to seat '{seat}'", device.path);
        }
    }

    for seat in backend.seats() {
        tracing::info!(seat = %seat.name, devices = seat.devices().len(), "seat ready");
    }
    if backend.device_count() == 0 {
        tracing::warn!("no input device is active");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    backend.shutdown();
    Ok(())
}
