//! # inputseat-adapter-virtual
//!
//! Virtual device driver that fabricates devices without touching the
//! filesystem, for testing and demonstration purposes.
//!
//! ## Behaviour
//!
//! | Behaviour | Result of `create` |
//! |-----------|--------------------|
//! | `accept` (default) | a [`VirtualDevice`] bound to the requested seat |
//! | `unhandled` | [`DriverOutcome::Unhandled`] |
//! | `fail` | [`VirtualError::Simulated`] |
//!
//! Counters in [`DriverStats`] are shared through an `Arc`, so they can be
//! observed after the driver has been moved into a backend.
//!
//! ## Dependency rule
//!
//! Depends on `inputseat-app` (port traits) and `inputseat-domain` only.

mod stats;

use std::collections::HashMap;
use std::sync::Arc;

use inputseat_app::ports::{DeviceDriver, DriverOutcome};
use inputseat_domain::seat::SeatName;
use serde::Deserialize;

pub use stats::DriverStats;

/// What the driver does when asked to create a device for a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    Accept,
    Unhandled,
    Fail,
}

/// Errors produced by the virtual driver.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// A node scripted with [`Behavior::Fail`] was requested.
    #[error("simulated failure opening '{0}'")]
    Simulated(String),
}

/// A fabricated device.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualDevice {
    pub devnode: String,
    pub sysname: String,
    pub seat: SeatName,
    /// Calibration applied by [`DeviceDriver::read_calibration`], if any was
    /// configured for the node.
    pub calibration: Option<[f32; 6]>,
}

/// Scriptable in-memory driver.
#[derive(Debug, Default)]
pub struct VirtualDriver {
    behaviors: HashMap<String, Behavior>,
    calibrations: HashMap<String, [f32; 6]>,
    stats: Arc<DriverStats>,
}

impl VirtualDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the behaviour for one node.
    #[must_use]
    pub fn with_behavior(mut self, devnode: impl Into<String>, behavior: Behavior) -> Self {
        self.set_behavior(devnode, behavior);
        self
    }

    /// Configure the calibration matrix reported for one node.
    #[must_use]
    pub fn with_calibration(mut self, devnode: impl Into<String>, matrix: [f32; 6]) -> Self {
        self.calibrations.insert(devnode.into(), matrix);
        self
    }

    /// Change the behaviour for one node; takes effect on the next `create`.
    pub fn set_behavior(&mut self, devnode: impl Into<String>, behavior: Behavior) {
        self.behaviors.insert(devnode.into(), behavior);
    }

    /// Shared counters, still readable once the driver is owned by a backend.
    #[must_use]
    pub fn stats(&self) -> Arc<DriverStats> {
        Arc::clone(&self.stats)
    }

    fn behavior(&self, devnode: &str) -> Behavior {
        self.behaviors.get(devnode).copied().unwrap_or_default()
    }
}

impl DeviceDriver for VirtualDriver {
    type Device = VirtualDevice;
    type Error = VirtualError;

    fn create(
        &mut self,
        seat: &SeatName,
        devnode: &str,
        sysname: &str,
    ) -> Result<DriverOutcome<VirtualDevice>, VirtualError> {
        match self.behavior(devnode) {
            Behavior::Fail => Err(VirtualError::Simulated(devnode.to_string())),
            Behavior::Unhandled => Ok(DriverOutcome::Unhandled),
            Behavior::Accept => {
                self.stats.record_created();
                tracing::debug!(%seat, "virtual device '{devnode}' created");
                Ok(DriverOutcome::Created(VirtualDevice {
                    devnode: devnode.to_string(),
                    sysname: sysname.to_string(),
                    seat: seat.clone(),
                    calibration: None,
                }))
            }
        }
    }

    fn read_calibration(&mut self, device: &mut VirtualDevice) {
        self.stats.record_calibrated();
        device.calibration = self.calibrations.get(&device.devnode).copied();
    }

    fn remove(&mut self, device: VirtualDevice) {
        self.stats.record_removed();
        tracing::debug!(seat = %device.seat, "virtual device '{}' removed", device.devnode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(driver: &mut VirtualDriver, devnode: &str) -> Result<DriverOutcome<VirtualDevice>, VirtualError> {
        driver.create(&SeatName::default_for(None), devnode, "event0")
    }

    #[test]
    fn should_accept_unscripted_nodes() {
        let mut driver = VirtualDriver::new();
        let outcome = create(&mut driver, "/dev/input/event0").unwrap();

        let DriverOutcome::Created(device) = outcome else {
            panic!("expected a device");
        };
        assert_eq!(device.devnode, "/dev/input/event0");
        assert_eq!(device.seat.logical, "default");
        assert_eq!(driver.stats().live(), 1);
    }

    #[test]
    fn should_decline_unhandled_nodes() {
        let mut driver = VirtualDriver::new().with_behavior("/dev/input/js0", Behavior::Unhandled);
        let outcome = create(&mut driver, "/dev/input/js0").unwrap();
        assert!(matches!(outcome, DriverOutcome::Unhandled));
        assert_eq!(driver.stats().created(), 0);
    }

    #[test]
    fn should_fail_scripted_nodes() {
        let mut driver = VirtualDriver::new().with_behavior("/dev/input/event9", Behavior::Fail);
        let err = create(&mut driver, "/dev/input/event9").unwrap_err();
        assert_eq!(err.to_string(), "simulated failure opening '/dev/input/event9'");
    }

    #[test]
    fn should_apply_configured_calibration() {
        let matrix = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mut driver = VirtualDriver::new().with_calibration("/dev/input/event0", matrix);
        let DriverOutcome::Created(mut device) = create(&mut driver, "/dev/input/event0").unwrap() else {
            panic!("expected a device");
        };

        driver.read_calibration(&mut device);

        assert_eq!(device.calibration, Some(matrix));
        assert_eq!(driver.stats().calibrated(), 1);
    }

    #[test]
    fn should_track_live_devices_through_shared_stats() {
        let mut driver = VirtualDriver::new();
        let stats = driver.stats();
        let DriverOutcome::Created(device) = create(&mut driver, "/dev/input/event0").unwrap() else {
            panic!("expected a device");
        };

        driver.remove(device);

        assert_eq!(stats.created(), 1);
        assert_eq!(stats.removed(), 1);
        assert_eq!(stats.live(), 0);
    }

    #[test]
    fn should_deserialize_behavior_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            behavior: Behavior,
        }
        let parsed: Wrapper = toml::from_str("behavior = 'unhandled'").unwrap();
        assert_eq!(parsed.behavior, Behavior::Unhandled);
    }
}
