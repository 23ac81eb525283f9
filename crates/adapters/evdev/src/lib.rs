//! # inputseat-adapter-evdev
//!
//! Device driver backed by kernel evdev nodes (`/dev/input/event*`).
//!
//! `create` opens the node and classifies what it can do. Nodes that produce
//! neither keys, pointer motion, touches nor switch events (joysticks,
//! accelerometers, …) are reported as unhandled. Absolute devices get the
//! calibration matrix configured for their node applied once, right after
//! creation.
//!
//! ## Dependency rule
//!
//! Depends on `inputseat-app` (port traits) and `inputseat-domain` only,
//! plus the `evdev` crate for the kernel interface.

mod calibration;
mod capabilities;
mod error;

use std::collections::HashMap;

use inputseat_app::ports::{DeviceDriver, DriverOutcome};
use inputseat_domain::seat::SeatName;

pub use calibration::{CalibrationError, CalibrationMatrix};
pub use capabilities::Capabilities;
pub use error::EvdevError;

/// An open evdev node managed by a seat.
pub struct EvdevDevice {
    pub device: evdev::Device,
    pub name: String,
    pub devnode: String,
    pub sysname: String,
    pub seat: SeatName,
    pub capabilities: Capabilities,
    pub calibration: CalibrationMatrix,
    grabbed: bool,
}

impl EvdevDevice {
    #[must_use]
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }
}

/// Driver opening evdev nodes directly.
#[derive(Debug, Default)]
pub struct EvdevDriver {
    calibrations: HashMap<String, CalibrationMatrix>,
    grab: bool,
}

impl EvdevDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take exclusive access to every device created from now on, so that
    /// its events stop reaching other readers.
    #[must_use]
    pub fn with_grab(mut self, grab: bool) -> Self {
        self.grab = grab;
        self
    }

    /// Calibration applied to the device created for `devnode`.
    #[must_use]
    pub fn with_calibration(mut self, devnode: impl Into<String>, matrix: CalibrationMatrix) -> Self {
        self.calibrations.insert(devnode.into(), matrix);
        self
    }
}

impl DeviceDriver for EvdevDriver {
    type Device = EvdevDevice;
    type Error = EvdevError;

    fn create(
        &mut self,
        seat: &SeatName,
        devnode: &str,
        sysname: &str,
    ) -> Result<DriverOutcome<EvdevDevice>, EvdevError> {
        let mut device = evdev::Device::open(devnode).map_err(|source| EvdevError::Open {
            devnode: devnode.to_string(),
            source,
        })?;

        let capabilities = Capabilities::of(&device);
        let name = device.name().unwrap_or_default().to_string();
        if capabilities.is_empty() {
            tracing::debug!("{sysname} - '{name}' has no usable capabilities");
            return Ok(DriverOutcome::Unhandled);
        }

        if self.grab {
            device.grab().map_err(|source| EvdevError::Grab {
                devnode: devnode.to_string(),
                source,
            })?;
        }

        tracing::info!(%seat, capabilities = %capabilities, "{sysname:<7} - {name}");
        Ok(DriverOutcome::Created(EvdevDevice {
            device,
            name,
            devnode: devnode.to_string(),
            sysname: sysname.to_string(),
            seat: seat.clone(),
            capabilities,
            calibration: CalibrationMatrix::IDENTITY,
            grabbed: self.grab,
        }))
    }

    fn read_calibration(&mut self, device: &mut EvdevDevice) {
        let Some(matrix) = self.calibrations.get(&device.devnode).copied() else {
            return;
        };

        if !device.capabilities.absolute {
            tracing::debug!("{} - ignoring calibration, device has no absolute axes", device.sysname);
            return;
        }
        if !matrix.is_identity() {
            tracing::info!(%matrix, "{} - applying calibration", device.sysname);
        }
        device.calibration = matrix;
    }

    fn remove(&mut self, mut device: EvdevDevice) {
        let released = if device.grabbed {
            device.device.ungrab()
        } else {
            Ok(())
        };
        if let Err(err) = released {
            tracing::warn!(error = %err, "{} - failed to release grab", device.sysname);
        }
        tracing::debug!("{} - closing '{}'", device.sysname, device.name);
    }
}
