//! Device driver port: turns a device node into a live device.
//!
//! The driver owns everything hardware specific: opening the node, decoding
//! its events, quirks and calibration. The backend only decides *when* a
//! device is created or torn down and which seat it belongs to.

use inputseat_domain::seat::SeatName;

/// Result of a successful call to [`DeviceDriver::create`].
#[derive(Debug)]
pub enum DriverOutcome<D> {
    /// The driver now manages the node.
    Created(D),
    /// The driver recognised the node but does not handle this kind of device.
    Unhandled,
}

/// A pluggable device driver.
///
/// Every call is synchronous and happens on the backend's thread; the driver
/// must not keep references into backend state between calls.
pub trait DeviceDriver {
    /// Driver-owned state of one live device.
    type Device;

    /// Error produced when creation fails outright.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Materialise a device for `devnode` on `seat`.
    ///
    /// `sysname` is the short name of the node (text after the last `/`).
    ///
    /// # Errors
    ///
    /// Returns the driver error when the node cannot be opened or set up.
    /// A node the driver merely does not want is
    /// [`DriverOutcome::Unhandled`], not an error.
    fn create(
        &mut self,
        seat: &SeatName,
        devnode: &str,
        sysname: &str,
    ) -> Result<DriverOutcome<Self::Device>, Self::Error>;

    /// Apply device-specific calibration. Called once, right after a
    /// successful [`create`](Self::create).
    fn read_calibration(&mut self, device: &mut Self::Device);

    /// Tear a device down and release everything the driver holds for it.
    fn remove(&mut self, device: Self::Device);
}
