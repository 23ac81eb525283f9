//! Backend contract: the operations the wider system drives on every backend.

use inputseat_domain::backend::BackendKind;
use inputseat_domain::error::InputSeatError;
use inputseat_domain::id::DeviceId;

/// Caller-side handle to a live device.
///
/// Not `Clone`: operations that invalidate a device (removal, seat change)
/// take the handle by value, so a stale handle cannot be used afterwards.
/// The handle keeps the device node it was created from, which stays valid
/// while the device itself is suspended.
#[derive(Debug, PartialEq, Eq)]
pub struct DeviceHandle {
    id: DeviceId,
    backend: BackendKind,
    devnode: String,
}

impl DeviceHandle {
    /// Mint a handle. Only backend implementations should need this.
    #[must_use]
    pub fn new(id: DeviceId, backend: BackendKind, devnode: impl Into<String>) -> Self {
        Self {
            id,
            backend,
            devnode: devnode.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Backend that created the device.
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    #[must_use]
    pub fn devnode(&self) -> &str {
        &self.devnode
    }
}

/// Enable / disable / teardown contract of a backend.
pub trait InputBackend {
    /// Tag stamped on every handle this backend hands out.
    fn kind(&self) -> BackendKind;

    /// Enable every tracked device. All or nothing: on failure no device is
    /// left enabled.
    ///
    /// # Errors
    ///
    /// Returns [`InputSeatError::ResumeAborted`] naming the first device that
    /// could not be enabled.
    fn resume(&mut self) -> Result<(), InputSeatError>;

    /// Disable every enabled device. Calling it again is a no-op.
    fn suspend(&mut self);

    /// Release everything the backend tracks.
    fn destroy(&mut self);

    /// Move a device to the logical seat `seat_name`.
    ///
    /// The old handle is consumed whatever the outcome; on success the
    /// returned handle names the re-created device.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is foreign or stale, or if the device
    /// could not be re-created under the new seat.
    fn change_seat(
        &mut self,
        device: DeviceHandle,
        seat_name: &str,
    ) -> Result<DeviceHandle, InputSeatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_id_and_backend_tag() {
        let id = DeviceId::new();
        let handle = DeviceHandle::new(id, BackendKind::Path, "/dev/input/event0");
        assert_eq!(handle.id(), id);
        assert_eq!(handle.backend(), BackendKind::Path);
        assert_eq!(handle.devnode(), "/dev/input/event0");
    }
}
