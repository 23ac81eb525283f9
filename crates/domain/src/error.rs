//! Common error types used across the workspace.
//!
//! Each layer converts its own failures into [`InputSeatError`] at the
//! port boundary. Driver failures are boxed so that the domain never
//! depends on a concrete driver crate.

use crate::backend::BackendKind;
use crate::id::DeviceId;

/// Boxed source error coming from an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by backend operations.
#[derive(Debug, thiserror::Error)]
pub enum InputSeatError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The context was created without driver bindings.
    #[error("no device driver bindings supplied")]
    MissingDriver,

    /// The driver recognised the node but declined to manage it.
    #[error("not using input device '{devnode}'")]
    Unhandled { devnode: String },

    /// The driver failed while creating the device.
    #[error("failed to create input device '{devnode}'")]
    Driver {
        devnode: String,
        #[source]
        source: BoxError,
    },

    /// A device handle was passed to a backend that did not create it.
    #[error("mismatching backends: expected {expected}, got {found}")]
    BackendMismatch {
        expected: BackendKind,
        found: BackendKind,
    },

    /// The handle does not name a live device of this context.
    #[error("device {0} is not live in this context")]
    UnknownDevice(DeviceId),

    /// `resume` stopped at the first device that could not be enabled.
    #[error("resume aborted at '{devnode}'")]
    ResumeAborted {
        devnode: String,
        #[source]
        source: Box<InputSeatError>,
    },

    /// A publisher could not deliver an event, e.g. because its
    /// subscribers are gone. Backends log it and carry on.
    #[error("failed to publish device event")]
    Publish(#[source] BoxError),
}

impl InputSeatError {
    /// Whether this error only means "the driver did not produce a device".
    ///
    /// Both rejections and creation failures count; callers treat them the
    /// same way.
    #[must_use]
    pub fn is_device_rejection(&self) -> bool {
        matches!(self, Self::Unhandled { .. } | Self::Driver { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("seat name must not be empty")]
    EmptySeatName,
}
