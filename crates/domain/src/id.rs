//! Typed identifier newtypes backed by UUIDs.
//!
//! Seats and devices are looked up by these ids inside a backend context;
//! they never leave the process, so the UUID only has to be unique, not stable.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }

            /// First eight hex digits, for compact log fields.
            #[must_use]
            pub fn short(self) -> String {
                let mut text = self.0.simple().to_string();
                text.truncate(8);
                text
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Seat`](crate::seat::Seat).
    SeatId
);

define_id!(
    /// Unique identifier for a live device inside a backend context.
    DeviceId
);

define_id!(
    /// Unique identifier for a [`DeviceEvent`](crate::event::DeviceEvent).
    EventId
);
