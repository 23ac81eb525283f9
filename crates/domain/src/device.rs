//! Device: an input device node as seen from outside a backend.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, SeatId};

/// Short symbolic name of a device node: everything after the last `/`.
///
/// Returns an empty string when the path has no separator.
#[must_use]
pub fn sysname_from_devnode(devnode: &str) -> &str {
    devnode.rsplit_once('/').map_or("", |(_, name)| name)
}

/// Read-only snapshot of a live device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub devnode: String,
    pub sysname: String,
    pub seat: SeatId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_take_text_after_last_separator() {
        assert_eq!(sysname_from_devnode("/dev/input/event7"), "event7");
    }

    #[test]
    fn should_return_empty_without_separator() {
        assert_eq!(sysname_from_devnode("event7"), "");
    }

    #[test]
    fn should_return_empty_for_trailing_separator() {
        assert_eq!(sysname_from_devnode("/dev/input/"), "");
    }
}
