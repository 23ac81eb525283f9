//! Backend tag: which backend implementation created a device.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a backend implementation by value.
///
/// Every device handle carries the tag of the backend that created it, and
/// backend entry points compare tags before touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Devices added explicitly by path.
    Path,
    /// Devices discovered through hot-plug enumeration.
    Udev,
}

impl BackendKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Udev => "udev",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
