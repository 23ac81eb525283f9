//! evdev adapter error types.

/// Errors specific to the evdev driver.
#[derive(Debug, thiserror::Error)]
pub enum EvdevError {
    /// The device node could not be opened.
    #[error("failed to open '{devnode}'")]
    Open {
        devnode: String,
        #[source]
        source: std::io::Error,
    },

    /// Exclusive access to the device could not be obtained.
    #[error("failed to grab '{devnode}'")]
    Grab {
        devnode: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_open_error_with_devnode() {
        let err = EvdevError::Open {
            devnode: "/dev/input/event0".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.to_string(), "failed to open '/dev/input/event0'");
    }

    #[test]
    fn should_keep_io_error_as_source() {
        let err = EvdevError::Grab {
            devnode: "/dev/input/event0".to_string(),
            source: std::io::Error::other("busy"),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "busy");
    }
}
