//! Seat: a named group of input devices.
//!
//! A seat is identified by its `(physical, logical)` name pair. The physical
//! name is the stable key; the logical name can be overridden per device by
//! the caller, which moves the device into a different seat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InputSeatError, ValidationError};
use crate::id::{DeviceId, SeatId};

/// Physical seat name every path-backed device is assigned to.
pub const DEFAULT_PHYSICAL_SEAT: &str = "seat0";

/// Logical seat name used when the caller gives no override.
pub const DEFAULT_LOGICAL_SEAT: &str = "default";

/// The `(physical, logical)` identity of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatName {
    pub physical: String,
    pub logical: String,
}

impl SeatName {
    #[must_use]
    pub fn new(physical: impl Into<String>, logical: impl Into<String>) -> Self {
        Self {
            physical: physical.into(),
            logical: logical.into(),
        }
    }

    /// Name a path device resolves to: the default physical seat, and either
    /// the logical override or the default logical name.
    #[must_use]
    pub fn default_for(logical_override: Option<&str>) -> Self {
        Self::new(
            DEFAULT_PHYSICAL_SEAT,
            logical_override.unwrap_or(DEFAULT_LOGICAL_SEAT),
        )
    }

    /// Exact string comparison on both halves.
    #[must_use]
    pub fn matches(&self, physical: &str, logical: &str) -> bool {
        self.physical == physical && self.logical == logical
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`InputSeatError::Validation`] when either half is empty.
    pub fn validate(&self) -> Result<(), InputSeatError> {
        if self.physical.is_empty() || self.logical.is_empty() {
            return Err(ValidationError::EmptySeatName.into());
        }
        Ok(())
    }
}

impl fmt::Display for SeatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.physical, self.logical)
    }
}

/// A seat and its member devices, in the order they were enabled.
#[derive(Debug, Clone)]
pub struct Seat {
    pub id: SeatId,
    pub name: SeatName,
    devices: Vec<DeviceId>,
}

impl Seat {
    #[must_use]
    pub fn new(id: SeatId, name: SeatName) -> Self {
        Self {
            id,
            name,
            devices: Vec::new(),
        }
    }

    #[must_use]
    pub fn physical_name(&self) -> &str {
        &self.name.physical
    }

    #[must_use]
    pub fn logical_name(&self) -> &str {
        &self.name.logical
    }

    /// Member devices in enable order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    #[must_use]
    pub fn contains(&self, device: DeviceId) -> bool {
        self.devices.contains(&device)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Append a device to the member list. Linking twice is a no-op.
    pub fn link(&mut self, device: DeviceId) {
        if !self.contains(device) {
            self.devices.push(device);
        }
    }

    /// Remove a device from the member list, returning whether it was there.
    pub fn unlink(&mut self, device: DeviceId) -> bool {
        let before = self.devices.len();
        self.devices.retain(|member| *member != device);
        self.devices.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_defaults_without_override() {
        let name = SeatName::default_for(None);
        assert_eq!(name.physical, "seat0");
        assert_eq!(name.logical, "default");
    }

    #[test]
    fn should_apply_logical_override() {
        let name = SeatName::default_for(Some("left-desk"));
        assert_eq!(name.physical, DEFAULT_PHYSICAL_SEAT);
        assert_eq!(name.logical, "left-desk");
    }

    #[test]
    fn should_match_exact_pair_only() {
        let name = SeatName::new("seat0", "default");
        assert!(name.matches("seat0", "default"));
        assert!(!name.matches("seat0", "Default"));
        assert!(!name.matches("seat1", "default"));
    }

    #[test]
    fn should_reject_empty_logical_name() {
        let result = SeatName::new("seat0", "").validate();
        assert!(matches!(
            result,
            Err(InputSeatError::Validation(ValidationError::EmptySeatName))
        ));
    }

    #[test]
    fn should_display_as_physical_slash_logical() {
        assert_eq!(SeatName::default_for(None).to_string(), "seat0/default");
    }

    #[test]
    fn should_keep_members_in_link_order() {
        let mut seat = Seat::new(SeatId::new(), SeatName::default_for(None));
        let a = DeviceId::new();
        let b = DeviceId::new();
        seat.link(a);
        seat.link(b);
        seat.link(a);
        assert_eq!(seat.devices(), &[a, b]);
    }

    #[test]
    fn should_report_whether_unlink_removed_a_member() {
        let mut seat = Seat::new(SeatId::new(), SeatName::default_for(None));
        let a = DeviceId::new();
        seat.link(a);
        assert!(seat.unlink(a));
        assert!(!seat.unlink(a));
        assert!(seat.is_empty());
    }
}
