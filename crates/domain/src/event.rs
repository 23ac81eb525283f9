//! Event: an immutable record of a device joining or leaving a seat.
//!
//! Backends emit one `Added` event per successfully enabled device and one
//! `Removed` event per device torn down, whatever the reason (explicit
//! removal, suspend, seat change).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, EventId};
use crate::seat::SeatName;

/// UTC time at which an event was produced.
pub type Timestamp = DateTime<Utc>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceEventKind {
    Added,
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub id: EventId,
    pub kind: DeviceEventKind,
    pub device: DeviceId,
    pub devnode: String,
    pub seat: SeatName,
    pub timestamp: Timestamp,
}

impl DeviceEvent {
    fn new(kind: DeviceEventKind, device: DeviceId, devnode: &str, seat: &SeatName) -> Self {
        Self {
            id: EventId::new(),
            kind,
            device,
            devnode: devnode.to_string(),
            seat: seat.clone(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn added(device: DeviceId, devnode: &str, seat: &SeatName) -> Self {
        Self::new(DeviceEventKind::Added, device, devnode, seat)
    }

    #[must_use]
    pub fn removed(device: DeviceId, devnode: &str, seat: &SeatName) -> Self {
        Self::new(DeviceEventKind::Removed, device, devnode, seat)
    }
}
