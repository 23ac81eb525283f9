//! Counters shared between a virtual driver and its observers.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct DriverStats {
    created: AtomicUsize,
    removed: AtomicUsize,
    calibrated: AtomicUsize,
}

impl DriverStats {
    pub(crate) fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_removed(&self) {
        self.removed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_calibrated(&self) {
        self.calibrated.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn calibrated(&self) -> usize {
        self.calibrated.load(Ordering::Relaxed)
    }

    /// Devices created and not yet removed.
    #[must_use]
    pub fn live(&self) -> usize {
        self.created().saturating_sub(self.removed())
    }
}
