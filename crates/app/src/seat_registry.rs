//! Seat registry: lookup and reference counting for the seats of one context.

use inputseat_domain::id::{DeviceId, SeatId};
use inputseat_domain::seat::{Seat, SeatName};

use crate::refcount::RefArena;

/// All live seats of a backend context, deduplicated by name.
///
/// At most one seat exists per `(physical, logical)` pair. A seat stays in
/// the registry exactly as long as it has holders: every member device holds
/// one reference, and so does every caller walking it.
#[derive(Debug, Default)]
pub struct SeatRegistry {
    seats: RefArena<SeatId, Seat>,
}

impl SeatRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the seat with exactly this name pair.
    #[must_use]
    pub fn find_seat(&self, physical: &str, logical: &str) -> Option<SeatId> {
        self.seats
            .iter()
            .find(|(_, seat)| seat.name.matches(physical, logical))
            .map(|(id, _)| id)
    }

    /// Register a new seat. The returned id carries one reference, owned by
    /// the caller.
    pub fn create_seat(&mut self, name: SeatName) -> SeatId {
        let id = SeatId::new();
        tracing::debug!(seat = %name, id = %id.short(), "creating seat");
        self.seats.insert(id, Seat::new(id, name))
    }

    /// Look the name up, taking a reference on an existing seat or creating
    /// a new one. Either way the caller ends up holding one reference.
    pub fn resolve(&mut self, name: SeatName) -> SeatId {
        match self.find_seat(&name.physical, &name.logical) {
            Some(id) => {
                self.seats.acquire(id);
                id
            }
            None => self.create_seat(name),
        }
    }

    /// Take one more reference. Returns `false` if the seat is gone.
    pub fn acquire(&mut self, id: SeatId) -> bool {
        self.seats.acquire(id)
    }

    /// Drop one reference, destroying the seat when it was the last one.
    ///
    /// The destroyed seat is returned so callers can tell that it is gone;
    /// it has already been removed from the registry.
    pub fn release(&mut self, id: SeatId) -> Option<Seat> {
        let seat = self.seats.release(id)?;
        tracing::debug!(seat = %seat.name, id = %id.short(), "destroying seat");
        Some(seat)
    }

    #[must_use]
    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(id)
    }

    /// Append `device` to the seat's member list.
    pub fn link_device(&mut self, id: SeatId, device: DeviceId) -> bool {
        match self.seats.get_mut(id) {
            Some(seat) => {
                seat.link(device);
                true
            }
            None => false,
        }
    }

    /// Remove `device` from the seat's member list, returning whether it was
    /// a member.
    pub fn unlink_device(&mut self, id: SeatId, device: DeviceId) -> bool {
        self.seats
            .get_mut(id)
            .is_some_and(|seat| seat.unlink(device))
    }

    #[must_use]
    pub fn ref_count(&self, id: SeatId) -> Option<usize> {
        self.seats.count(id)
    }

    /// Snapshot of seat ids in creation order.
    #[must_use]
    pub fn ids(&self) -> Vec<SeatId> {
        self.seats.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().map(|(_, seat)| seat)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
