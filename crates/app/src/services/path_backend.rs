//! Path backend: devices added and removed explicitly by device node path.
//!
//! The backend keeps one record per path the caller added, resolves each
//! record to a seat, and asks the [`DeviceDriver`] to materialise a device on
//! it. Seats are reference counted: every live device holds one reference,
//! and every walk over a seat holds a temporary one so the seat cannot be
//! destroyed under it.

use inputseat_domain::backend::BackendKind;
use inputseat_domain::device::{DeviceInfo, sysname_from_devnode};
use inputseat_domain::error::InputSeatError;
use inputseat_domain::event::DeviceEvent;
use inputseat_domain::id::{DeviceId, SeatId};
use inputseat_domain::seat::{Seat, SeatName};

use crate::backend::{DeviceHandle, InputBackend};
use crate::ports::{DeviceDriver, DriverOutcome, EventPublisher, NullPublisher};
use crate::refcount::RefArena;
use crate::seat_registry::SeatRegistry;

/// Bookkeeping for one path the caller added.
#[derive(Debug)]
struct PathRecord {
    devnode: String,
    sysname: String,
    /// Live device currently backed by this record, if any.
    device: Option<DeviceId>,
}

impl PathRecord {
    fn new(devnode: &str) -> Self {
        Self {
            devnode: devnode.to_string(),
            sysname: sysname_from_devnode(devnode).to_string(),
            device: None,
        }
    }
}

struct LiveDevice<T> {
    devnode: String,
    sysname: String,
    seat: SeatId,
    inner: T,
}

/// Create a path backend context.
///
/// # Errors
///
/// Returns [`InputSeatError::MissingDriver`] when `driver` is `None`.
pub fn create_context<D, U>(
    driver: Option<D>,
    user_data: U,
) -> Result<PathBackend<D, NullPublisher, U>, InputSeatError>
where
    D: DeviceDriver,
{
    let mut builder = PathBackendBuilder::new().user_data(user_data);
    if let Some(driver) = driver {
        builder = builder.driver(driver);
    }
    builder.build()
}

/// Step-by-step builder for [`PathBackend`].
pub struct PathBackendBuilder<D, P = NullPublisher, U = ()> {
    driver: Option<D>,
    publisher: P,
    user_data: U,
}

impl<D> PathBackendBuilder<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            driver: None,
            publisher: NullPublisher,
            user_data: (),
        }
    }
}

impl<D> Default for PathBackendBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, P, U> PathBackendBuilder<D, P, U> {
    #[must_use]
    pub fn driver(mut self, driver: D) -> Self {
        self.driver = Some(driver);
        self
    }

    #[must_use]
    pub fn publisher<Q>(self, publisher: Q) -> PathBackendBuilder<D, Q, U> {
        PathBackendBuilder {
            driver: self.driver,
            publisher,
            user_data: self.user_data,
        }
    }

    #[must_use]
    pub fn user_data<V>(self, user_data: V) -> PathBackendBuilder<D, P, V> {
        PathBackendBuilder {
            driver: self.driver,
            publisher: self.publisher,
            user_data,
        }
    }
}

impl<D: DeviceDriver, P: EventPublisher, U> PathBackendBuilder<D, P, U> {
    /// Consume the builder and return a [`PathBackend`] with nothing tracked.
    ///
    /// # Errors
    ///
    /// Returns [`InputSeatError::MissingDriver`] if no driver was supplied.
    pub fn build(self) -> Result<PathBackend<D, P, U>, InputSeatError> {
        let driver = self.driver.ok_or(InputSeatError::MissingDriver)?;
        Ok(PathBackend {
            driver,
            publisher: self.publisher,
            user_data: self.user_data,
            seats: SeatRegistry::new(),
            devices: RefArena::new(),
            paths: Vec::new(),
        })
    }
}

/// Backend context for devices added by path.
pub struct PathBackend<D: DeviceDriver, P = NullPublisher, U = ()> {
    driver: D,
    publisher: P,
    user_data: U,
    seats: SeatRegistry,
    devices: RefArena<DeviceId, LiveDevice<D::Device>>,
    paths: Vec<PathRecord>,
}

impl<D: DeviceDriver> PathBackend<D> {
    /// Create a builder for constructing a [`PathBackend`].
    #[must_use]
    pub fn builder() -> PathBackendBuilder<D> {
        PathBackendBuilder::new()
    }
}

impl<D: DeviceDriver, P: EventPublisher, U> PathBackend<D, P, U> {
    /// Start tracking `path` and enable a device for it on the default seat.
    ///
    /// # Errors
    ///
    /// Returns [`InputSeatError::Unhandled`] or [`InputSeatError::Driver`]
    /// when the driver produced no device. The path is not tracked then.
    #[tracing::instrument(skip(self))]
    pub fn add_device(&mut self, path: &str) -> Result<DeviceHandle, InputSeatError> {
        self.create_device(path, None)
    }

    /// Stop tracking a device's path and tear the device down.
    ///
    /// The path record goes away even when the device is not enabled, for
    /// instance while the context is suspended.
    ///
    /// # Errors
    ///
    /// Returns [`InputSeatError::BackendMismatch`] for a handle created by
    /// another backend implementation (nothing is touched), or
    /// [`InputSeatError::UnknownDevice`] when the handle names neither a
    /// tracked path nor a live device of this context.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id().short(), devnode = device.devnode()))]
    pub fn remove_device(&mut self, device: DeviceHandle) -> Result<(), InputSeatError> {
        self.check_backend(&device)?;
        let id = device.id();

        let tracked = match self.record_of(&device) {
            Some(index) => {
                self.paths.remove(index);
                true
            }
            None => false,
        };

        match self.devices.get(id).map(|live| live.seat) {
            Some(seat) => {
                self.with_seat_held(seat, |backend| backend.disable_device(id));
                Ok(())
            }
            None if tracked => {
                tracing::debug!("forgot path of disabled device");
                Ok(())
            }
            None => Err(InputSeatError::UnknownDevice(id)),
        }
    }

    /// Suspend, then release every tracked path.
    pub fn shutdown(mut self) {
        self.suspend();
        self.destroy();
    }

    /// Live seats in creation order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    #[must_use]
    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(id)
    }

    #[must_use]
    pub fn find_seat(&self, physical: &str, logical: &str) -> Option<&Seat> {
        self.seats
            .find_seat(physical, logical)
            .and_then(|id| self.seats.get(id))
    }

    /// Number of holders of a seat: one per member device plus any walk in
    /// progress. `None` once the seat is destroyed.
    #[must_use]
    pub fn seat_ref_count(&self, id: SeatId) -> Option<usize> {
        self.seats.ref_count(id)
    }

    /// Seat the device currently belongs to.
    #[must_use]
    pub fn seat_of(&self, device: &DeviceHandle) -> Option<&Seat> {
        self.devices
            .get(device.id())
            .and_then(|live| self.seats.get(live.seat))
    }

    #[must_use]
    pub fn device(&self, device: &DeviceHandle) -> Option<DeviceInfo> {
        self.device_by_id(device.id())
    }

    #[must_use]
    pub fn device_by_id(&self, id: DeviceId) -> Option<DeviceInfo> {
        self.devices.get(id).map(|live| DeviceInfo {
            id,
            devnode: live.devnode.clone(),
            sysname: live.sysname.clone(),
            seat: live.seat,
        })
    }

    /// Driver-owned state of a live device.
    #[must_use]
    pub fn driver_device(&self, device: &DeviceHandle) -> Option<&D::Device> {
        self.devices.get(device.id()).map(|live| &live.inner)
    }

    /// Tracked paths in the order they were added.
    pub fn devnodes(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|record| record.devnode.as_str())
    }

    /// Number of live devices across all seats.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    #[must_use]
    pub fn user_data(&self) -> &U {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut U {
        &mut self.user_data
    }

    /// Record owning the handle's path: the one bound to the device, or, once
    /// the device was disabled, an unbound record for the same devnode.
    fn record_of(&self, device: &DeviceHandle) -> Option<usize> {
        let id = device.id();
        self.paths
            .iter()
            .position(|record| record.device == Some(id))
            .or_else(|| {
                self.paths.iter().position(|record| {
                    record.device.is_none() && record.devnode == device.devnode()
                })
            })
    }

    fn check_backend(&self, device: &DeviceHandle) -> Result<(), InputSeatError> {
        let found = device.backend();
        if found == self.kind() {
            return Ok(());
        }
        tracing::error!(expected = %self.kind(), %found, "client bug: mismatching backends");
        Err(InputSeatError::BackendMismatch {
            expected: self.kind(),
            found,
        })
    }

    /// Track `devnode` and enable it. The record does not survive a failure.
    fn create_device(
        &mut self,
        devnode: &str,
        seat_override: Option<&str>,
    ) -> Result<DeviceHandle, InputSeatError> {
        self.paths.push(PathRecord::new(devnode));
        let index = self.paths.len() - 1;

        match self.enable_record(index, seat_override) {
            Ok(id) => Ok(DeviceHandle::new(id, self.kind(), devnode)),
            Err(err) => {
                self.paths.remove(index);
                Err(err)
            }
        }
    }

    /// Resolve the record's seat and ask the driver for a device on it.
    fn enable_record(
        &mut self,
        index: usize,
        seat_override: Option<&str>,
    ) -> Result<DeviceId, InputSeatError> {
        let devnode = self.paths[index].devnode.clone();
        let sysname = self.paths[index].sysname.clone();
        let name = SeatName::default_for(seat_override);

        // Temporary reference for the duration of device creation.
        let seat = self.seats.resolve(name.clone());
        let created = self.create_on_seat(seat, &name, &devnode, &sysname);
        self.seats.release(seat);

        let id = created?;
        self.paths[index].device = Some(id);
        Ok(id)
    }

    fn create_on_seat(
        &mut self,
        seat: SeatId,
        name: &SeatName,
        devnode: &str,
        sysname: &str,
    ) -> Result<DeviceId, InputSeatError> {
        let mut inner = match self.driver.create(name, devnode, sysname) {
            Ok(DriverOutcome::Created(inner)) => inner,
            Ok(DriverOutcome::Unhandled) => {
                tracing::info!("{sysname:<7} - not using input device '{devnode}'");
                return Err(InputSeatError::Unhandled {
                    devnode: devnode.to_string(),
                });
            }
            Err(err) => {
                tracing::info!(error = %err, "{sysname:<7} - failed to create input device '{devnode}'");
                return Err(InputSeatError::Driver {
                    devnode: devnode.to_string(),
                    source: Box::new(err),
                });
            }
        };
        self.driver.read_calibration(&mut inner);

        let id = DeviceId::new();
        self.seats.acquire(seat);
        self.seats.link_device(seat, id);
        self.devices.insert(
            id,
            LiveDevice {
                devnode: devnode.to_string(),
                sysname: sysname.to_string(),
                seat,
                inner,
            },
        );
        tracing::debug!(device = %id.short(), seat = %name, "{sysname} - enabled '{devnode}'");
        self.notify(DeviceEvent::added(id, devnode, name));
        Ok(id)
    }

    /// Tear one device down through the driver.
    ///
    /// Only a device that is still a member of its seat is touched; the
    /// caller must hold a reference on that seat.
    fn disable_device(&mut self, id: DeviceId) {
        let Some(seat) = self.devices.get(id).map(|live| live.seat) else {
            return;
        };
        let Some(name) = self.seats.get(seat).map(|s| s.name.clone()) else {
            return;
        };
        if !self.seats.unlink_device(seat, id) {
            return;
        }
        let Some(live) = self.devices.release(id) else {
            return;
        };

        self.driver.remove(live.inner);
        for record in &mut self.paths {
            if record.device == Some(id) {
                record.device = None;
            }
        }
        // The device's own hold on its seat.
        self.seats.release(seat);

        tracing::debug!(device = %id.short(), seat = %name, "{} - disabled '{}'", live.sysname, live.devnode);
        self.notify(DeviceEvent::removed(id, &live.devnode, &name));
    }

    /// Run `f` while holding a temporary reference on `seat`, released last.
    ///
    /// Returns `None` without calling `f` if the seat is already gone. The
    /// seat may be destroyed by the final release; `f` must not stash its id.
    fn with_seat_held<R>(&mut self, seat: SeatId, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.seats.acquire(seat) {
            return None;
        }
        let result = f(self);
        self.seats.release(seat);
        Some(result)
    }

    fn notify(&self, event: DeviceEvent) {
        if let Err(err) = self.publisher.publish(event) {
            tracing::warn!(error = %err, "failed to publish device event");
        }
    }
}

impl<D: DeviceDriver, P: EventPublisher, U> InputBackend for PathBackend<D, P, U> {
    fn kind(&self) -> BackendKind {
        BackendKind::Path
    }

    #[tracing::instrument(skip(self), fields(paths = self.paths.len()))]
    fn resume(&mut self) -> Result<(), InputSeatError> {
        for index in 0..self.paths.len() {
            let live = self.paths[index]
                .device
                .is_some_and(|id| self.devices.contains(id));
            if live {
                continue;
            }
            if let Err(err) = self.enable_record(index, None) {
                let devnode = self.paths[index].devnode.clone();
                self.suspend();
                return Err(InputSeatError::ResumeAborted {
                    devnode,
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(seats = self.seats.len()))]
    fn suspend(&mut self) {
        for seat in self.seats.ids() {
            self.with_seat_held(seat, |backend| {
                let members = backend
                    .seats
                    .get(seat)
                    .map(|s| s.devices().to_vec())
                    .unwrap_or_default();
                for device in members {
                    backend.disable_device(device);
                }
            });
        }
    }

    fn destroy(&mut self) {
        tracing::debug!(paths = self.paths.len(), "releasing path records");
        self.paths.clear();
    }

    #[tracing::instrument(skip(self, device), fields(device_id = %device.id().short()))]
    fn change_seat(
        &mut self,
        device: DeviceHandle,
        seat_name: &str,
    ) -> Result<DeviceHandle, InputSeatError> {
        let devnode = device.devnode().to_string();
        self.remove_device(device)?;
        self.create_device(&devnode, Some(seat_name))
    }
}
