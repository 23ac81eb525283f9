//! Event bus port: publish device added / removed notifications.

use inputseat_domain::error::InputSeatError;
use inputseat_domain::event::DeviceEvent;

/// Publishes device events to interested subscribers.
///
/// Backends call this synchronously from inside their operations, so
/// implementations must not block.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`InputSeatError::Publish`] if the event could not be handed
    /// over. Backends log the failure and carry on.
    fn publish(&self, event: DeviceEvent) -> Result<(), InputSeatError>;
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: DeviceEvent) -> Result<(), InputSeatError> {
        (**self).publish(event)
    }
}

impl<T: EventPublisher + ?Sized> EventPublisher for &T {
    fn publish(&self, event: DeviceEvent) -> Result<(), InputSeatError> {
        (**self).publish(event)
    }
}

/// Publisher that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPublisher;

impl EventPublisher for NullPublisher {
    fn publish(&self, _event: DeviceEvent) -> Result<(), InputSeatError> {
        Ok(())
    }
}
