//! # inputseat-app
//!
//! Application layer: seat bookkeeping, the path backend, and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DeviceDriver`: turn a device node into a live device, tear it down
//!   - `EventPublisher`: receive device added / removed notifications
//! - Define the **backend contract** (`InputBackend`) consumed by the wider
//!   system: resume, suspend, destroy, change seat
//! - Provide the reference-counted arena and the seat registry built on it
//! - Provide the **path backend** (`PathBackend`): devices added by path
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `inputseat-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod backend;
pub mod event_bus;
pub mod ports;
pub mod refcount;
pub mod seat_registry;
pub mod services;
