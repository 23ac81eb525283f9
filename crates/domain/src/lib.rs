//! # inputseat-domain
//!
//! Pure domain model for the inputseat device/seat core.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Seats** (named groups of input devices keyed by physical and logical name)
//! - Define **Devices** as seen from outside a backend (path, short name, seat)
//! - Define **Events** (device added / removed notifications)
//! - Define the **backend tag** used to reject handles from a foreign backend
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod backend;
pub mod device;
pub mod event;
pub mod seat;
