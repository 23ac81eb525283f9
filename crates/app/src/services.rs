//! Application services: backend implementations.
//!
//! Each backend accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete drivers.

pub mod path_backend;

pub use path_backend::{PathBackend, PathBackendBuilder, create_context};
