//! Service layer wiring configuration into the core components
//!
//! `SimpleServices` owns the loaded `Config` and hands out the API client,
//! mirror, backup manager and operator-facing helpers each command needs.

pub mod simple_container;

pub use simple_container::SimpleServices;
