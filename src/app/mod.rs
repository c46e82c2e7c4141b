//! Application core: counting and rate logic, zero I/O.
//!
//! The reporting side of the meter: the rate tracker, the service loop
//! that feeds it from the event channel, and the status types it
//! publishes.  All interaction with the OS happens through the port
//! traits in [`ports`], keeping this layer testable without hardware.

pub mod events;
pub mod ports;
pub mod service;
pub mod tracker;
