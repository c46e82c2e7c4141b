//! Wellmeter library.
//!
//! Exposes the pulse filter, event channel, rate tracker and adapters for
//! the binary and for host integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod events;
pub mod pins;
pub mod sensors;
