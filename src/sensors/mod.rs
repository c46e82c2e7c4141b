//! Pulse sensing: the debounce filter and the sampling loop around it.
//!
//! [`edge_filter`] is pure per-tick logic; [`sampler`] binds it to an
//! `InputPin`, a [`Clock`](crate::app::ports::Clock) and the event channel.

pub mod edge_filter;
pub mod sampler;

pub use edge_filter::{EdgeFilter, FilterState, SampleHistory};
pub use sampler::Sampler;
