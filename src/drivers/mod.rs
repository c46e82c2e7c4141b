//! Sampler thread support: real-time spawning and tick pacing.

pub mod realtime;
pub mod tick_timer;
