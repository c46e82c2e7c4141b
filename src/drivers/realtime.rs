//! Real-time thread spawning for the sampler.
//!
//! Spawns a named thread and, on Linux, asks the scheduler to run it
//! under `SCHED_FIFO` at the requested priority.  Elevation needs root or
//! `CAP_SYS_NICE`; without it the thread still runs under the default
//! policy and a single warning tells the operator how to fix it.

use std::thread::JoinHandle;

/// Default `SCHED_FIFO` priority for the sampler (range 1..=99).
pub const SAMPLER_PRIORITY: i32 = 50;

/// Why a priority request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityError {
    /// `sched_setscheduler` failed with this errno.
    Denied(i32),
    /// Not available on this platform.
    Unsupported,
}

impl core::fmt::Display for PriorityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Denied(errno) => write!(f, "sched_setscheduler denied (errno {errno})"),
            Self::Unsupported => write!(f, "real-time scheduling unsupported on this platform"),
        }
    }
}

/// Put the calling thread under `SCHED_FIFO` at `priority`.
#[cfg(target_os = "linux")]
pub fn elevate_current_thread(priority: i32) -> Result<(), PriorityError> {
    let param = libc::sched_param {
        sched_priority: priority,
    };
    // SAFETY: pid 0 targets the calling thread; `param` is a valid,
    // initialised sched_param that outlives the call.
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &raw const param) };
    if ret == 0 {
        Ok(())
    } else {
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        Err(PriorityError::Denied(errno))
    }
}

#[cfg(not(target_os = "linux"))]
pub fn elevate_current_thread(_priority: i32) -> Result<(), PriorityError> {
    Err(PriorityError::Unsupported)
}

/// Operator hint for a refused priority request.
pub fn elevation_hint(err: PriorityError) -> &'static str {
    match err {
        PriorityError::Denied(libc::EPERM) => {
            "run as root or grant CAP_SYS_NICE (setcap cap_sys_nice+ep <binary>) for steadier sampling"
        }
        PriorityError::Denied(_) => "check RLIMIT_RTPRIO and the real-time group limits",
        PriorityError::Unsupported => "sampling continues under the default scheduler",
    }
}

/// Spawn `f` on a new thread named `name`, elevated to `priority`.
///
/// Elevation failure is logged once and otherwise ignored: timing jitter
/// degrades precision, not correctness.
pub fn spawn_realtime<F>(name: &str, priority: i32, f: F) -> std::io::Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    log::info!("Spawning '{}' (SCHED_FIFO pri={})", name, priority);

    std::thread::Builder::new().name(name.into()).spawn(move || {
        match elevate_current_thread(priority) {
            Ok(()) => log::info!("realtime: priority {} granted", priority),
            Err(e) => log::warn!("realtime: {}; {}", e, elevation_hint(e)),
        }
        f();
    })
}
