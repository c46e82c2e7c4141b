//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter       | Implements  | Connects to                   |
//! |---------------|-------------|-------------------------------|
//! | `console`     | TraceSink   | stdout                        |
//! | `gpio`        | InputPin    | Linux GPIO character device   |
//! | `time`        | Clock       | `Instant` + chrono wall clock |
//! | `log_sink`    | StatusSink, | `log` facade                  |
//! |               | TraceSink   |                               |
//! | `status_file` | StatusSink  | JSON status file + stdout     |

pub mod console;
pub mod gpio;
pub mod log_sink;
pub mod status_file;
pub mod time;
