//! JSON status file + console sink.
//!
//! Each publish prints one JSON line to the console and replaces the
//! status file (served by the local web server) with the same line.  The
//! file is written to a sibling temp path and renamed into place, so a
//! reader never sees a half-written record.  When the directory is not
//! writable (only the file itself was granted to the service) the sink
//! falls back to truncating and rewriting the file in place.  Snapshots
//! that repeat the previous total are skipped.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::info;

use super::console::FailureLatch;
use crate::app::events::{StatusRecord, StatusSnapshot};
use crate::app::ports::StatusSink;

pub struct JsonFileStatusSink<W: Write> {
    path: PathBuf,
    tmp_path: PathBuf,
    console: W,
    last_total: Option<u64>,
    in_place: bool,
    console_failures: FailureLatch,
    file_failures: FailureLatch,
}

impl JsonFileStatusSink<io::Stdout> {
    /// Sink writing to `path` and to stdout.
    pub fn stdout(path: impl Into<PathBuf>) -> Self {
        Self::new(path, io::stdout())
    }
}

impl<W: Write> JsonFileStatusSink<W> {
    pub fn new(path: impl Into<PathBuf>, console: W) -> Self {
        let path = path.into();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let file_failures = FailureLatch::new(format!("status: write to {}", path.display()));
        Self {
            path,
            tmp_path: PathBuf::from(tmp),
            console,
            last_total: None,
            in_place: false,
            console_failures: FailureLatch::new("status: console write"),
            file_failures,
        }
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    /// Whether the sink has switched to in-place rewrites.
    pub fn is_in_place(&self) -> bool {
        self.in_place
    }

    fn write_file(&mut self, line: &str) -> io::Result<()> {
        if self.in_place {
            return fs::write(&self.path, line);
        }

        match fs::write(&self.tmp_path, line).and_then(|()| fs::rename(&self.tmp_path, &self.path)) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&self.tmp_path);
                fs::write(&self.path, line)?;
                info!(
                    "status: cannot replace {} ({}), rewriting it in place",
                    self.path.display(),
                    e
                );
                self.in_place = true;
                Ok(())
            }
        }
    }
}

impl<W: Write> StatusSink for JsonFileStatusSink<W> {
    fn publish(&mut self, snapshot: &StatusSnapshot, now_secs: i64) {
        if self.last_total == Some(snapshot.total_events) {
            return;
        }
        self.last_total = Some(snapshot.total_events);

        let mut line = StatusRecord::from_snapshot(snapshot, now_secs).to_json();
        line.push('\n');

        let console = self
            .console
            .write_all(line.as_bytes())
            .and_then(|()| self.console.flush());
        self.console_failures.note(console);

        let file = self.write_file(&line);
        self.file_failures.note(file);
    }
}
