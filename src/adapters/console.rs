//! Console trace sink.
//!
//! Prints debug trace runs as `[millis,level]` lines.  Write failures are
//! logged once per distinct error kind through [`FailureLatch`], which the
//! status file sink shares.

use std::io::{self, Write};

use log::warn;

use crate::app::ports::TraceSink;
use crate::diagnostics::{TraceRecord, format_trace};

/// Logs an I/O failure once per distinct error kind; a success re-arms it.
#[derive(Debug)]
pub(crate) struct FailureLatch {
    what: String,
    last: Option<io::ErrorKind>,
}

impl FailureLatch {
    pub(crate) fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            last: None,
        }
    }

    pub(crate) fn note(&mut self, result: io::Result<()>) {
        match result {
            Ok(()) => self.last = None,
            Err(e) if self.last != Some(e.kind()) => {
                warn!("{} failed: {}", self.what, e);
                self.last = Some(e.kind());
            }
            Err(_) => {}
        }
    }
}

pub struct ConsoleTraceSink<W: Write> {
    out: W,
    failures: FailureLatch,
}

impl ConsoleTraceSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleTraceSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            failures: FailureLatch::new("trace: console write"),
        }
    }

    pub fn out(&self) -> &W {
        &self.out
    }
}

impl<W: Write> TraceSink for ConsoleTraceSink<W> {
    fn trace(&mut self, records: &[TraceRecord]) {
        let result = writeln!(self.out, "{}", format_trace(records)).and_then(|()| self.out.flush());
        self.failures.note(result);
    }
}
