// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use accretion_core::trace::{
    CommandsReplacedEvent, ElementProcessedEvent, PassBeginEvent, PassSummary, PhaseBeginEvent,
    PhaseEndEvent, PhaseKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Sync => "sync",
        PhaseKind::Walk => "walk",
        PhaseKind::Jobs => "jobs",
        PhaseKind::Convert => "convert",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass] index={} token={} queued={}",
            e.pass_index, e.dirty_token, e.queued
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase+] pass={} {}",
            e.pass_index,
            phase_name(e.phase)
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase-] pass={} {}",
            e.pass_index,
            phase_name(e.phase)
        );
    }

    fn on_element_processed(&mut self, e: &ElementProcessedEvent) {
        let _ = writeln!(
            self.writer,
            "[element] idx={} hierarchical={} fast_path={} entries={}",
            e.element, e.hierarchical, e.fast_path, e.entries
        );
    }

    fn on_commands_replaced(&mut self, e: &CommandsReplacedEvent) {
        let _ = writeln!(
            self.writer,
            "[commands] idx={} head={} tail={}",
            e.element, e.head_commands, e.tail_commands
        );
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] pass={} processed={} deferred={} fast_path={} entries={} commands={}",
            s.pass_index, s.processed, s.deferred, s.fast_path, s.entries, s.commands
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_pass_begin(&PassBeginEvent {
            pass_index: 3,
            dirty_token: 9,
            queued: 2,
        });
        sink.on_phase_begin(&PhaseBeginEvent {
            pass_index: 3,
            phase: PhaseKind::Convert,
        });
        sink.on_pass_summary(&PassSummary {
            pass_index: 3,
            processed: 2,
            ..PassSummary::default()
        });

        let out = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("index=3"));
        assert!(lines[0].contains("queued=2"));
        assert!(lines[1].contains("convert"));
        assert!(lines[2].contains("processed=2"));
    }
}
