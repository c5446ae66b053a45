// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timestamped in-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and stores every event as a
//! [`Recorded`] value stamped with microseconds since the recorder was
//! created. Recordings can be inspected directly (tests, assertions) or
//! exported with [`chrome::export`](crate::chrome::export).

use std::time::Instant;

use accretion_core::trace::{
    CommandsReplacedEvent, ElementProcessedEvent, PassBeginEvent, PassSummary, PhaseBeginEvent,
    PhaseEndEvent, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A render pass began.
    PassBegin(PassBeginEvent),
    /// A pass phase began.
    PhaseBegin(PhaseBeginEvent),
    /// A pass phase ended.
    PhaseEnd(PhaseEndEvent),
    /// The walk reached an element.
    ElementProcessed(ElementProcessedEvent),
    /// An element's command ranges were replaced.
    CommandsReplaced(CommandsReplacedEvent),
    /// A pass completed.
    PassSummary(PassSummary),
}

/// A recorded event plus its wall-clock stamp.
#[derive(Clone, Copy, Debug)]
pub struct Recorded {
    /// Microseconds since the recorder was created.
    pub ts_us: u64,
    /// The event.
    pub event: RecordedEvent,
}

/// A [`TraceSink`] that records timestamped events in memory.
#[derive(Debug)]
pub struct RecorderSink {
    epoch: Instant,
    records: Vec<Recorded>,
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderSink {
    /// Creates an empty recorder; timestamps count from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            records: Vec::new(),
        }
    }

    /// The recorded events, in arrival order.
    #[must_use]
    pub fn records(&self) -> &[Recorded] {
        &self.records
    }

    /// Consumes the recorder and returns its events.
    #[must_use]
    pub fn into_records(self) -> Vec<Recorded> {
        self.records
    }

    /// Drops all recorded events, keeping the epoch.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn push(&mut self, event: RecordedEvent) {
        let ts_us = self.epoch.elapsed().as_micros() as u64;
        self.records.push(Recorded { ts_us, event });
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.push(RecordedEvent::PassBegin(*e));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.push(RecordedEvent::PhaseBegin(*e));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.push(RecordedEvent::PhaseEnd(*e));
    }

    fn on_element_processed(&mut self, e: &ElementProcessedEvent) {
        self.push(RecordedEvent::ElementProcessed(*e));
    }

    fn on_commands_replaced(&mut self, e: &CommandsReplacedEvent) {
        self.push(RecordedEvent::CommandsReplaced(*e));
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        self.push(RecordedEvent::PassSummary(*s));
    }
}
