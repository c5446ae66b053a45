// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the render pass.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! render-pass instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Events carry no timestamps; the core is `no_std` and has no clock. Sinks
//! that need wall-clock data (e.g. the Chrome trace exporter in
//! `accretion_debug`) stamp events on receipt.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`ElementProcessedEvent`] and
//!   [`CommandsReplacedEvent`] plus the corresponding `TraceSink` methods.

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the render pass is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Consuming evaluated frame changes (attach/detach, queue building).
    Sync,
    /// Depth-first dirty walk and entry generation.
    Walk,
    /// Mesh-generation and color-rewrite job execution.
    Jobs,
    /// Entry-to-command conversion.
    Convert,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a render pass begins, after the repaint queue is built.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// The dirty token stamped on every element processed this pass.
    pub dirty_token: u32,
    /// Number of elements queued for repaint.
    pub queued: u32,
}

/// Marks the beginning of a render-pass phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseBeginEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
}

/// Marks the end of a render-pass phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEndEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
}

/// Emitted for each element the dirty walk reaches (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ElementProcessedEvent {
    /// Raw slot index of the element.
    pub element: u32,
    /// Whether the element was walked hierarchically.
    pub hierarchical: bool,
    /// Whether the opacity fast path was taken instead of regeneration.
    pub fast_path: bool,
    /// Number of entries generated for the element (0 on the fast path).
    pub entries: u32,
}

/// Emitted when an element's command ranges are replaced (requires
/// `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct CommandsReplacedEvent {
    /// Raw slot index of the element.
    pub element: u32,
    /// Number of commands in the new head range.
    pub head_commands: u32,
    /// Number of commands in the new tail range.
    pub tail_commands: u32,
}

/// Per-pass summary produced at the end of a render pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassSummary {
    /// Pass counter.
    pub pass_index: u64,
    /// The dirty token used for this pass.
    pub dirty_token: u32,
    /// Number of elements queued for repaint.
    pub queued: u32,
    /// Number of elements whose visuals were regenerated.
    pub processed: u32,
    /// Number of elements deferred because an ancestor is hidden.
    pub deferred: u32,
    /// Number of elements updated via the opacity fast path.
    pub fast_path: u32,
    /// Total entries generated.
    pub entries: u32,
    /// Total commands installed.
    pub commands: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the render pass.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a render pass begins.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called at the beginning of a render-pass phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a render-pass phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called for each element reached by the dirty walk (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_element_processed(&mut self, e: &ElementProcessedEvent) {
        _ = e;
    }

    /// Called when an element's command ranges are replaced (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_commands_replaced(&mut self, e: &CommandsReplacedEvent) {
        _ = e;
    }

    /// Called with a per-pass summary.
    fn on_pass_summary(&mut self, s: &PassSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ElementProcessedEvent`].
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn element_processed(&mut self, e: &ElementProcessedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_element_processed(e);
        }
    }

    /// Emits a [`CommandsReplacedEvent`].
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn commands_replaced(&mut self, e: &CommandsReplacedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_commands_replaced(e);
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_summary(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        passes: u32,
        phases: u32,
        summaries: u32,
    }

    impl TraceSink for CountingSink {
        fn on_pass_begin(&mut self, _e: &PassBeginEvent) {
            self.passes += 1;
        }

        fn on_phase_begin(&mut self, _e: &PhaseBeginEvent) {
            self.phases += 1;
        }

        fn on_pass_summary(&mut self, _s: &PassSummary) {
            self.summaries += 1;
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = CountingSink::default();
        let mut tracer = Tracer::new(&mut sink);

        tracer.pass_begin(&PassBeginEvent {
            pass_index: 0,
            dirty_token: 1,
            queued: 0,
        });
        tracer.phase_begin(&PhaseBeginEvent {
            pass_index: 0,
            phase: PhaseKind::Walk,
        });
        tracer.pass_summary(&PassSummary::default());

        assert_eq!(sink.passes, 1);
        assert_eq!(sink.phases, 1);
        assert_eq!(sink.summaries, 1);
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        // No sink — must not panic.
        tracer.pass_begin(&PassBeginEvent {
            pass_index: 0,
            dirty_token: 1,
            queued: 0,
        });
        tracer.pass_summary(&PassSummary::default());
    }
}
