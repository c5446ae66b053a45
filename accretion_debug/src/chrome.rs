// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] takes events recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer, suitable for
//! loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{Recorded, RecordedEvent};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// Phase begin/end pairs become duration events on one track; pass
/// boundaries and per-element records become instant events; pass summaries
/// become counter samples.
pub fn export(records: &[Recorded], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in records {
        let ts = recorded.ts_us;
        match recorded.event {
            RecordedEvent::PassBegin(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "PassBegin",
                    "cat": "RenderChain",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "pass_index": e.pass_index,
                        "dirty_token": e.dirty_token,
                        "queued": e.queued,
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Pass",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass_index": e.pass_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Pass",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass_index": e.pass_index,
                    }
                }));
            }
            RecordedEvent::ElementProcessed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Element",
                    "cat": "Walk",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "element": e.element,
                        "hierarchical": e.hierarchical,
                        "fast_path": e.fast_path,
                        "entries": e.entries,
                    }
                }));
            }
            RecordedEvent::CommandsReplaced(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "CommandsReplaced",
                    "cat": "Convert",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "element": e.element,
                        "head": e.head_commands,
                        "tail": e.tail_commands,
                    }
                }));
            }
            RecordedEvent::PassSummary(s) => {
                events.push(json!({
                    "ph": "C",
                    "name": "pass",
                    "cat": "RenderChain",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "processed": s.processed,
                        "deferred": s.deferred,
                        "fast_path": s.fast_path,
                        "entries": s.entries,
                        "commands": s.commands,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &events).map_err(io::Error::other)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use accretion_core::trace::{
        PassBeginEvent, PassSummary, PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink,
    };

    use crate::recorder::RecorderSink;

    use super::*;

    #[test]
    fn exports_valid_json_with_paired_phases() {
        let mut sink = RecorderSink::new();
        sink.on_pass_begin(&PassBeginEvent {
            pass_index: 0,
            dirty_token: 1,
            queued: 1,
        });
        sink.on_phase_begin(&PhaseBeginEvent {
            pass_index: 0,
            phase: PhaseKind::Walk,
        });
        sink.on_phase_end(&PhaseEndEvent {
            pass_index: 0,
            phase: PhaseKind::Walk,
        });
        sink.on_pass_summary(&PassSummary::default());

        let mut out = Vec::new();
        export(sink.records(), &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let events = parsed.as_array().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["ph"], "i");
        assert_eq!(events[1]["ph"], "B");
        assert_eq!(events[1]["name"], "Walk");
        assert_eq!(events[2]["ph"], "E");
        assert_eq!(events[3]["ph"], "C");
    }
}
