// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for accretion
//! diagnostics.
//!
//! This crate provides [`TraceSink`](accretion_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory recording with wall-clock
//!   timestamps, for querying in tests or exporting.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded events.
//!
//! The core's trace events carry no timestamps (it is `no_std`); the
//! recorder stamps each event with microseconds since its creation.

pub mod chrome;
pub mod pretty;
pub mod recorder;
