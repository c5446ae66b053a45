// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-walk entry generation and draw-command compilation for accretion.
//!
//! `accretion_render` turns an evaluated element tree
//! (`accretion_core`) into a GPU-consumable command list, incrementally:
//! only elements whose visuals changed are regenerated, and opacity-only
//! changes bypass regeneration entirely.
//!
//! # Architecture
//!
//! ```text
//!   ElementStore::evaluate() ──► FrameChanges
//!                                     │
//!                                     ▼
//!   RenderChain::process() ── Sync ── Walk ── Jobs ── Convert
//!        │                             │        │        │
//!        │                     entries per    mesh    head/tail
//!        │                     dirty element  jobs    command ranges
//!        ▼                                             spliced in place
//!   PassReport (counters + damage)
//! ```
//!
//! **[`chain`]** — [`RenderChain`](chain::RenderChain): owns every
//! per-element rendering resource and drives the four pass phases.
//!
//! **[`processor`]** — The visual-changes processor: idempotent depth-first
//! dirty walk, head/tail worklist, per-depth entry-processor pool, and
//! command replacement.
//!
//! **[`builder`]** — Pluggable element builders selected by render hints
//! (default box, text via jobs, dynamic palette colors).
//!
//! **[`entry`]** / **[`context`]** — Intermediate drawing instructions and
//! the per-element emission surface handed to builders.
//!
//! **[`command`]** — The global doubly-linked paint-order command list with
//! range splicing.
//!
//! **[`mesh`]** / **[`device`]** — Vertex data, staging, and the
//! [`MeshDevice`](device::MeshDevice) abstraction with a CPU reference
//! implementation.
//!
//! **[`shader_info`]** — Per-element transform and opacity table rows;
//! opacity allocation ids are what the fast path encodes into vertices.
//!
//! **[`job`]** — Deferred mesh-generation and color-rewrite jobs with an
//! explicit join before conversion.
//!
//! **opacity** (internal) — The opacity fast path, reached through
//! processing.
//!
//! **[`damage`]** — Damage regions reported per pass.
//!
//! **[`executor`]** — The [`CommandExecutor`](executor::CommandExecutor)
//! contract renderers implement to consume the command list.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `parallel` (disabled by default, implies `std`): Runs job compute
//!   phases on rayon worker threads.
//! - `trace` / `trace-rich`: Forwarded to `accretion_core`'s tracing.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod builder;
pub mod chain;
pub mod command;
pub mod context;
pub mod damage;
pub mod device;
pub mod entry;
pub mod executor;
pub mod job;
pub mod mesh;
mod opacity;
pub mod processor;
pub mod render_data;
pub mod shader_info;
