// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual-element tree and change tracking for retained-mode UI rendering.
//!
//! `accretion_core` provides the data model that the render chain
//! (`accretion_render`) compiles into draw commands: a tree of visual
//! elements with layout, style, clipping, and opacity, stored in
//! struct-of-arrays layout with generational index handles. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! The crate is organized around a per-frame update cycle that turns property
//! mutations into incremental change lists:
//!
//! ```text
//!   caller mutations (set_style, set_opacity, add_child, ...)
//!       │  mark dirty channels
//!       ▼
//!   ElementStore::evaluate() ──► FrameChanges ──► RenderChain::process()
//! ```
//!
//! **[`element`]** — Struct-of-arrays element tree with generational handles.
//! Local properties (transform, layout, opacity, clip, style, text, render
//! hints, flags) are set by the caller; world transforms, effective opacities,
//! and effective hidden state are computed by evaluation.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! Property mutations automatically mark the appropriate channel. TRANSFORM
//! and OPACITY propagate to descendants; CLIP, VISUALS, and
//! VISUALS_HIERARCHY are local-only marks; TOPOLOGY triggers a traversal
//! rebuild.
//!
//! **[`style`]** — Colors, paint properties, and render hints consumed by the
//! render chain's element builders.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! render-pass instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   processing and command-replacement events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod element;
pub mod style;
pub mod trace;
