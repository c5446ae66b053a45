// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Accretion uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! efficiently propagate invalidation through the element tree. Each channel
//! represents an independent category of change.
//!
//! # Propagation semantics
//!
//! Channels differ in whether dirtiness propagates to descendants:
//!
//! - **Propagating** — [`TRANSFORM`] and [`OPACITY`] use
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency
//!   edges from child to parent. Marking a parent dirty automatically marks
//!   all descendants, because world transforms, effective opacities, and
//!   effective hidden state are inherited properties. (Hidden-flag changes
//!   are routed through [`TRANSFORM`] so that the same drain pass
//!   recomputes both world transforms and `effective_hidden`.)
//!
//! - **Local-only** — [`CLIP`], [`VISUALS`], and [`VISUALS_HIERARCHY`] are
//!   marked with the default policy. Only the explicitly marked element
//!   appears in the drain output. A `VISUALS_HIERARCHY` mark means the
//!   render chain must regenerate the element *and* its whole subtree; the
//!   chain performs that recursion itself during its depth-first walk, so
//!   the channel does not propagate here.
//!
//! - **Structural** — [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove child, create/destroy element). It triggers a
//!   traversal-order rebuild during evaluation but does not propagate to
//!   descendants.
//!
//! # Consumption
//!
//! Callers never need to query dirty state directly. Each
//! [`ElementStore::evaluate`](crate::element::ElementStore::evaluate) call
//! drains all channels and surfaces the results as
//! [`FrameChanges`](crate::element::FrameChanges), which the render chain
//! consumes to decide which elements need repainting.

use understory_dirty::Channel;

/// Transform or hidden flag changed — requires world transform and effective
/// hidden recomputation for descendants.
pub const TRANSFORM: Channel = Channel::new(0);

/// Opacity changed — requires effective opacity recomputation for descendants.
pub const OPACITY: Channel = Channel::new(1);

/// Clip shape changed — no propagation needed.
pub const CLIP: Channel = Channel::new(2);

/// The element's own visuals changed — it must regenerate its draw entries.
pub const VISUALS: Channel = Channel::new(3);

/// The element's visuals changed in a way that invalidates its whole subtree
/// (reattachment, render-hint change, inherited paint state).
pub const VISUALS_HIERARCHY: Channel = Channel::new(4);

/// Tree topology changed — triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(5);
