// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual-element tree data model.
//!
//! An *element* is a node in a retained visual tree. Each element has:
//!
//! - An identity ([`ElementId`]) — a generational handle that becomes stale
//!   when the element is destroyed, preventing use-after-free bugs at the API
//!   level.
//! - Topology — parent, first-child, and sibling links forming an ordered
//!   tree.
//! - **Local properties** set by the caller:
//!   [`transform`](ElementStore::set_transform),
//!   [`layout`](ElementStore::set_layout),
//!   [`opacity`](ElementStore::set_opacity), [`clip`](ElementStore::set_clip),
//!   [`style`](ElementStore::set_style), [`text`](ElementStore::set_text),
//!   [`render hints`](ElementStore::set_render_hints), and
//!   [`flags`](ElementStore::set_flags).
//! - **Computed properties** produced by [`evaluate`](ElementStore::evaluate):
//!   `world_transform` (product of ancestor local transforms),
//!   `effective_opacity` (product of ancestor local opacities), and
//!   `effective_hidden` (or of ancestor hidden flags).
//!
//! Elements are stored in struct-of-arrays layout with index-based handles
//! for cache-friendly traversal.
//!
//! # Dirty tracking
//!
//! Property mutations automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)). The channels map to property categories:
//!
//! - **TRANSFORM** / **OPACITY** — propagate to all descendants, since
//!   world transforms and effective opacities are inherited.
//! - **CLIP** / **VISUALS** / **VISUALS_HIERARCHY** — local marks consumed by
//!   the render chain.
//! - **TOPOLOGY** — structural changes (add/remove child, create/destroy
//!   element) that trigger a traversal-order rebuild.

mod clip;
mod evaluate;
mod id;
mod store;
mod traverse;

pub use clip::ClipShape;
pub use evaluate::FrameChanges;
pub use id::{ElementId, INVALID};
pub use store::{ElementFlags, ElementStore};
pub use traverse::Children;
