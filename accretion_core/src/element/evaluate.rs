// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **TRANSFORM** — Drain dirty indices, recompute each element's
//!    `world_transform` as `parent_world * local_transform` and
//!    `effective_hidden` as `parent_effective_hidden || flags.hidden`.
//! 2. **OPACITY** — Drain dirty indices, recompute each element's
//!    `effective_opacity` as `parent_effective * local_opacity`.
//! 3. **CLIP** / **VISUALS** / **VISUALS_HIERARCHY** — Drain dirty indices
//!    (no recomputation; the render chain reads current values directly from
//!    the store).
//! 4. **TOPOLOGY** — Drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`ElementId`]
//! handles so that the render chain can index directly into the store's SoA
//! arrays via the `*_at()` accessors (e.g.
//! [`world_transform_at`](super::ElementStore::world_transform_at)) without
//! paying for generation checks on every access.
//!
//! [`ElementId`]: super::ElementId

use alloc::vec::Vec;

use kurbo::Affine;

use crate::dirty;

use super::id::INVALID;
use super::store::ElementStore;

/// The set of changes produced by a single [`ElementStore::evaluate`] call.
///
/// Each field contains the raw slot indices of elements that changed in the
/// corresponding category. The render chain uses these to apply incremental
/// updates.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Elements whose world transform was recomputed.
    pub transforms: Vec<u32>,
    /// Elements whose effective opacity was recomputed.
    pub opacities: Vec<u32>,
    /// Elements whose clip shape changed.
    pub clips: Vec<u32>,
    /// Elements whose own visuals must be regenerated.
    pub visuals: Vec<u32>,
    /// Elements whose whole subtree's visuals must be regenerated.
    pub visuals_hierarchy: Vec<u32>,
    /// Elements that transitioned from visible to effectively hidden.
    pub hidden: Vec<u32>,
    /// Elements that transitioned from effectively hidden to visible.
    pub unhidden: Vec<u32>,
    /// Elements added since the last evaluate.
    pub added: Vec<u32>,
    /// Elements removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.opacities.clear();
        self.clips.clear();
        self.visuals.clear();
        self.visuals_hierarchy.clear();
        self.hidden.clear();
        self.unhidden.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether no change of any kind was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.opacities.is_empty()
            && self.clips.is_empty()
            && self.visuals.is_empty()
            && self.visuals_hierarchy.is_empty()
            && self.hidden.is_empty()
            && self.unhidden.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl ElementStore {
    /// Evaluates the element tree, recomputing dirty properties and returning
    /// the set of changes.
    ///
    /// This rebuilds the traversal order if topology changed, then drains
    /// each dirty channel and recomputes world transforms and effective
    /// opacities in parent-before-child order.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        // Rebuild traversal order if needed.
        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        // Drain TRANSFORM channel — collect dirty indices, then recompute.
        let dirty_transforms: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_transforms {
            let parent_idx = self.parent[idx as usize];
            let parent_world = if parent_idx != INVALID {
                self.world_transform[parent_idx as usize]
            } else {
                Affine::IDENTITY
            };
            self.world_transform[idx as usize] = parent_world * self.local_transform[idx as usize];

            // Compute effective hidden: parent_effective_hidden || self.flags.hidden
            let parent_hidden = if parent_idx != INVALID {
                self.effective_hidden[parent_idx as usize]
            } else {
                false
            };
            let new_hidden = parent_hidden || self.flags[idx as usize].hidden;
            let old_hidden = self.effective_hidden[idx as usize];
            if new_hidden != old_hidden {
                if new_hidden {
                    changes.hidden.push(idx);
                } else {
                    changes.unhidden.push(idx);
                }
                self.effective_hidden[idx as usize] = new_hidden;
            }
        }
        changes.transforms = dirty_transforms;

        // Drain OPACITY channel.
        let dirty_opacities: Vec<u32> = self
            .dirty
            .drain(dirty::OPACITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_opacities {
            let parent_opacity = if self.parent[idx as usize] != INVALID {
                self.effective_opacity[self.parent[idx as usize] as usize]
            } else {
                1.0
            };
            self.effective_opacity[idx as usize] =
                parent_opacity * self.local_opacity[idx as usize];
        }
        changes.opacities = dirty_opacities;

        // Drain CLIP channel — no recomputation, just collect.
        changes.clips = self
            .dirty
            .drain(dirty::CLIP)
            .deterministic()
            .run()
            .collect();

        // Drain VISUALS channel.
        changes.visuals = self
            .dirty
            .drain(dirty::VISUALS)
            .deterministic()
            .run()
            .collect();

        // Drain VISUALS_HIERARCHY channel.
        changes.visuals_hierarchy = self
            .dirty
            .drain(dirty::VISUALS_HIERARCHY)
            .deterministic()
            .run()
            .collect();

        // Drain TOPOLOGY channel (just consume, changes are structural).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once (or if the traversal has been manually rebuilt).
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    /// Rebuilds the depth-first pre-order traversal of all live elements.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        // Start from roots.
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}
