// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element render-chain state.
//!
//! The element store knows nothing about rendering; everything the chain
//! tracks per element lives here, in parallel arrays indexed by the
//! element's raw slot. Slots are initialized on attach and cleared on
//! detach, so a recycled element slot always starts clean.

use alloc::vec::Vec;

use crate::command::CommandId;
use crate::device::MeshHandle;
use crate::shader_info::{OpacityId, TransformId};

/// Bit set of per-element dirtied values, accumulated between passes and
/// consumed by the dirty walk.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirtyValues(u8);

impl DirtyValues {
    /// Nothing dirtied.
    pub const NONE: Self = Self(0);
    /// The element's own visuals must be regenerated.
    pub const VISUALS: Self = Self(1 << 0);
    /// The element and its whole subtree must be regenerated.
    pub const VISUALS_HIERARCHY: Self = Self(1 << 1);
    /// Only the opacity allocation changed — fast-path eligible.
    pub const OPACITY_ID: Self = Self(1 << 2);

    /// Adds `other`'s bits.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Returns whether all bits of `other` are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether exactly the bits of `other` are set, and nothing else.
    #[must_use]
    pub const fn is_only(self, other: Self) -> bool {
        self.0 == other.0 && self.0 != 0
    }

    /// Returns whether no bits are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::fmt::Debug for DirtyValues {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DirtyValues")
            .field("visuals", &self.contains(Self::VISUALS))
            .field("visuals_hierarchy", &self.contains(Self::VISUALS_HIERARCHY))
            .field("opacity_id", &self.contains(Self::OPACITY_ID))
            .finish()
    }
}

/// How an element's clip shape is realized by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipMethod {
    /// Not yet determined — processing an element in this state is a
    /// programming error.
    #[default]
    Undetermined,
    /// No clipping.
    NotClipped,
    /// Axis-aligned scissor of the clip shape's bounds.
    Scissor,
}

/// Parallel per-element state owned by the render chain.
#[derive(Debug, Default)]
pub struct RenderDataStore {
    pub(crate) attached: Vec<bool>,
    pub(crate) dirty_id: Vec<u32>,
    pub(crate) dirtied: Vec<DirtyValues>,
    pub(crate) pending_repaint: Vec<bool>,
    pub(crate) pending_hierarchical_repaint: Vec<bool>,
    pub(crate) winding_flipped: Vec<bool>,
    pub(crate) clip_method: Vec<ClipMethod>,
    pub(crate) transform_id: Vec<TransformId>,
    pub(crate) opacity_id: Vec<OpacityId>,
    pub(crate) head_mesh: Vec<Option<MeshHandle>>,
    pub(crate) tail_mesh: Vec<Option<MeshHandle>>,
    pub(crate) extra_meshes: Vec<Vec<MeshHandle>>,
    pub(crate) head_first: Vec<CommandId>,
    pub(crate) head_last: Vec<CommandId>,
    pub(crate) tail_first: Vec<CommandId>,
    pub(crate) tail_last: Vec<CommandId>,
}

impl RenderDataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows all arrays to cover `count` element slots.
    pub fn ensure_slots(&mut self, count: u32) {
        let count = count as usize;
        if self.attached.len() >= count {
            return;
        }
        self.attached.resize(count, false);
        self.dirty_id.resize(count, 0);
        self.dirtied.resize(count, DirtyValues::NONE);
        self.pending_repaint.resize(count, false);
        self.pending_hierarchical_repaint.resize(count, false);
        self.winding_flipped.resize(count, false);
        self.clip_method.resize(count, ClipMethod::Undetermined);
        self.transform_id.resize(count, TransformId::INVALID);
        self.opacity_id.resize(count, OpacityId::INVALID);
        self.head_mesh.resize(count, None);
        self.tail_mesh.resize(count, None);
        self.extra_meshes.resize_with(count, Vec::new);
        self.head_first.resize(count, CommandId::INVALID);
        self.head_last.resize(count, CommandId::INVALID);
        self.tail_first.resize(count, CommandId::INVALID);
        self.tail_last.resize(count, CommandId::INVALID);
    }

    /// Resets one slot to its detached state.
    ///
    /// The caller is responsible for releasing meshes, commands, and shader
    /// rows referenced by the slot first.
    pub(crate) fn reset_slot(&mut self, idx: u32) {
        let i = idx as usize;
        self.attached[i] = false;
        self.dirty_id[i] = 0;
        self.dirtied[i] = DirtyValues::NONE;
        self.pending_repaint[i] = false;
        self.pending_hierarchical_repaint[i] = false;
        self.winding_flipped[i] = false;
        self.clip_method[i] = ClipMethod::Undetermined;
        self.transform_id[i] = TransformId::INVALID;
        self.opacity_id[i] = OpacityId::INVALID;
        self.head_mesh[i] = None;
        self.tail_mesh[i] = None;
        self.extra_meshes[i].clear();
        self.head_first[i] = CommandId::INVALID;
        self.head_last[i] = CommandId::INVALID;
        self.tail_first[i] = CommandId::INVALID;
        self.tail_last[i] = CommandId::INVALID;
    }

    /// Number of tracked slots.
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.attached.len() as u32
    }

    /// Whether the element at `idx` is attached to the chain.
    #[must_use]
    pub fn is_attached(&self, idx: u32) -> bool {
        self.attached.get(idx as usize).copied().unwrap_or(false)
    }

    /// The element's deferred non-hierarchical repaint flag.
    #[must_use]
    pub fn pending_repaint(&self, idx: u32) -> bool {
        self.pending_repaint[idx as usize]
    }

    /// The element's deferred hierarchical repaint flag.
    #[must_use]
    pub fn pending_hierarchical_repaint(&self, idx: u32) -> bool {
        self.pending_hierarchical_repaint[idx as usize]
    }

    /// The element's winding-flip state, as of its last processing.
    #[must_use]
    pub fn winding_flipped(&self, idx: u32) -> bool {
        self.winding_flipped[idx as usize]
    }

    /// The element's clip method.
    #[must_use]
    pub fn clip_method(&self, idx: u32) -> ClipMethod {
        self.clip_method[idx as usize]
    }

    /// The element's transform table row.
    #[must_use]
    pub fn transform_id(&self, idx: u32) -> TransformId {
        self.transform_id[idx as usize]
    }

    /// The element's opacity allocation id.
    #[must_use]
    pub fn opacity_id(&self, idx: u32) -> OpacityId {
        self.opacity_id[idx as usize]
    }

    /// The element's head mesh (geometry drawn before its children).
    #[must_use]
    pub fn head_mesh(&self, idx: u32) -> Option<MeshHandle> {
        self.head_mesh[idx as usize]
    }

    /// The element's tail mesh (geometry drawn after its children).
    #[must_use]
    pub fn tail_mesh(&self, idx: u32) -> Option<MeshHandle> {
        self.tail_mesh[idx as usize]
    }

    /// Any additional meshes beyond head and tail.
    #[must_use]
    pub fn extra_meshes(&self, idx: u32) -> &[MeshHandle] {
        &self.extra_meshes[idx as usize]
    }

    /// The element's installed head command range.
    #[must_use]
    pub fn head_range(&self, idx: u32) -> (CommandId, CommandId) {
        (self.head_first[idx as usize], self.head_last[idx as usize])
    }

    /// The element's installed tail command range.
    #[must_use]
    pub fn tail_range(&self, idx: u32) -> (CommandId, CommandId) {
        (self.tail_first[idx as usize], self.tail_last[idx as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_values_bit_ops() {
        let mut v = DirtyValues::NONE;
        assert!(v.is_empty());

        v.insert(DirtyValues::OPACITY_ID);
        assert!(v.is_only(DirtyValues::OPACITY_ID));

        v.insert(DirtyValues::VISUALS);
        assert!(v.contains(DirtyValues::VISUALS));
        assert!(v.contains(DirtyValues::OPACITY_ID));
        assert!(!v.is_only(DirtyValues::OPACITY_ID));
    }

    #[test]
    fn ensure_slots_grows_and_defaults() {
        let mut data = RenderDataStore::new();
        data.ensure_slots(3);
        assert_eq!(data.slot_count(), 3);
        assert!(!data.is_attached(2));
        assert_eq!(data.clip_method(2), ClipMethod::Undetermined);
        assert!(!data.transform_id(2).is_valid());

        // Growing never shrinks.
        data.ensure_slots(1);
        assert_eq!(data.slot_count(), 3);
    }

    #[test]
    fn reset_slot_clears_state() {
        let mut data = RenderDataStore::new();
        data.ensure_slots(1);
        data.attached[0] = true;
        data.dirty_id[0] = 7;
        data.dirtied[0] = DirtyValues::VISUALS;
        data.pending_repaint[0] = true;

        data.reset_slot(0);
        assert!(!data.is_attached(0));
        assert_eq!(data.dirty_id[0], 0);
        assert!(data.dirtied[0].is_empty());
        assert!(!data.pending_repaint(0));
    }
}
