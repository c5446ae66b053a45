// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and property
//! management.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Rect};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use crate::dirty;
use crate::style::{RenderHints, Style};

use super::clip::ClipShape;
use super::id::{ElementId, INVALID};
use super::traverse::Children;

/// Per-element boolean flags.
///
/// Setting [`hidden`](Self::hidden) suppresses all visual contribution of the
/// element and its entire subtree. Properties can still be mutated while
/// hidden; repaint work for hidden subtrees is deferred by the render chain
/// and resumes when the subtree becomes displayed again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElementFlags {
    /// Whether the element (and its subtree) is hidden.
    pub hidden: bool,
}

/// Struct-of-arrays storage for all elements.
///
/// Elements are addressed by [`ElementId`] handles. Internally, each element
/// occupies a slot in parallel arrays. Destroyed elements are recycled via a
/// free list, and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct ElementStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) local_transform: Vec<Affine>,
    pub(crate) layout: Vec<Rect>,
    pub(crate) local_opacity: Vec<f32>,
    pub(crate) clip: Vec<Option<ClipShape>>,
    pub(crate) style: Vec<Style>,
    pub(crate) text: Vec<Option<String>>,
    pub(crate) hints: Vec<RenderHints>,
    pub(crate) flags: Vec<ElementFlags>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_transform: Vec<Affine>,
    pub(crate) effective_opacity: Vec<f32>,
    pub(crate) effective_hidden: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Creates an empty element store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            local_transform: Vec::new(),
            layout: Vec::new(),
            local_opacity: Vec::new(),
            clip: Vec::new(),
            style: Vec::new(),
            text: Vec::new(),
            hints: Vec::new(),
            flags: Vec::new(),
            world_transform: Vec::new(),
            effective_opacity: Vec::new(),
            effective_hidden: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new element and returns its handle.
    ///
    /// The element starts with an identity transform, a zero layout rect,
    /// full opacity, no clip, default style, no text, and no parent.
    pub fn create_element(&mut self) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.local_transform[idx as usize] = Affine::IDENTITY;
            self.layout[idx as usize] = Rect::ZERO;
            self.local_opacity[idx as usize] = 1.0;
            self.clip[idx as usize] = None;
            self.style[idx as usize] = Style::default();
            self.text[idx as usize] = None;
            self.hints[idx as usize] = RenderHints::NONE;
            self.flags[idx as usize] = ElementFlags::default();
            self.world_transform[idx as usize] = Affine::IDENTITY;
            self.effective_opacity[idx as usize] = 1.0;
            self.effective_hidden[idx as usize] = false;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.local_transform.push(Affine::IDENTITY);
            self.layout.push(Rect::ZERO);
            self.local_opacity.push(1.0);
            self.clip.push(None);
            self.style.push(Style::default());
            self.text.push(None);
            self.hints.push(RenderHints::NONE);
            self.flags.push(ElementFlags::default());
            self.world_transform.push(Affine::IDENTITY);
            self.effective_opacity.push(1.0);
            self.effective_hidden.push(false);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        // A fresh element needs an initial visuals pass.
        self.dirty.mark(idx, dirty::VISUALS);

        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys an element, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the element has children (remove them first) or if the
    /// handle is stale.
    pub fn destroy_element(&mut self, id: ElementId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy element with children"
        );

        // Remove from parent's child list if attached.
        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        // Drop any queued text payload eagerly; the slot may sit in the free
        // list for a long time.
        self.text[idx as usize] = None;

        // Remove dirty tracking dependencies.
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// Marks inherited channels for `child`'s subtree so world transform,
    /// effective opacity, and effective hidden state are recomputed under the
    /// new ancestry, and marks the subtree for hierarchical repaint.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.link_as_last_child(p, c);

        // Add dirty dependency edges: child depends on parent for TRANSFORM
        // and OPACITY.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.dirty.mark(c, dirty::VISUALS_HIERARCHY);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `child` from its current parent.
    ///
    /// Marks inherited channels for `child`'s subtree so world transform,
    /// effective opacity, and effective hidden state are recomputed after
    /// detaching from the old ancestry.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the element has no parent.
    pub fn remove_from_parent(&mut self, child: ElementId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "element has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);

        // Remove dirty dependency edges.
        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);
        self.dirty.remove_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.dirty.mark(c, dirty::VISUALS_HIERARCHY);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Moves `child` to be a child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    /// Marks inherited channels for `child`'s subtree so world transform,
    /// effective opacity, and effective hidden state are recomputed under the
    /// new ancestry, and marks the subtree for hierarchical repaint.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn reparent(&mut self, child: ElementId, new_parent: ElementId) {
        self.validate(child);
        self.validate(new_parent);

        if self.parent[child.idx as usize] != INVALID {
            let old_p = self.parent[child.idx as usize];
            self.unlink_from_parent(child.idx);
            self.dirty
                .remove_dependency(child.idx, old_p, dirty::TRANSFORM);
            self.dirty
                .remove_dependency(child.idx, old_p, dirty::OPACITY);
            self.dirty.mark(old_p, dirty::TOPOLOGY);
        }

        let p = new_parent.idx;
        let c = child.idx;
        self.link_as_last_child(p, c);

        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.dirty.mark(c, dirty::VISUALS_HIERARCHY);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or
    /// `sibling` has no parent.
    pub fn insert_before(&mut self, child: ElementId, sibling: ElementId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.dirty.mark(c, dirty::VISUALS_HIERARCHY);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of an element, if any.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(ElementId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Returns an iterator over the direct children of an element.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the number of direct children of an element.
    #[must_use]
    pub fn child_count(&self, id: ElementId) -> usize {
        self.children(id).count()
    }

    /// Returns the handles of root elements (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<ElementId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(ElementId {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        roots
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local transform of an element.
    #[must_use]
    pub fn local_transform(&self, id: ElementId) -> Affine {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the layout rect of an element in local coordinates.
    #[must_use]
    pub fn layout(&self, id: ElementId) -> Rect {
        self.validate(id);
        self.layout[id.idx as usize]
    }

    /// Returns the local opacity of an element.
    #[must_use]
    pub fn local_opacity(&self, id: ElementId) -> f32 {
        self.validate(id);
        self.local_opacity[id.idx as usize]
    }

    /// Returns the clip shape of an element.
    #[must_use]
    pub fn clip(&self, id: ElementId) -> Option<ClipShape> {
        self.validate(id);
        self.clip[id.idx as usize]
    }

    /// Returns the style of an element.
    #[must_use]
    pub fn style(&self, id: ElementId) -> Style {
        self.validate(id);
        self.style[id.idx as usize]
    }

    /// Returns the text content of an element.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.validate(id);
        self.text[id.idx as usize].as_deref()
    }

    /// Returns the render hints of an element.
    #[must_use]
    pub fn render_hints(&self, id: ElementId) -> RenderHints {
        self.validate(id);
        self.hints[id.idx as usize]
    }

    /// Returns the flags of an element.
    #[must_use]
    pub fn flags(&self, id: ElementId) -> ElementFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the computed world transform of an element.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_transform(&self, id: ElementId) -> Affine {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the computed effective opacity of an element.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_opacity(&self, id: ElementId) -> f32 {
        self.validate(id);
        self.effective_opacity[id.idx as usize]
    }

    /// Returns whether the element is effectively hidden (including by an
    /// ancestor's hidden flag).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: ElementId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    /// Returns whether the element and all of its ancestors are displayed.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn are_ancestors_and_self_displayed(&self, id: ElementId) -> bool {
        !self.effective_hidden(id)
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the local transform of an element.
    ///
    /// Marks the TRANSFORM channel dirty with eager propagation to
    /// descendants.
    pub fn set_transform(&mut self, id: ElementId, transform: Affine) {
        self.validate(id);
        self.local_transform[id.idx as usize] = transform;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Sets the layout rect of an element.
    ///
    /// Layout positions are baked into generated geometry, so this marks the
    /// VISUALS channel.
    pub fn set_layout(&mut self, id: ElementId, layout: Rect) {
        self.validate(id);
        self.layout[id.idx as usize] = layout;
        self.dirty.mark(id.idx, dirty::VISUALS);
    }

    /// Sets the local opacity of an element.
    ///
    /// Marks the OPACITY channel dirty with eager propagation to descendants.
    pub fn set_opacity(&mut self, id: ElementId, opacity: f32) {
        self.validate(id);
        self.local_opacity[id.idx as usize] = opacity;
        self.dirty.mark_with(id.idx, dirty::OPACITY, &EagerPolicy);
    }

    /// Sets the clip shape of an element.
    ///
    /// The element's own entries carry the clip push/pop, so this also marks
    /// VISUALS.
    pub fn set_clip(&mut self, id: ElementId, clip: Option<ClipShape>) {
        self.validate(id);
        self.clip[id.idx as usize] = clip;
        self.dirty.mark(id.idx, dirty::CLIP);
        self.dirty.mark(id.idx, dirty::VISUALS);
    }

    /// Sets the style of an element.
    pub fn set_style(&mut self, id: ElementId, style: Style) {
        self.validate(id);
        self.style[id.idx as usize] = style;
        self.dirty.mark(id.idx, dirty::VISUALS);
    }

    /// Sets the text content of an element.
    pub fn set_text(&mut self, id: ElementId, text: Option<String>) {
        self.validate(id);
        self.text[id.idx as usize] = text;
        self.dirty.mark(id.idx, dirty::VISUALS);
    }

    /// Sets the render hints of an element.
    ///
    /// Changing hints switches the element builder, which invalidates the
    /// whole subtree's generated visuals.
    pub fn set_render_hints(&mut self, id: ElementId, hints: RenderHints) {
        self.validate(id);
        self.hints[id.idx as usize] = hints;
        self.dirty.mark(id.idx, dirty::VISUALS_HIERARCHY);
    }

    /// Sets the flags of an element.
    ///
    /// Hidden-state changes ride the TRANSFORM channel so the same drain
    /// recomputes `effective_hidden` for the subtree.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    // -- Raw-index accessors for the render chain --
    //
    // These accept raw slot indices (as found in `FrameChanges`) rather than
    // `ElementId` handles, skipping generation validation. Only use with
    // indices that came from `FrameChanges` or `traversal_order()`.

    /// Returns the number of slots ever allocated (live or free).
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.len
    }

    /// Returns the parent slot of raw slot `idx`, or [`INVALID`].
    #[must_use]
    pub fn parent_at(&self, idx: u32) -> u32 {
        self.check_slot(idx);
        self.parent[idx as usize]
    }

    /// Returns the first-child slot of raw slot `idx`, or [`INVALID`].
    #[must_use]
    pub fn first_child_at(&self, idx: u32) -> u32 {
        self.check_slot(idx);
        self.first_child[idx as usize]
    }

    /// Returns the next-sibling slot of raw slot `idx`, or [`INVALID`].
    #[must_use]
    pub fn next_sibling_at(&self, idx: u32) -> u32 {
        self.check_slot(idx);
        self.next_sibling[idx as usize]
    }

    /// Returns the previous-sibling slot of raw slot `idx`, or [`INVALID`].
    #[must_use]
    pub fn prev_sibling_at(&self, idx: u32) -> u32 {
        self.check_slot(idx);
        self.prev_sibling[idx as usize]
    }

    /// Returns the local transform at raw slot `idx`.
    #[must_use]
    pub fn local_transform_at(&self, idx: u32) -> Affine {
        self.check_slot(idx);
        self.local_transform[idx as usize]
    }

    /// Returns the layout rect at raw slot `idx`.
    #[must_use]
    pub fn layout_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        self.layout[idx as usize]
    }

    /// Returns the computed world transform at raw slot `idx`.
    #[must_use]
    pub fn world_transform_at(&self, idx: u32) -> Affine {
        self.check_slot(idx);
        self.world_transform[idx as usize]
    }

    /// Returns the computed effective opacity at raw slot `idx`.
    #[must_use]
    pub fn effective_opacity_at(&self, idx: u32) -> f32 {
        self.check_slot(idx);
        self.effective_opacity[idx as usize]
    }

    /// Returns whether the element at raw slot `idx` is effectively hidden.
    #[must_use]
    pub fn effective_hidden_at(&self, idx: u32) -> bool {
        self.check_slot(idx);
        self.effective_hidden[idx as usize]
    }

    /// Returns the clip shape at raw slot `idx`.
    #[must_use]
    pub fn clip_at(&self, idx: u32) -> Option<ClipShape> {
        self.check_slot(idx);
        self.clip[idx as usize]
    }

    /// Returns the style at raw slot `idx`.
    #[must_use]
    pub fn style_at(&self, idx: u32) -> Style {
        self.check_slot(idx);
        self.style[idx as usize]
    }

    /// Returns the text content at raw slot `idx`.
    #[must_use]
    pub fn text_at(&self, idx: u32) -> Option<&str> {
        self.check_slot(idx);
        self.text[idx as usize].as_deref()
    }

    /// Returns the render hints at raw slot `idx`.
    #[must_use]
    pub fn render_hints_at(&self, idx: u32) -> RenderHints {
        self.check_slot(idx);
        self.hints[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: ElementId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ElementId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if the raw slot index is out of range.
    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Appends `c` to `p`'s child list.
    fn link_as_last_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `idx` from its parent's child list without touching dirty
    /// state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    /// Marks the subtree rooted at `idx` dirty for inherited channels.
    ///
    /// `TRANSFORM` also carries effective hidden propagation.
    fn mark_subtree_inherited_dirty(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark_with(idx, dirty::OPACITY, &EagerPolicy);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use crate::style::Color;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        assert!(store.is_alive(id));
        store.destroy_element(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ElementStore::new();
        let id1 = store.create_element();
        store.destroy_element(id1);
        let id2 = store.create_element();
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn add_child_and_query() {
        let mut store = ElementStore::new();
        let parent = store.create_element();
        let child1 = store.create_element();
        let child2 = store.create_element();

        store.add_child(parent, child1);
        store.add_child(parent, child2);

        assert_eq!(store.parent(child1), Some(parent));
        assert_eq!(store.parent(child2), Some(parent));
        assert_eq!(store.child_count(parent), 2);

        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut store = ElementStore::new();
        let parent = store.create_element();
        let child = store.create_element();

        store.add_child(parent, child);
        assert_eq!(store.parent(child), Some(parent));

        store.remove_from_parent(child);
        assert_eq!(store.parent(child), None);
        assert!(store.children(parent).next().is_none());
    }

    #[test]
    fn insert_before_works() {
        let mut store = ElementStore::new();
        let parent = store.create_element();
        let a = store.create_element();
        let b = store.create_element();
        let c = store.create_element();

        store.add_child(parent, a);
        store.add_child(parent, c);
        store.insert_before(b, c);

        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn reparent_works() {
        let mut store = ElementStore::new();
        let p1 = store.create_element();
        let p2 = store.create_element();
        let child = store.create_element();

        store.add_child(p1, child);
        assert_eq!(store.parent(child), Some(p1));

        store.reparent(child, p2);
        assert_eq!(store.parent(child), Some(p2));
        assert!(store.children(p1).next().is_none());
    }

    #[test]
    fn roots_returns_parentless_elements() {
        let mut store = ElementStore::new();
        let a = store.create_element();
        let b = store.create_element();
        let c = store.create_element();

        store.add_child(a, c);

        let roots = store.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
    }

    #[test]
    #[should_panic(expected = "cannot destroy element with children")]
    fn destroy_with_children_panics() {
        let mut store = ElementStore::new();
        let parent = store.create_element();
        let child = store.create_element();
        store.add_child(parent, child);
        store.destroy_element(parent);
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn destroyed_handle_panics_on_get_transform() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        store.destroy_element(id);
        let _ = store.world_transform(id);
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn destroyed_handle_panics_on_set_style() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        store.destroy_element(id);
        store.set_style(id, Style::default());
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut store = ElementStore::new();
        let root = store.create_element();
        let id = store.create_element();
        store.destroy_element(id);
        store.add_child(root, id);
    }

    #[test]
    fn set_style_marks_visuals() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        // Consume initial creation dirtiness.
        let _ = store.evaluate();

        store.set_style(
            id,
            Style {
                background: Some(Color::WHITE),
                ..Style::default()
            },
        );
        let changes = store.evaluate();
        assert!(
            changes.visuals.contains(&id.idx),
            "visuals channel should contain the element"
        );
    }

    #[test]
    fn set_text_marks_visuals() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        let _ = store.evaluate();

        store.set_text(id, Some("hello".to_string()));
        let changes = store.evaluate();
        assert!(changes.visuals.contains(&id.idx));
        assert_eq!(store.text(id), Some("hello"));
    }

    #[test]
    fn set_render_hints_marks_hierarchy() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        let _ = store.evaluate();

        store.set_render_hints(id, crate::style::RenderHints::TEXT);
        let changes = store.evaluate();
        assert!(changes.visuals_hierarchy.contains(&id.idx));
    }

    #[test]
    fn set_clip_marks_clip_and_visuals() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        let _ = store.evaluate();

        store.set_clip(
            id,
            Some(ClipShape::Rect(kurbo::Rect::new(0.0, 0.0, 100.0, 100.0))),
        );
        let changes = store.evaluate();
        assert!(changes.clips.contains(&id.idx));
        assert!(changes.visuals.contains(&id.idx));
    }

    #[test]
    fn set_opacity_marks_dirty() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        let _ = store.evaluate();

        store.set_opacity(id, 0.5);
        let changes = store.evaluate();
        assert!(
            changes.opacities.contains(&id.idx),
            "opacity channel should contain the element"
        );
    }

    #[test]
    fn set_flags_marks_transform_channel() {
        let mut store = ElementStore::new();
        let id = store.create_element();
        let _ = store.evaluate();

        store.set_flags(id, ElementFlags { hidden: true });
        let changes = store.evaluate();
        assert!(
            changes.transforms.contains(&id.idx),
            "flags ride the TRANSFORM channel"
        );
    }
}
