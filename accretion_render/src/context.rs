// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mesh-generation context.
//!
//! A [`MeshGenerationContext`] brackets entry generation for exactly one
//! element: the dirty walk begins a context on the element's root entry,
//! hands it to the selected [`ElementBuilder`](crate::builder::ElementBuilder),
//! and finishes it when the builder returns. Begin and finish live in a
//! single code path inside the walk, so bracketing cannot be left open even
//! when a builder misbehaves — there is no way to obtain a context without
//! going through that path.

use kurbo::Rect;

use crate::entry::{EntryArena, EntryId, EntryKind};
use crate::mesh::{MeshData, MeshSlot, MeshStaging};

/// Entry-emission surface handed to element builders.
///
/// All emission is appended to the current element's entry chain in call
/// order. [`begin_tail`](Self::begin_tail) splits the chain: entries emitted
/// before it render before the element's children, entries after it render
/// after them.
#[derive(Debug)]
pub struct MeshGenerationContext<'a> {
    entries: &'a mut EntryArena,
    staging: &'a mut MeshStaging,
    element: u32,
    last: EntryId,
    tail_marked: bool,
    winding_flipped: bool,
    emitted: u32,
}

impl<'a> MeshGenerationContext<'a> {
    /// Begins entry generation for `element`, chaining onto `root`.
    pub(crate) fn begin(
        entries: &'a mut EntryArena,
        staging: &'a mut MeshStaging,
        element: u32,
        root: EntryId,
        winding_flipped: bool,
    ) -> Self {
        Self {
            entries,
            staging,
            element,
            last: root,
            tail_marked: false,
            winding_flipped,
            emitted: 0,
        }
    }

    /// Ends entry generation, returning the number of entries emitted.
    pub(crate) fn finish(self) -> u32 {
        self.emitted
    }

    fn append(&mut self, kind: EntryKind) {
        let id = self.entries.alloc(kind);
        self.entries.set_next(self.last, id);
        self.last = id;
        self.emitted += 1;
    }

    /// The raw slot index of the element being generated.
    #[must_use]
    pub fn element(&self) -> u32 {
        self.element
    }

    /// Whether this element's triangle winding is inverted relative to
    /// screen space.
    ///
    /// Builders must thread this through mesh construction; winding decides
    /// which triangle face survives backface culling.
    #[must_use]
    pub fn winding_flipped(&self) -> bool {
        self.winding_flipped
    }

    /// Emits a draw of already-generated mesh data.
    ///
    /// # Panics
    ///
    /// Panics if the mesh is empty.
    pub fn draw_mesh(&mut self, data: MeshData) {
        assert!(!data.is_empty(), "cannot draw an empty mesh");
        let slot = self.staging.push(data);
        self.append(EntryKind::DrawMesh { slot });
    }

    /// Emits a draw whose mesh will be produced by a scheduled job.
    ///
    /// Returns the staging slot the job must fill before conversion runs.
    pub fn draw_deferred(&mut self) -> MeshSlot {
        let slot = self.staging.reserve();
        self.append(EntryKind::DrawMesh { slot });
        slot
    }

    /// Emits the start of a clip bracket with a world-space scissor rect.
    pub fn push_clip(&mut self, rect: Rect) {
        self.append(EntryKind::PushClip { rect });
    }

    /// Emits the end of the innermost clip bracket.
    pub fn pop_clip(&mut self) {
        self.append(EntryKind::PopClip);
    }

    /// Marks the head/tail split: everything emitted after this call renders
    /// after the element's children.
    ///
    /// # Panics
    ///
    /// Panics if called more than once for the same element.
    pub fn begin_tail(&mut self) {
        assert!(
            !self.tail_marked,
            "begin_tail may only be called once per element"
        );
        self.tail_marked = true;
        self.append(EntryKind::ChildrenMarker);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use accretion_core::style::Color;

    use super::*;

    #[test]
    fn entries_chain_in_emission_order() {
        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);

        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, 0, root, false);
        ctx.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        ctx.draw_mesh(MeshData::solid_quad(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::WHITE,
            false,
        ));
        ctx.begin_tail();
        ctx.pop_clip();
        let emitted = ctx.finish();
        assert_eq!(emitted, 4);

        let mut kinds = Vec::new();
        let mut e = entries.next(root);
        while e.is_valid() {
            kinds.push(entries.kind(e));
            e = entries.next(e);
        }
        assert!(matches!(kinds[0], EntryKind::PushClip { .. }));
        assert!(matches!(kinds[1], EntryKind::DrawMesh { .. }));
        assert!(matches!(kinds[2], EntryKind::ChildrenMarker));
        assert!(matches!(kinds[3], EntryKind::PopClip));
    }

    #[test]
    #[should_panic(expected = "once per element")]
    fn double_tail_marker_panics() {
        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);

        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, 0, root, false);
        ctx.begin_tail();
        ctx.begin_tail();
    }

    #[test]
    #[should_panic(expected = "empty mesh")]
    fn empty_mesh_draw_panics() {
        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);

        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, 0, root, false);
        ctx.draw_mesh(MeshData::new());
    }
}
