// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex formats and CPU-side mesh data.

use alloc::vec::Vec;

use kurbo::Rect;

use accretion_core::style::Color;

/// A single UI vertex.
///
/// The layout is `repr(C)` and [`bytemuck::Pod`] so device implementations
/// can view vertex buffers as raw bytes for upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space.
    pub position: [f32; 2],
    /// Texture coordinates (zero for untextured geometry).
    pub uv: [f32; 2],
    /// Tint color, straight alpha.
    pub tint: [u8; 4],
    /// Opacity payload — the device encoding of the owning element's opacity
    /// allocation. Rewritten in place by the opacity fast path.
    pub opacity: [u8; 4],
}

/// CPU-side mesh data staged for upload to a [`MeshDevice`].
///
/// Indices are `u16`; a single element's mesh never exceeds 65 535 vertices.
///
/// [`MeshDevice`]: crate::device::MeshDevice
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle-list indices into `vertices`.
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends an axis-aligned quad.
    ///
    /// `flipped` inverts the triangle winding, for subtrees under a
    /// mirror-scaling transform.
    ///
    /// # Panics
    ///
    /// Panics if the mesh would exceed the `u16` index range.
    pub fn push_quad(&mut self, rect: Rect, uv: Rect, tint: Color, flipped: bool) {
        assert!(
            self.vertices.len() + 4 <= usize::from(u16::MAX),
            "mesh exceeds u16 index range"
        );
        let base = self.vertices.len() as u16;
        let tint = tint.to_array();

        let corners = [
            ([rect.x0, rect.y0], [uv.x0, uv.y0]),
            ([rect.x1, rect.y0], [uv.x1, uv.y0]),
            ([rect.x1, rect.y1], [uv.x1, uv.y1]),
            ([rect.x0, rect.y1], [uv.x0, uv.y1]),
        ];
        for (p, t) in corners {
            self.vertices.push(Vertex {
                position: [p[0] as f32, p[1] as f32],
                uv: [t[0] as f32, t[1] as f32],
                tint,
                opacity: [0; 4],
            });
        }

        let winding: [u16; 6] = if flipped {
            [0, 2, 1, 0, 3, 2]
        } else {
            [0, 1, 2, 0, 2, 3]
        };
        self.indices.extend(winding.iter().map(|i| base + i));
    }

    /// Builds a solid single-quad mesh covering `rect`.
    #[must_use]
    pub fn solid_quad(rect: Rect, tint: Color, flipped: bool) -> Self {
        let mut mesh = Self::new();
        mesh.push_quad(rect, Rect::ZERO, tint, flipped);
        mesh
    }

    /// Builds a border ring of four strips inset into `rect`.
    ///
    /// Returns an empty mesh when `width` is not positive or the rect is too
    /// small to hold the ring.
    #[must_use]
    pub fn border(rect: Rect, width: f64, tint: Color, flipped: bool) -> Self {
        let mut mesh = Self::new();
        if width <= 0.0 || rect.width() < width * 2.0 || rect.height() < width * 2.0 {
            return mesh;
        }
        // Top and bottom strips span the full width; left and right fill the
        // space between them.
        mesh.push_quad(
            Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + width),
            Rect::ZERO,
            tint,
            flipped,
        );
        mesh.push_quad(
            Rect::new(rect.x0, rect.y1 - width, rect.x1, rect.y1),
            Rect::ZERO,
            tint,
            flipped,
        );
        mesh.push_quad(
            Rect::new(rect.x0, rect.y0 + width, rect.x0 + width, rect.y1 - width),
            Rect::ZERO,
            tint,
            flipped,
        );
        mesh.push_quad(
            Rect::new(rect.x1 - width, rect.y0 + width, rect.x1, rect.y1 - width),
            Rect::ZERO,
            tint,
            flipped,
        );
        mesh
    }
}

/// Index of a mesh staged in a [`MeshStaging`] buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshSlot(pub(crate) u32);

/// Pass-scoped staging area for generated mesh data.
///
/// Builders stage meshes here (directly or via jobs); conversion takes them
/// out for device upload. Reset after every pass; slots are never reused
/// within one.
#[derive(Debug, Default)]
pub struct MeshStaging {
    slots: Vec<MeshData>,
}

impl MeshStaging {
    /// Creates an empty staging buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a mesh and returns its slot.
    pub fn push(&mut self, data: MeshData) -> MeshSlot {
        let slot = MeshSlot(self.slots.len() as u32);
        self.slots.push(data);
        slot
    }

    /// Reserves an empty slot, to be filled by a job before conversion.
    pub fn reserve(&mut self) -> MeshSlot {
        self.push(MeshData::new())
    }

    /// Returns a mutable reference to a staged mesh.
    pub fn get_mut(&mut self, slot: MeshSlot) -> &mut MeshData {
        &mut self.slots[slot.0 as usize]
    }

    /// Takes the mesh out of a slot, leaving it empty.
    pub fn take(&mut self, slot: MeshSlot) -> MeshData {
        core::mem::take(&mut self.slots[slot.0 as usize])
    }

    /// Number of staged slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether no slots are staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Clears all slots for the next pass.
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_has_four_vertices_and_two_triangles() {
        let mesh = MeshData::solid_quad(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, false);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn flipped_quad_reverses_winding() {
        let normal = MeshData::solid_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, false);
        let flipped = MeshData::solid_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, true);
        assert_eq!(normal.vertices, flipped.vertices);
        assert_ne!(normal.indices, flipped.indices);
        assert_eq!(normal.indices[..3], [0, 1, 2]);
        assert_eq!(flipped.indices[..3], [0, 2, 1]);
    }

    #[test]
    fn border_is_four_strips() {
        let mesh = MeshData::border(Rect::new(0.0, 0.0, 20.0, 20.0), 2.0, Color::BLACK, false);
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.indices.len(), 24);
    }

    #[test]
    fn degenerate_border_is_empty() {
        let mesh = MeshData::border(Rect::new(0.0, 0.0, 2.0, 2.0), 2.0, Color::BLACK, false);
        assert!(mesh.is_empty());
    }

    #[test]
    fn staging_take_leaves_slot_empty() {
        let mut staging = MeshStaging::new();
        let slot = staging.push(MeshData::solid_quad(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Color::WHITE,
            false,
        ));
        let taken = staging.take(slot);
        assert_eq!(taken.vertices.len(), 4);
        assert!(staging.get_mut(slot).is_empty());
    }
}
