// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mesh device abstraction.
//!
//! The render chain never talks to a GPU directly. It allocates, updates,
//! and frees vertex/index regions through the [`MeshDevice`] trait, and asks
//! the device to encode opacity allocation ids into vertex payload. Backends
//! implement this over their buffer management; [`CpuDevice`] is the
//! reference implementation used by tests and headless runs.

use alloc::vec::Vec;

use core::fmt;

use crate::mesh::Vertex;
use crate::shader_info::OpacityId;

/// A reference to an allocated vertex/index region.
///
/// Handles are opaque to the render chain; their lifetime is tied to the
/// owning element's visual state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) u32);

impl MeshHandle {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for MeshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MeshHandle({})", self.0)
    }
}

/// Allocates and updates mesh regions on behalf of the render chain.
///
/// Update calls must preserve allocation sizes; changing a mesh's vertex or
/// index count requires a free + allocate. Allocation failure is the
/// device's to surface (the reference implementation aborts on OOM like any
/// allocator-backed structure).
pub trait MeshDevice {
    /// Allocates a region holding the given geometry.
    fn allocate(&mut self, vertices: &[Vertex], indices: &[u16]) -> MeshHandle;

    /// Rewrites a region's geometry. Counts must match the allocation.
    fn update(&mut self, handle: MeshHandle, vertices: &[Vertex], indices: &[u16]);

    /// Rewrites only a region's vertices. The count must match the
    /// allocation; indices are untouched.
    fn update_vertices(&mut self, handle: MeshHandle, vertices: &[Vertex]);

    /// Frees a region.
    fn free(&mut self, handle: MeshHandle);

    /// Returns the current vertex slice of a region.
    fn vertices(&self, handle: MeshHandle) -> &[Vertex];

    /// Returns the current index slice of a region.
    fn indices(&self, handle: MeshHandle) -> &[u16];

    /// Encodes an opacity allocation id into the vertex opacity payload.
    ///
    /// The encoding is a contract between the device and the renderer that
    /// consumes its buffers; the render chain treats it as opaque.
    fn opacity_color(&self, id: OpacityId) -> [u8; 4];
}

struct CpuMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

/// A CPU-resident [`MeshDevice`] for tests and headless use.
#[derive(Default)]
pub struct CpuDevice {
    slots: Vec<Option<CpuMesh>>,
    free_list: Vec<u32>,
}

impl fmt::Debug for CpuDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuDevice")
            .field("live_meshes", &self.live_mesh_count())
            .finish_non_exhaustive()
    }
}

impl CpuDevice {
    /// Creates an empty device.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently allocated meshes.
    #[must_use]
    pub fn live_mesh_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn slot(&self, handle: MeshHandle) -> &CpuMesh {
        self.slots
            .get(handle.0 as usize)
            .and_then(Option::as_ref)
            .expect("stale MeshHandle")
    }

    fn slot_mut(&mut self, handle: MeshHandle) -> &mut CpuMesh {
        self.slots
            .get_mut(handle.0 as usize)
            .and_then(Option::as_mut)
            .expect("stale MeshHandle")
    }
}

impl MeshDevice for CpuDevice {
    fn allocate(&mut self, vertices: &[Vertex], indices: &[u16]) -> MeshHandle {
        let mesh = CpuMesh {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        };
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize] = Some(mesh);
            MeshHandle(idx)
        } else {
            self.slots.push(Some(mesh));
            MeshHandle(self.slots.len() as u32 - 1)
        }
    }

    fn update(&mut self, handle: MeshHandle, vertices: &[Vertex], indices: &[u16]) {
        let mesh = self.slot_mut(handle);
        assert_eq!(
            mesh.vertices.len(),
            vertices.len(),
            "mesh update must preserve vertex count"
        );
        assert_eq!(
            mesh.indices.len(),
            indices.len(),
            "mesh update must preserve index count"
        );
        mesh.vertices.copy_from_slice(vertices);
        mesh.indices.copy_from_slice(indices);
    }

    fn update_vertices(&mut self, handle: MeshHandle, vertices: &[Vertex]) {
        let mesh = self.slot_mut(handle);
        assert_eq!(
            mesh.vertices.len(),
            vertices.len(),
            "vertex update must preserve vertex count"
        );
        mesh.vertices.copy_from_slice(vertices);
    }

    fn free(&mut self, handle: MeshHandle) {
        let slot = self
            .slots
            .get_mut(handle.0 as usize)
            .expect("stale MeshHandle");
        assert!(slot.is_some(), "double free of MeshHandle");
        *slot = None;
        self.free_list.push(handle.0);
    }

    fn vertices(&self, handle: MeshHandle) -> &[Vertex] {
        &self.slot(handle).vertices
    }

    fn indices(&self, handle: MeshHandle) -> &[u16] {
        &self.slot(handle).indices
    }

    fn opacity_color(&self, id: OpacityId) -> [u8; 4] {
        // Little-endian row index in the rgb channels, alpha forced opaque.
        // This matches the reference renderer's opacity-table addressing.
        let row = id.index();
        [
            (row & 0xff) as u8,
            ((row >> 8) & 0xff) as u8,
            ((row >> 16) & 0xff) as u8,
            0xff,
        ]
    }
}
