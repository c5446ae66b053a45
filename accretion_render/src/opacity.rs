// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opacity fast path.
//!
//! When the only dirtied value on an element is its opacity allocation, its
//! geometry is untouched — topology, positions, and UVs stay exactly as
//! generated. The fast path therefore skips entry generation and command
//! conversion entirely and schedules one color-rewrite job per owned mesh:
//! every vertex's opacity payload is overwritten with the device's encoding
//! of the element's current opacity allocation id, through a same-size
//! update that can never reallocate.

use crate::device::MeshDevice;
use crate::job::JobQueue;
use crate::render_data::RenderDataStore;

/// Schedules opacity-payload rewrites for every mesh owned by `element`.
///
/// Covers the head mesh, the tail mesh, and all extra meshes. The jobs join
/// with mesh-generation jobs before conversion runs, so the rewritten
/// vertices are committed before any renderer consumes them.
pub(crate) fn update_opacity_id(
    data: &RenderDataStore,
    device: &dyn MeshDevice,
    jobs: &mut JobQueue,
    element: u32,
) {
    let color = device.opacity_color(data.opacity_id[element as usize]);

    let head = data.head_mesh[element as usize];
    let tail = data.tail_mesh[element as usize];
    let extras = &data.extra_meshes[element as usize];

    for handle in head.iter().chain(tail.iter()).chain(extras.iter()) {
        jobs.push_opacity_rewrite(*handle, color, device.vertices(*handle).to_vec());
    }
}
