// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scheduled mesh-generation and color-rewrite jobs.
//!
//! The dirty walk itself is single-threaded, but per-element mesh work can
//! be deferred into jobs that run between the walk and command conversion.
//! [`JobQueue::execute`] runs the compute portion of every job — in parallel
//! under the `parallel` feature, serially otherwise — and
//! [`JobQueue::apply`] then commits results to the staging buffer and the
//! device on the calling thread. Conversion never starts until both have
//! returned, so command building always reads completed geometry.
//!
//! Jobs only ever touch data they own: a text job fills its reserved staging
//! slot, a color-rewrite job transforms a private copy of one mesh's
//! vertices. That keeps the compute phase embarrassingly parallel.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use accretion_core::style::Color;

use crate::device::{MeshDevice, MeshHandle};
use crate::mesh::{MeshData, MeshSlot, MeshStaging, Vertex};

/// Glyph atlas layout assumed by text mesh generation: a 16×16 grid indexed
/// by code point modulo 256.
const ATLAS_GRID: u32 = 16;

/// Horizontal advance per glyph, as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.6;

/// A deferred text-layout request.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRequest {
    /// The text to lay out.
    pub text: String,
    /// Baseline origin of the first glyph, in world space.
    pub origin: Point,
    /// Font size in world units.
    pub font_size: f64,
    /// Glyph tint.
    pub color: Color,
    /// Whether triangle winding is inverted for this element.
    pub flipped: bool,
}

impl TextRequest {
    /// Generates one textured quad per non-whitespace glyph.
    fn generate(&self) -> MeshData {
        let mut mesh = MeshData::new();
        let advance = self.font_size * GLYPH_ADVANCE;
        let mut x = self.origin.x;
        for ch in self.text.chars() {
            if !ch.is_whitespace() {
                let code = u32::from(ch) % (ATLAS_GRID * ATLAS_GRID);
                let col = f64::from(code % ATLAS_GRID);
                let row = f64::from(code / ATLAS_GRID);
                let cell = 1.0 / f64::from(ATLAS_GRID);
                let uv = Rect::new(
                    col * cell,
                    row * cell,
                    (col + 1.0) * cell,
                    (row + 1.0) * cell,
                );
                let quad = Rect::new(x, self.origin.y, x + advance, self.origin.y + self.font_size);
                mesh.push_quad(quad, uv, self.color, self.flipped);
            }
            x += advance;
        }
        mesh
    }
}

/// A unit of deferred work.
#[derive(Debug)]
enum Job {
    /// Generate glyph quads into a reserved staging slot.
    GenerateText {
        slot: MeshSlot,
        request: TextRequest,
        out: MeshData,
    },
    /// Rewrite the opacity payload of one mesh's vertices.
    RewriteOpacity {
        mesh: MeshHandle,
        color: [u8; 4],
        vertices: Vec<Vertex>,
    },
}

impl Job {
    /// Compute phase. Touches only job-owned data.
    fn run(&mut self) {
        match self {
            Self::GenerateText { request, out, .. } => {
                *out = request.generate();
            }
            Self::RewriteOpacity {
                color, vertices, ..
            } => {
                for v in vertices {
                    v.opacity = *color;
                }
            }
        }
    }
}

/// Queue of jobs for one pass.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Vec<Job>,
}

impl JobQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules glyph-mesh generation into `slot`.
    pub fn push_text(&mut self, slot: MeshSlot, request: TextRequest) {
        self.jobs.push(Job::GenerateText {
            slot,
            request,
            out: MeshData::new(),
        });
    }

    /// Schedules an opacity rewrite of `mesh`.
    ///
    /// `vertices` is the mesh's current vertex data; the job owns it for the
    /// duration of the rewrite, and [`apply`](Self::apply) commits it back
    /// through a same-size update.
    pub fn push_opacity_rewrite(
        &mut self,
        mesh: MeshHandle,
        color: [u8; 4],
        vertices: Vec<Vertex>,
    ) {
        self.jobs.push(Job::RewriteOpacity {
            mesh,
            color,
            vertices,
        });
    }

    /// Number of queued jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Runs the compute phase of every job.
    #[cfg(feature = "parallel")]
    pub fn execute(&mut self) {
        use rayon::prelude::*;
        self.jobs.par_iter_mut().for_each(Job::run);
    }

    /// Runs the compute phase of every job.
    #[cfg(not(feature = "parallel"))]
    pub fn execute(&mut self) {
        for job in &mut self.jobs {
            job.run();
        }
    }

    /// Commits every job's result and empties the queue.
    ///
    /// Text meshes land in their reserved staging slots; opacity rewrites go
    /// to the device as same-size vertex updates.
    pub fn apply(&mut self, staging: &mut MeshStaging, device: &mut dyn MeshDevice) {
        for job in self.jobs.drain(..) {
            match job {
                Job::GenerateText { slot, out, .. } => {
                    *staging.get_mut(slot) = out;
                }
                Job::RewriteOpacity { mesh, vertices, .. } => {
                    device.update_vertices(mesh, &vertices);
                }
            }
        }
    }
}
