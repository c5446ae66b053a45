// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render chain: consumes evaluated frame changes, drives the visual
//! changes processor, and owns every per-element rendering resource.
//!
//! One [`process`](RenderChain::process) call per frame turns an
//! [`ElementStore::evaluate`] result into an updated command list:
//!
//! 1. **Sync** — attach added elements (render data slot, transform and
//!    opacity rows, clip method), detach removed ones (free meshes, unlink
//!    commands, free rows), push table updates for transform/opacity
//!    changes, and build the repaint queue from the visuals channels,
//!    deferred pending flags, and winding-flip transitions.
//! 2. **Walk** — depth-first dirty walk with entry generation (§ the
//!    processor).
//! 3. **Jobs** — run scheduled mesh-generation and color-rewrite jobs; this
//!    join completes before any generated geometry is consumed.
//! 4. **Convert** — entry-to-command conversion and command-range
//!    replacement.
//!
//! The chain reports each pass as a [`PassReport`]: counters plus the
//! damage region covering every touched element.
//!
//! [`ElementStore::evaluate`]: accretion_core::element::ElementStore::evaluate

use alloc::vec::Vec;

use accretion_core::element::{ClipShape, ElementStore, FrameChanges, INVALID};
use accretion_core::trace::{
    PassBeginEvent, PassSummary, PhaseBeginEvent, PhaseEndEvent, PhaseKind, Tracer,
};

use crate::builder::BuilderRegistry;
use crate::command::CommandArena;
use crate::damage::DamageRegion;
use crate::device::MeshDevice;
use crate::executor::{self, CommandExecutor};
use crate::processor::VisualChangesProcessor;
use crate::render_data::{ClipMethod, DirtyValues, RenderDataStore};
use crate::shader_info::ShaderInfoStorage;

/// The outcome of one render pass.
#[derive(Debug)]
pub struct PassReport {
    /// Counters for the pass.
    pub summary: PassSummary,
    /// World-space region whose pixels changed.
    pub damage: DamageRegion,
}

/// Owns all rendering state for one element tree.
#[derive(Debug)]
pub struct RenderChain<D: MeshDevice> {
    device: D,
    data: RenderDataStore,
    shader_info: ShaderInfoStorage,
    commands: CommandArena,
    processor: VisualChangesProcessor,
    builders: BuilderRegistry,
    queue: Vec<(u32, bool)>,
    pass_index: u64,
}

impl<D: MeshDevice> RenderChain<D> {
    /// Creates a chain rendering through `device`.
    #[must_use]
    pub fn new(device: D) -> Self {
        Self {
            device,
            data: RenderDataStore::new(),
            shader_info: ShaderInfoStorage::new(),
            commands: CommandArena::new(),
            processor: VisualChangesProcessor::new(),
            builders: BuilderRegistry::new(),
            queue: Vec::new(),
            pass_index: 0,
        }
    }

    /// The mesh device.
    #[must_use]
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The per-element render data.
    #[must_use]
    pub fn render_data(&self) -> &RenderDataStore {
        &self.data
    }

    /// The shader-info tables.
    #[must_use]
    pub fn shader_info(&self) -> &ShaderInfoStorage {
        &self.shader_info
    }

    /// The installed command list.
    #[must_use]
    pub fn commands(&self) -> &CommandArena {
        &self.commands
    }

    /// The visual-changes processor (pool sizes, pass stats).
    #[must_use]
    pub fn processor(&self) -> &VisualChangesProcessor {
        &self.processor
    }

    /// The builder registry, e.g. to install a dynamic-color palette.
    pub fn builders_mut(&mut self) -> &mut BuilderRegistry {
        &mut self.builders
    }

    /// Dispatches the installed command list to `executor` in paint order.
    pub fn execute(&self, executor: &mut dyn CommandExecutor) {
        executor::execute(&self.commands, executor);
    }

    /// Processes one frame's changes without tracing.
    pub fn process(&mut self, store: &ElementStore, changes: &FrameChanges) -> PassReport {
        self.process_traced(store, changes, &mut Tracer::none())
    }

    /// Processes one frame's changes, emitting trace events.
    pub fn process_traced(
        &mut self,
        store: &ElementStore,
        changes: &FrameChanges,
        tracer: &mut Tracer<'_>,
    ) -> PassReport {
        self.data.ensure_slots(store.slot_count());
        let pass_index = self.pass_index;
        self.pass_index += 1;

        tracer.phase_begin(&PhaseBeginEvent {
            pass_index,
            phase: PhaseKind::Sync,
        });
        self.sync_changes(store, changes);
        tracer.phase_end(&PhaseEndEvent {
            pass_index,
            phase: PhaseKind::Sync,
        });

        let dirty_token = self.processor.begin_pass();
        let queue = core::mem::take(&mut self.queue);
        let queued = queue.len() as u32;
        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            dirty_token,
            queued,
        });

        tracer.phase_begin(&PhaseBeginEvent {
            pass_index,
            phase: PhaseKind::Walk,
        });
        for &(element, hierarchical) in &queue {
            self.processor.process_on_visuals_changed(
                store,
                &mut self.data,
                &mut self.builders,
                &self.device,
                element,
                hierarchical,
                tracer,
            );
        }
        tracer.phase_end(&PhaseEndEvent {
            pass_index,
            phase: PhaseKind::Walk,
        });

        tracer.phase_begin(&PhaseBeginEvent {
            pass_index,
            phase: PhaseKind::Jobs,
        });
        self.builders.schedule_all(self.processor.jobs_mut());
        self.processor.run_jobs(&mut self.device);
        tracer.phase_end(&PhaseEndEvent {
            pass_index,
            phase: PhaseKind::Jobs,
        });

        tracer.phase_begin(&PhaseBeginEvent {
            pass_index,
            phase: PhaseKind::Convert,
        });
        self.processor.convert_entries_to_commands(
            store,
            &mut self.data,
            &mut self.device,
            &mut self.commands,
            tracer,
        );
        tracer.phase_end(&PhaseEndEvent {
            pass_index,
            phase: PhaseKind::Convert,
        });

        let mut queue = queue;
        queue.clear();
        self.queue = queue;

        let mut damage = DamageRegion::None;
        for &element in self.processor.touched() {
            let bounds = store
                .world_transform_at(element)
                .transform_rect_bbox(store.layout_at(element));
            damage.add_rect(bounds);
        }

        let stats = self.processor.stats();
        let summary = PassSummary {
            pass_index,
            dirty_token,
            queued,
            processed: stats.processed,
            deferred: stats.deferred,
            fast_path: stats.fast_path,
            entries: stats.entries,
            commands: stats.commands,
        };
        tracer.pass_summary(&summary);

        PassReport { summary, damage }
    }

    /// Applies lifecycle, table, and dirtied-value updates, building the
    /// repaint queue.
    fn sync_changes(&mut self, store: &ElementStore, changes: &FrameChanges) {
        // Removed before added: a recycled slot must be detached first.
        for &element in &changes.removed {
            self.detach(element);
        }
        for &element in &changes.added {
            self.attach(store, element);
        }

        for &element in &changes.clips {
            if self.data.is_attached(element) {
                self.data.clip_method[element as usize] = clip_method_for(store.clip_at(element));
            }
        }

        for &element in &changes.transforms {
            if !self.data.is_attached(element) {
                continue;
            }
            let world = store.world_transform_at(element);
            let transform_id = self.data.transform_id[element as usize];
            self.shader_info.set_transform(transform_id, world);

            // A winding-flip transition changes triangle order for the whole
            // subtree, which only regeneration can fix.
            let flips = world.determinant() < 0.0;
            if flips != self.data.winding_flipped[element as usize] {
                self.data.dirtied[element as usize].insert(DirtyValues::VISUALS_HIERARCHY);
                self.queue.push((element, true));
            }
        }

        for &element in &changes.opacities {
            if !self.data.is_attached(element) {
                continue;
            }
            let opacity_id = self.data.opacity_id[element as usize];
            self.shader_info
                .set_opacity(opacity_id, store.effective_opacity_at(element));
            self.data.dirtied[element as usize].insert(DirtyValues::OPACITY_ID);
            self.queue.push((element, false));
        }

        for &element in &changes.hidden {
            if self.data.is_attached(element) {
                // Hidden elements stop drawing immediately; their meshes are
                // kept for when they return.
                self.remove_element_commands(element);
            }
        }

        for &element in &changes.unhidden {
            if !self.data.is_attached(element) {
                continue;
            }
            // Deferred repaints resume now that the subtree is displayed.
            // Elements with no pending work still regenerate: their commands
            // were dropped when they were hidden.
            if self.data.pending_hierarchical_repaint[element as usize] {
                self.data.dirtied[element as usize].insert(DirtyValues::VISUALS_HIERARCHY);
                self.queue.push((element, true));
            } else {
                self.data.dirtied[element as usize].insert(DirtyValues::VISUALS);
                self.queue.push((element, false));
            }
        }

        for &element in &changes.visuals {
            if self.data.is_attached(element) {
                self.data.dirtied[element as usize].insert(DirtyValues::VISUALS);
                self.queue.push((element, false));
            }
        }

        for &element in &changes.visuals_hierarchy {
            if !self.data.is_attached(element) {
                continue;
            }
            self.data.dirtied[element as usize].insert(DirtyValues::VISUALS_HIERARCHY);
            // Tree order may have changed (reattachment); drop the stale
            // subtree commands so conversion recomputes their positions.
            self.remove_subtree_commands(store, element);
            self.queue.push((element, true));
        }
    }

    /// Initializes render data for a newly added element.
    fn attach(&mut self, store: &ElementStore, element: u32) {
        self.data.ensure_slots(store.slot_count());
        assert!(
            !self.data.is_attached(element),
            "element {element} attached twice"
        );
        self.data.reset_slot(element);
        let i = element as usize;
        self.data.attached[i] = true;
        self.data.clip_method[i] = clip_method_for(store.clip_at(element));

        let transform_id = self.shader_info.alloc_transform();
        self.shader_info
            .set_transform(transform_id, store.world_transform_at(element));
        self.data.transform_id[i] = transform_id;

        let opacity_id = self.shader_info.alloc_opacity();
        self.shader_info
            .set_opacity(opacity_id, store.effective_opacity_at(element));
        self.data.opacity_id[i] = opacity_id;
    }

    /// Releases every resource owned by a removed element.
    fn detach(&mut self, element: u32) {
        if !self.data.is_attached(element) {
            return;
        }
        self.remove_element_commands(element);

        let i = element as usize;
        if let Some(handle) = self.data.head_mesh[i].take() {
            self.device.free(handle);
        }
        if let Some(handle) = self.data.tail_mesh[i].take() {
            self.device.free(handle);
        }
        let extras = core::mem::take(&mut self.data.extra_meshes[i]);
        for handle in extras {
            self.device.free(handle);
        }

        self.shader_info.free_transform(self.data.transform_id[i]);
        self.shader_info.free_opacity(self.data.opacity_id[i]);
        self.data.reset_slot(element);
    }

    /// Unlinks and frees the element's installed command ranges.
    fn remove_element_commands(&mut self, element: u32) {
        let i = element as usize;
        let (head_first, head_last) = self.data.head_range(element);
        if head_first.is_valid() {
            self.commands.remove_range(head_first, head_last);
            self.data.head_first[i] = crate::command::CommandId::INVALID;
            self.data.head_last[i] = crate::command::CommandId::INVALID;
        }
        let (tail_first, tail_last) = self.data.tail_range(element);
        if tail_first.is_valid() {
            self.commands.remove_range(tail_first, tail_last);
            self.data.tail_first[i] = crate::command::CommandId::INVALID;
            self.data.tail_last[i] = crate::command::CommandId::INVALID;
        }
    }

    /// Removes installed commands for an element and all its descendants.
    fn remove_subtree_commands(&mut self, store: &ElementStore, element: u32) {
        self.remove_element_commands(element);
        let mut child = store.first_child_at(element);
        while child != INVALID {
            self.remove_subtree_commands(store, child);
            child = store.next_sibling_at(child);
        }
    }
}

fn clip_method_for(clip: Option<ClipShape>) -> ClipMethod {
    match clip {
        None => ClipMethod::NotClipped,
        Some(_) => ClipMethod::Scissor,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use kurbo::{Affine, Rect};

    use accretion_core::element::{ElementFlags, ElementId};
    use accretion_core::style::{Color, RenderHints, Style};

    use crate::command::CommandKind;
    use crate::device::CpuDevice;

    use super::*;

    struct Fixture {
        store: ElementStore,
        chain: RenderChain<CpuDevice>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: ElementStore::new(),
                chain: RenderChain::new(CpuDevice::new()),
            }
        }

        fn boxed(&mut self, background: Color) -> ElementId {
            let id = self.store.create_element();
            self.store.set_layout(id, Rect::new(0.0, 0.0, 20.0, 10.0));
            self.store.set_style(
                id,
                Style {
                    background: Some(background),
                    ..Style::default()
                },
            );
            id
        }

        fn pump(&mut self) -> PassReport {
            let changes = self.store.evaluate();
            self.chain.process(&self.store, &changes)
        }

        fn command_elements(&self) -> Vec<u32> {
            let commands = self.chain.commands();
            commands.iter().map(|id| commands.element(id)).collect()
        }
    }

    #[test]
    fn first_pass_compiles_the_tree_into_commands() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let a = f.boxed(Color::BLACK);
        let b = f.boxed(Color::BLACK);
        f.store.add_child(root, a);
        f.store.add_child(root, b);

        let report = f.pump();

        assert_eq!(report.summary.processed, 3);
        assert_eq!(report.summary.deferred, 0);
        assert_eq!(
            f.command_elements(),
            [root.index(), a.index(), b.index()],
            "paint order follows the tree"
        );
        assert!(!report.damage.is_empty());
    }

    #[test]
    fn quiescent_pass_does_nothing() {
        let mut f = Fixture::new();
        let _root = f.boxed(Color::WHITE);
        let _ = f.pump();

        let report = f.pump();
        assert_eq!(report.summary.queued, 0);
        assert_eq!(report.summary.processed, 0);
        assert!(report.damage.is_empty());
        assert_eq!(f.chain.commands().len(), 1);
    }

    #[test]
    fn style_change_replaces_only_that_element() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let child = f.boxed(Color::BLACK);
        f.store.add_child(root, child);
        let _ = f.pump();

        let (child_head, _) = f.chain.render_data().head_range(child.index());

        f.store.set_style(
            root,
            Style {
                background: Some(Color::rgb(200, 0, 0)),
                ..Style::default()
            },
        );
        let report = f.pump();

        assert_eq!(report.summary.processed, 1);
        let (child_head_after, _) = f.chain.render_data().head_range(child.index());
        assert_eq!(child_head, child_head_after, "child commands survive");
        assert_eq!(f.command_elements(), [root.index(), child.index()]);
    }

    #[test]
    fn hidden_at_creation_defers_until_displayed() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let child = f.boxed(Color::BLACK);
        f.store.add_child(root, child);
        f.store.set_flags(root, ElementFlags { hidden: true });

        let report = f.pump();
        assert_eq!(report.summary.processed, 0);
        assert!(report.summary.deferred > 0);
        assert!(f.chain.commands().is_empty(), "hidden trees draw nothing");
        assert!(f.chain.render_data().pending_repaint(root.index()));
        assert!(f.chain.render_data().pending_hierarchical_repaint(child.index()));

        f.store.set_flags(root, ElementFlags { hidden: false });
        let report = f.pump();
        assert_eq!(report.summary.processed, 2);
        assert_eq!(f.command_elements(), [root.index(), child.index()]);
        assert!(!f.chain.render_data().pending_repaint(root.index()));
        assert!(!f.chain.render_data().pending_hierarchical_repaint(child.index()));
    }

    #[test]
    fn hiding_removes_commands_but_keeps_meshes() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let _ = f.pump();
        assert_eq!(f.chain.device().live_mesh_count(), 1);

        f.store.set_flags(root, ElementFlags { hidden: true });
        let _ = f.pump();

        assert!(f.chain.commands().is_empty());
        assert_eq!(
            f.chain.device().live_mesh_count(),
            1,
            "meshes are retained while hidden"
        );
    }

    #[test]
    fn opacity_change_takes_fast_path_and_updates_tables() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let _ = f.pump();

        let mesh = f.chain.render_data().head_mesh(root.index()).unwrap();
        let indices_before = f.chain.device().indices(mesh).to_vec();

        f.store.set_opacity(root, 0.25);
        let report = f.pump();

        assert_eq!(report.summary.fast_path, 1);
        assert_eq!(report.summary.processed, 0);
        assert_eq!(report.summary.entries, 0);

        let data = f.chain.render_data();
        let opacity_id = data.opacity_id(root.index());
        let expected = f.chain.device().opacity_color(opacity_id);
        for v in f.chain.device().vertices(mesh) {
            assert_eq!(v.opacity, expected);
        }
        assert_eq!(
            f.chain.device().indices(mesh),
            indices_before,
            "topology untouched"
        );
        let stored = f.chain.shader_info().opacity(opacity_id);
        assert!((stored - 0.25).abs() < 1e-6);
    }

    #[test]
    fn opacity_plus_style_change_regenerates() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let _ = f.pump();

        f.store.set_opacity(root, 0.5);
        f.store.set_style(
            root,
            Style {
                background: Some(Color::BLACK),
                ..Style::default()
            },
        );
        let report = f.pump();

        assert_eq!(report.summary.fast_path, 0, "mixed dirt regenerates");
        assert_eq!(report.summary.processed, 1);
    }

    #[test]
    fn translation_updates_table_without_repaint() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let _ = f.pump();

        f.store.set_transform(root, Affine::translate((5.0, 7.0)));
        let report = f.pump();

        assert_eq!(report.summary.processed, 0, "translation is table-only");
        let row = f
            .chain
            .shader_info()
            .transform(f.chain.render_data().transform_id(root.index()));
        assert_eq!(row[4], 5.0);
        assert_eq!(row[5], 7.0);
    }

    #[test]
    fn mirroring_transform_regenerates_the_subtree() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let child = f.boxed(Color::BLACK);
        f.store.add_child(root, child);
        let _ = f.pump();

        f.store
            .set_transform(root, Affine::scale_non_uniform(-1.0, 1.0));
        let report = f.pump();

        assert_eq!(report.summary.processed, 2, "flip regenerates the subtree");
        assert!(f.chain.render_data().winding_flipped(root.index()));
        assert!(f.chain.render_data().winding_flipped(child.index()));
    }

    #[test]
    fn destroy_releases_commands_meshes_and_rows() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let child = f.boxed(Color::BLACK);
        f.store.add_child(root, child);
        let _ = f.pump();
        assert_eq!(f.chain.device().live_mesh_count(), 2);

        f.store.remove_from_parent(child);
        f.store.destroy_element(child);
        let _ = f.pump();

        assert_eq!(f.command_elements(), [root.index()]);
        assert_eq!(f.chain.device().live_mesh_count(), 1);
        assert!(!f.chain.render_data().is_attached(child.index()));
    }

    #[test]
    fn reparent_relocates_commands_in_paint_order() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let a = f.boxed(Color::BLACK);
        let b = f.boxed(Color::BLACK);
        let moved = f.boxed(Color::rgb(9, 9, 9));
        f.store.add_child(root, a);
        f.store.add_child(root, b);
        f.store.add_child(a, moved);
        let _ = f.pump();
        assert_eq!(
            f.command_elements(),
            [root.index(), a.index(), moved.index(), b.index()]
        );

        f.store.reparent(moved, b);
        let _ = f.pump();
        assert_eq!(
            f.command_elements(),
            [root.index(), a.index(), b.index(), moved.index()],
            "moved subtree draws in its new position"
        );
    }

    #[test]
    fn text_element_generates_glyphs_through_jobs() {
        let mut f = Fixture::new();
        let label = f.store.create_element();
        f.store.set_layout(label, Rect::new(0.0, 0.0, 100.0, 20.0));
        f.store.set_render_hints(label, RenderHints::TEXT);
        f.store.set_text(label, Some("abc".to_string()));

        let report = f.pump();
        assert_eq!(report.summary.processed, 1);

        let mesh = f
            .chain
            .render_data()
            .head_mesh(label.index())
            .expect("glyph mesh installed");
        assert_eq!(
            f.chain.device().vertices(mesh).len(),
            12,
            "one quad per glyph"
        );
    }

    #[test]
    fn dynamic_color_palette_flows_into_vertices() {
        let mut f = Fixture::new();
        f.chain
            .builders_mut()
            .set_palette(alloc::vec![Color::rgb(1, 1, 1), Color::rgb(40, 50, 60)]);

        let tile = f.store.create_element();
        f.store.set_layout(tile, Rect::new(0.0, 0.0, 8.0, 8.0));
        f.store.set_render_hints(tile, RenderHints::DYNAMIC_COLOR);
        f.store.set_style(
            tile,
            Style {
                palette_row: Some(1),
                ..Style::default()
            },
        );

        let _ = f.pump();
        let mesh = f.chain.render_data().head_mesh(tile.index()).unwrap();
        assert_eq!(f.chain.device().vertices(mesh)[0].tint, [40, 50, 60, 255]);
    }

    #[test]
    fn clip_brackets_surround_descendants() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let child = f.boxed(Color::BLACK);
        f.store.add_child(root, child);
        f.store
            .set_clip(root, Some(ClipShape::Rect(Rect::new(0.0, 0.0, 5.0, 5.0))));
        let _ = f.pump();

        let commands = f.chain.commands();
        let kinds: Vec<_> = commands.iter().map(|id| commands.kind(id)).collect();
        assert!(matches!(kinds[0], CommandKind::PushScissor { .. }));
        assert!(matches!(kinds[1], CommandKind::Draw { .. })); // root background
        assert!(matches!(kinds[2], CommandKind::Draw { .. })); // child background
        assert!(matches!(kinds[3], CommandKind::PopScissor));
    }

    #[test]
    fn damage_covers_transformed_bounds() {
        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        f.store.set_transform(root, Affine::translate((100.0, 0.0)));

        let report = f.pump();
        let DamageRegion::Rects(rects) = &report.damage else {
            panic!("expected rect damage, got {:?}", report.damage);
        };
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0], [100.0, 0.0, 20.0, 10.0]);
    }

    #[test]
    fn executor_sees_the_paint_order() {
        use crate::device::MeshHandle;

        #[derive(Default)]
        struct Log(Vec<u32>);
        impl CommandExecutor for Log {
            fn draw(&mut self, element: u32, _mesh: MeshHandle) {
                self.0.push(element);
            }
            fn push_scissor(&mut self, _element: u32, _rect: Rect) {}
            fn pop_scissor(&mut self, _element: u32) {}
        }

        let mut f = Fixture::new();
        let root = f.boxed(Color::WHITE);
        let child = f.boxed(Color::BLACK);
        f.store.add_child(root, child);
        let _ = f.pump();

        let mut log = Log::default();
        f.chain.execute(&mut log);
        assert_eq!(log.0, [root.index(), child.index()]);
    }

    #[test]
    fn slot_reuse_after_destroy_reattaches_cleanly() {
        let mut f = Fixture::new();
        let a = f.boxed(Color::WHITE);
        let _ = f.pump();

        f.store.destroy_element(a);
        let b = f.boxed(Color::BLACK);
        assert_eq!(a.index(), b.index(), "slot is recycled");
        let report = f.pump();

        assert_eq!(report.summary.processed, 1);
        assert_eq!(f.command_elements(), [b.index()]);
        assert_eq!(f.chain.device().live_mesh_count(), 1);
    }
}
