// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visual-changes processor: dirty walk and entry-to-command conversion.
//!
//! Processing one pass has two halves. The *walk*
//! ([`process_on_visuals_changed`](VisualChangesProcessor::process_on_visuals_changed))
//! visits each repaint-queued element depth-first, generates its entries
//! through the selected builder, and records a `Head` marker before and a
//! `Tail` marker after the element's subtree in an ordered worklist. The
//! *conversion*
//! ([`convert_entries_to_commands`](VisualChangesProcessor::convert_entries_to_commands))
//! drains that worklist with a stack-discipline depth counter, turning each
//! element's entry chain into head/tail command ranges and splicing them
//! into the global paint-order list in place of the element's previous
//! ranges.
//!
//! The split exists because conversion reuses one [`EntryProcessor`] per
//! depth level: a depth's processor must not be re-entered until its tail is
//! reached, and deferring conversion until the walk finishes bounds the
//! working set to the tree depth rather than the tree size.
//!
//! Elements are stamped with the pass's dirty token on first visit, making
//! the walk idempotent within a pass: revisiting an element (siblings
//! sharing a dirty ancestor, duplicate queue entries) is a no-op.

use alloc::vec::Vec;

use accretion_core::element::{ElementStore, INVALID};
#[cfg(feature = "trace-rich")]
use accretion_core::trace::{CommandsReplacedEvent, ElementProcessedEvent};
use accretion_core::trace::Tracer;

use crate::builder::BuilderRegistry;
use crate::command::{CommandArena, CommandId, CommandKind};
use crate::context::MeshGenerationContext;
use crate::device::MeshDevice;
use crate::entry::{EntryArena, EntryId, EntryKind};
use crate::mesh::{MeshData, MeshStaging};
use crate::opacity;
use crate::render_data::{ClipMethod, DirtyValues, RenderDataStore};
use crate::job::JobQueue;

/// Whether a worklist record marks the start or the end of an element's
/// subtree processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingKind {
    /// The element's pre-descendant instructions.
    Head,
    /// The element's post-descendant instructions.
    Tail,
}

/// One record of the conversion worklist.
///
/// Transient: valid only between the walk that produced it and the
/// conversion call that drains it.
#[derive(Clone, Copy, Debug)]
pub struct EntryProcessingInfo {
    /// Head or tail marker.
    pub kind: ProcessingKind,
    /// Raw slot index of the element.
    pub element: u32,
    /// The element's root entry.
    pub root: EntryId,
}

/// Converts one element's entry chain into command ranges.
///
/// Processors are pooled per depth level and reused across passes;
/// [`clear_references`](Self::clear_references) drops every element, entry,
/// and mesh reference after each pass so the pool never pins pass data.
#[derive(Debug)]
pub struct EntryProcessor {
    element: u32,
    root: EntryId,
    cursor: EntryId,
    first_head: CommandId,
    last_head: CommandId,
    first_tail: CommandId,
    last_tail: CommandId,
    head_count: u32,
    tail_count: u32,
    old_head_mesh: Option<crate::device::MeshHandle>,
    old_tail_mesh: Option<crate::device::MeshHandle>,
    old_extras: Vec<crate::device::MeshHandle>,
    extra_cursor: usize,
    head_mesh_bound: bool,
    tail_mesh_bound: bool,
}

impl EntryProcessor {
    fn new() -> Self {
        Self {
            element: INVALID,
            root: EntryId::INVALID,
            cursor: EntryId::INVALID,
            first_head: CommandId::INVALID,
            last_head: CommandId::INVALID,
            first_tail: CommandId::INVALID,
            last_tail: CommandId::INVALID,
            head_count: 0,
            tail_count: 0,
            old_head_mesh: None,
            old_tail_mesh: None,
            old_extras: Vec::new(),
            extra_cursor: 0,
            head_mesh_bound: false,
            tail_mesh_bound: false,
        }
    }

    /// Initializes the processor for one element, taking ownership of the
    /// element's previous meshes so conversion can reuse or release them.
    fn begin(&mut self, element: u32, root: EntryId, data: &mut RenderDataStore) {
        let el = element as usize;
        self.element = element;
        self.root = root;
        self.cursor = EntryId::INVALID;
        self.first_head = CommandId::INVALID;
        self.last_head = CommandId::INVALID;
        self.first_tail = CommandId::INVALID;
        self.last_tail = CommandId::INVALID;
        self.head_count = 0;
        self.tail_count = 0;
        self.old_head_mesh = data.head_mesh[el].take();
        self.old_tail_mesh = data.tail_mesh[el].take();
        self.old_extras.clear();
        self.old_extras.append(&mut data.extra_meshes[el]);
        self.extra_cursor = 0;
        self.head_mesh_bound = false;
        self.tail_mesh_bound = false;
    }

    /// The element currently being converted.
    #[must_use]
    pub fn element(&self) -> u32 {
        self.element
    }

    /// The new head command range (both invalid when empty).
    #[must_use]
    pub fn head_range(&self) -> (CommandId, CommandId) {
        (self.first_head, self.last_head)
    }

    /// The new tail command range (both invalid when empty).
    #[must_use]
    pub fn tail_range(&self) -> (CommandId, CommandId) {
        (self.first_tail, self.last_tail)
    }

    /// Commands built into the head and tail ranges.
    #[must_use]
    pub fn command_counts(&self) -> (u32, u32) {
        (self.head_count, self.tail_count)
    }

    /// Converts entries up to the children marker (or the chain's end).
    fn process_head(
        &mut self,
        entries: &EntryArena,
        staging: &mut MeshStaging,
        device: &mut dyn MeshDevice,
        data: &mut RenderDataStore,
        commands: &mut CommandArena,
    ) {
        let mut e = entries.next(self.root);
        while e.is_valid() {
            let kind = entries.kind(e);
            if matches!(kind, EntryKind::ChildrenMarker) {
                self.cursor = entries.next(e);
                return;
            }
            self.convert_entry(kind, ProcessingKind::Head, staging, device, data, commands);
            e = entries.next(e);
        }
        self.cursor = EntryId::INVALID;
    }

    /// Converts entries after the children marker.
    fn process_tail(
        &mut self,
        entries: &EntryArena,
        staging: &mut MeshStaging,
        device: &mut dyn MeshDevice,
        data: &mut RenderDataStore,
        commands: &mut CommandArena,
    ) {
        let mut e = self.cursor;
        while e.is_valid() {
            let kind = entries.kind(e);
            self.convert_entry(kind, ProcessingKind::Tail, staging, device, data, commands);
            e = entries.next(e);
        }
    }

    fn convert_entry(
        &mut self,
        kind: EntryKind,
        phase: ProcessingKind,
        staging: &mut MeshStaging,
        device: &mut dyn MeshDevice,
        data: &mut RenderDataStore,
        commands: &mut CommandArena,
    ) {
        match kind {
            EntryKind::Root | EntryKind::ChildrenMarker => {}
            EntryKind::DrawMesh { slot } => {
                let mesh = staging.take(slot);
                if mesh.is_empty() {
                    // A deferred generation produced no geometry (e.g. text
                    // that was all whitespace).
                    return;
                }
                let handle = self.bind_mesh(phase, mesh, device, data);
                self.push_command(CommandKind::Draw { mesh: handle }, phase, commands);
            }
            EntryKind::PushClip { rect } => {
                self.push_command(CommandKind::PushScissor { rect }, phase, commands);
            }
            EntryKind::PopClip => {
                self.push_command(CommandKind::PopScissor, phase, commands);
            }
        }
    }

    /// Uploads mesh data, reusing the element's previous allocation when the
    /// sizes match, and records the handle in the element's render data.
    fn bind_mesh(
        &mut self,
        phase: ProcessingKind,
        mut mesh: MeshData,
        device: &mut dyn MeshDevice,
        data: &mut RenderDataStore,
    ) -> crate::device::MeshHandle {
        let el = self.element as usize;

        // Stamp the opacity payload before upload so freshly generated
        // vertices carry the element's current allocation.
        let color = device.opacity_color(data.opacity_id[el]);
        for v in &mut mesh.vertices {
            v.opacity = color;
        }

        let old = match phase {
            ProcessingKind::Head if !self.head_mesh_bound => self.old_head_mesh.take(),
            ProcessingKind::Tail if !self.tail_mesh_bound => self.old_tail_mesh.take(),
            _ => {
                if self.extra_cursor < self.old_extras.len() {
                    let h = self.old_extras[self.extra_cursor];
                    self.extra_cursor += 1;
                    Some(h)
                } else {
                    None
                }
            }
        };

        let handle = match old {
            Some(h)
                if device.vertices(h).len() == mesh.vertices.len()
                    && device.indices(h).len() == mesh.indices.len() =>
            {
                device.update(h, &mesh.vertices, &mesh.indices);
                h
            }
            Some(h) => {
                device.free(h);
                device.allocate(&mesh.vertices, &mesh.indices)
            }
            None => device.allocate(&mesh.vertices, &mesh.indices),
        };

        match phase {
            ProcessingKind::Head if !self.head_mesh_bound => {
                self.head_mesh_bound = true;
                data.head_mesh[el] = Some(handle);
            }
            ProcessingKind::Tail if !self.tail_mesh_bound => {
                self.tail_mesh_bound = true;
                data.tail_mesh[el] = Some(handle);
            }
            _ => data.extra_meshes[el].push(handle),
        }
        handle
    }

    fn push_command(
        &mut self,
        kind: CommandKind,
        phase: ProcessingKind,
        commands: &mut CommandArena,
    ) {
        let id = commands.alloc(kind, self.element);
        match phase {
            ProcessingKind::Head => {
                if self.first_head.is_valid() {
                    commands.link(self.last_head, id);
                } else {
                    self.first_head = id;
                }
                self.last_head = id;
                self.head_count += 1;
            }
            ProcessingKind::Tail => {
                if self.first_tail.is_valid() {
                    commands.link(self.last_tail, id);
                } else {
                    self.first_tail = id;
                }
                self.last_tail = id;
                self.tail_count += 1;
            }
        }
    }

    /// Frees previous meshes that conversion did not reuse.
    fn release_stale_meshes(&mut self, device: &mut dyn MeshDevice) {
        if let Some(h) = self.old_head_mesh.take() {
            device.free(h);
        }
        if let Some(h) = self.old_tail_mesh.take() {
            device.free(h);
        }
        for h in self.old_extras.drain(self.extra_cursor..) {
            device.free(h);
        }
        self.old_extras.clear();
        self.extra_cursor = 0;
    }

    /// Drops every element, entry, command, and mesh reference.
    ///
    /// The pool retains processors across passes; this keeps them from
    /// pinning pass data.
    pub fn clear_references(&mut self) {
        self.element = INVALID;
        self.root = EntryId::INVALID;
        self.cursor = EntryId::INVALID;
        self.first_head = CommandId::INVALID;
        self.last_head = CommandId::INVALID;
        self.first_tail = CommandId::INVALID;
        self.last_tail = CommandId::INVALID;
        self.head_count = 0;
        self.tail_count = 0;
        self.old_head_mesh = None;
        self.old_tail_mesh = None;
        self.old_extras.clear();
        self.extra_cursor = 0;
        self.head_mesh_bound = false;
        self.tail_mesh_bound = false;
    }

    /// Returns whether the processor still references pass data.
    #[must_use]
    pub fn has_references(&self) -> bool {
        self.element != INVALID
            || self.root.is_valid()
            || self.cursor.is_valid()
            || self.first_head.is_valid()
            || self.first_tail.is_valid()
            || self.old_head_mesh.is_some()
            || self.old_tail_mesh.is_some()
            || !self.old_extras.is_empty()
    }
}

/// Counters accumulated over one pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassStats {
    /// Elements whose visuals were regenerated.
    pub processed: u32,
    /// Elements deferred because an ancestor is hidden.
    pub deferred: u32,
    /// Elements updated via the opacity fast path.
    pub fast_path: u32,
    /// Entries generated.
    pub entries: u32,
    /// Commands installed.
    pub commands: u32,
}

/// Walks dirty elements, generates entries, and converts them to commands.
///
/// All pooled state (entry arena, staging, worklist, per-depth processors)
/// is owned here and explicitly reset per pass — nothing is global.
#[derive(Debug)]
pub struct VisualChangesProcessor {
    dirty_id: u32,
    worklist: Vec<EntryProcessingInfo>,
    processors: Vec<EntryProcessor>,
    entries: EntryArena,
    staging: MeshStaging,
    jobs: JobQueue,
    touched: Vec<u32>,
    stats: PassStats,
}

impl Default for VisualChangesProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualChangesProcessor {
    /// Creates a processor with empty pools.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty_id: 0,
            worklist: Vec::new(),
            processors: Vec::new(),
            entries: EntryArena::new(),
            staging: MeshStaging::new(),
            jobs: JobQueue::new(),
            touched: Vec::new(),
            stats: PassStats::default(),
        }
    }

    /// Starts a new pass: resets pooled buffers and advances the dirty
    /// token. Returns the new token.
    pub fn begin_pass(&mut self) -> u32 {
        self.worklist.clear();
        self.entries.reset();
        self.staging.reset();
        self.touched.clear();
        self.stats = PassStats::default();
        self.dirty_id = self.dirty_id.wrapping_add(1);
        if self.dirty_id == 0 {
            // Zero is the stamp of never-processed elements.
            self.dirty_id = 1;
        }
        self.dirty_id
    }

    /// The current pass's dirty token.
    #[must_use]
    pub fn dirty_token(&self) -> u32 {
        self.dirty_id
    }

    /// Counters for the current pass so far.
    #[must_use]
    pub fn stats(&self) -> PassStats {
        self.stats
    }

    /// Elements the walk touched this pass (regenerated or fast-pathed).
    #[must_use]
    pub fn touched(&self) -> &[u32] {
        &self.touched
    }

    /// The pending conversion worklist (drained by conversion).
    #[must_use]
    pub fn worklist(&self) -> &[EntryProcessingInfo] {
        &self.worklist
    }

    /// Number of depth levels the processor pool has grown to.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.processors.len()
    }

    /// Returns whether the pooled processor at `depth` still references pass
    /// data.
    #[must_use]
    pub fn processor_has_references(&self, depth: usize) -> bool {
        self.processors[depth].has_references()
    }

    /// The pass's job queue, for builders to schedule into.
    pub fn jobs_mut(&mut self) -> &mut JobQueue {
        &mut self.jobs
    }

    /// Runs and commits all scheduled jobs.
    ///
    /// This is the join point: when it returns, every deferred mesh is
    /// staged and every opacity rewrite is committed, so conversion can
    /// safely read geometry.
    pub fn run_jobs(&mut self, device: &mut dyn MeshDevice) {
        self.jobs.execute();
        self.jobs.apply(&mut self.staging, device);
    }

    /// Processes one repaint-queued element.
    ///
    /// The element is walked hierarchically when the caller says so, when
    /// its dirtied values demand it, or when a deferred hierarchical repaint
    /// is pending.
    pub fn process_on_visuals_changed(
        &mut self,
        store: &ElementStore,
        data: &mut RenderDataStore,
        builders: &mut BuilderRegistry,
        device: &dyn MeshDevice,
        element: u32,
        hierarchical: bool,
        tracer: &mut Tracer<'_>,
    ) {
        let el = element as usize;
        let hierarchical = hierarchical
            || data.dirtied[el].contains(DirtyValues::VISUALS_HIERARCHY)
            || data.pending_hierarchical_repaint[el];
        self.depth_first_on_visuals_changed(
            store,
            data,
            builders,
            device,
            element,
            hierarchical,
            tracer,
        );
    }

    fn depth_first_on_visuals_changed(
        &mut self,
        store: &ElementStore,
        data: &mut RenderDataStore,
        builders: &mut BuilderRegistry,
        device: &dyn MeshDevice,
        element: u32,
        hierarchical: bool,
        tracer: &mut Tracer<'_>,
    ) {
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = &tracer;
        }
        let el = element as usize;
        debug_assert!(data.attached[el], "walk reached a detached element");

        // Idempotence within the pass: the token stamp makes revisits no-ops.
        if data.dirty_id[el] == self.dirty_id {
            return;
        }
        data.dirty_id[el] = self.dirty_id;

        if store.effective_hidden_at(element) {
            // Undisplayed subtrees are never regenerated; remember the work
            // for when the subtree is displayed again.
            if hierarchical {
                data.pending_hierarchical_repaint[el] = true;
            } else {
                data.pending_repaint[el] = true;
            }
            self.stats.deferred += 1;
            return;
        }

        // Clear the pending flags only now that processing actually begins.
        data.pending_repaint[el] = false;
        if hierarchical {
            data.pending_hierarchical_repaint[el] = false;
        }

        let dirtied = data.dirtied[el];
        data.dirtied[el] = DirtyValues::NONE;

        if !hierarchical && dirtied.is_only(DirtyValues::OPACITY_ID) {
            // Opacity-only change: geometry is untouched, rewrite the vertex
            // payload in place.
            opacity::update_opacity_id(data, device, &mut self.jobs, element);
            self.touched.push(element);
            self.stats.fast_path += 1;
            #[cfg(feature = "trace-rich")]
            tracer.element_processed(&ElementProcessedEvent {
                element,
                hierarchical,
                fast_path: true,
                entries: 0,
            });
            return;
        }

        // Winding must be settled before mesh generation; it decides
        // triangle order.
        let parent = store.parent_at(element);
        let parent_flipped = parent != INVALID && data.winding_flipped[parent as usize];
        let local_flips = store.local_transform_at(element).determinant() < 0.0;
        data.winding_flipped[el] = parent_flipped ^ local_flips;

        assert!(
            data.clip_method[el] != ClipMethod::Undetermined,
            "clip method undetermined for element {element}"
        );
        assert!(
            data.transform_id[el].is_valid(),
            "transform row unallocated for element {element}"
        );

        let builder = builders.select_mut(store.render_hints_at(element));
        builder.prepare(store, element);

        let root = self.entries.alloc(EntryKind::Root);
        let mut ctx = MeshGenerationContext::begin(
            &mut self.entries,
            &mut self.staging,
            element,
            root,
            data.winding_flipped[el],
        );
        builder.build(store, element, &mut ctx);
        let emitted = ctx.finish();

        self.stats.processed += 1;
        self.stats.entries += emitted;
        self.touched.push(element);

        #[cfg(feature = "trace-rich")]
        tracer.element_processed(&ElementProcessedEvent {
            element,
            hierarchical,
            fast_path: false,
            entries: emitted,
        });

        self.worklist.push(EntryProcessingInfo {
            kind: ProcessingKind::Head,
            element,
            root,
        });
        if hierarchical {
            let mut child = store.first_child_at(element);
            while child != INVALID {
                self.depth_first_on_visuals_changed(
                    store, data, builders, device, child, true, tracer,
                );
                child = store.next_sibling_at(child);
            }
        }
        self.worklist.push(EntryProcessingInfo {
            kind: ProcessingKind::Tail,
            element,
            root,
        });
    }

    /// Drains the worklist, building and installing command ranges.
    ///
    /// Head markers push onto the depth stack, tail markers pop; the depth's
    /// pooled processor converts the element's head entries on push and its
    /// tail entries on pop, and the element's installed ranges are then
    /// replaced in one step. The pool grows to the deepest subtree ever seen
    /// and is retained across passes.
    pub fn convert_entries_to_commands(
        &mut self,
        store: &ElementStore,
        data: &mut RenderDataStore,
        device: &mut dyn MeshDevice,
        commands: &mut CommandArena,
        tracer: &mut Tracer<'_>,
    ) {
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = &tracer;
        }
        let mut worklist = core::mem::take(&mut self.worklist);
        let mut depth = 0usize;
        for info in &worklist {
            match info.kind {
                ProcessingKind::Head => {
                    if depth == self.processors.len() {
                        self.processors.push(EntryProcessor::new());
                    }
                    let processor = &mut self.processors[depth];
                    processor.begin(info.element, info.root, data);
                    processor.process_head(&self.entries, &mut self.staging, device, data, commands);
                    depth += 1;
                }
                ProcessingKind::Tail => {
                    assert!(depth > 0, "tail marker without matching head");
                    depth -= 1;
                    let processor = &mut self.processors[depth];
                    debug_assert_eq!(
                        processor.element(),
                        info.element,
                        "head/tail pairing is positional"
                    );
                    processor.process_tail(&self.entries, &mut self.staging, device, data, commands);
                    processor.release_stale_meshes(device);
                    let (head_count, tail_count) = processor.command_counts();
                    let head_range = processor.head_range();
                    let tail_range = processor.tail_range();
                    replace_commands(store, data, commands, info.element, head_range, tail_range);
                    self.stats.commands += head_count + tail_count;
                    #[cfg(feature = "trace-rich")]
                    tracer.commands_replaced(&CommandsReplacedEvent {
                        element: info.element,
                        head_commands: head_count,
                        tail_commands: tail_count,
                    });
                }
            }
        }
        assert_eq!(depth, 0, "unbalanced head/tail worklist");

        worklist.clear();
        self.worklist = worklist;
        for processor in &mut self.processors {
            processor.clear_references();
        }
        self.entries.reset();
        self.staging.reset();
    }
}

/// Replaces an element's installed command ranges with newly built ones.
///
/// Each range is spliced exactly where the old one sat; an element with no
/// previous commands gets a paint-order insertion point computed from its
/// siblings and ancestors. The swap happens within one call, so a reader
/// walking the list between passes never sees a partial chain.
pub(crate) fn replace_commands(
    store: &ElementStore,
    data: &mut RenderDataStore,
    commands: &mut CommandArena,
    element: u32,
    new_head: (CommandId, CommandId),
    new_tail: (CommandId, CommandId),
) {
    let el = element as usize;

    // Head range.
    let old_first = data.head_first[el];
    if old_first.is_valid() {
        let prev = commands.prev(old_first);
        commands.remove_range(old_first, data.head_last[el]);
        if new_head.0.is_valid() {
            commands.splice_after(prev, new_head.0, new_head.1);
        }
    } else if new_head.0.is_valid() {
        let prev = find_insertion_prev(store, data, element);
        commands.splice_after(prev, new_head.0, new_head.1);
    }
    data.head_first[el] = new_head.0;
    data.head_last[el] = new_head.1;

    // Tail range.
    let old_first = data.tail_first[el];
    if old_first.is_valid() {
        let prev = commands.prev(old_first);
        commands.remove_range(old_first, data.tail_last[el]);
        if new_tail.0.is_valid() {
            commands.splice_after(prev, new_tail.0, new_tail.1);
        }
    } else if new_tail.0.is_valid() {
        let prev = tail_insertion_prev(store, data, element);
        commands.splice_after(prev, new_tail.0, new_tail.1);
    }
    data.tail_first[el] = new_tail.0;
    data.tail_last[el] = new_tail.1;
}

/// The last installed command of `idx`'s subtree, in paint order.
fn last_command_of_subtree(store: &ElementStore, data: &RenderDataStore, idx: u32) -> CommandId {
    if data.tail_last[idx as usize].is_valid() {
        return data.tail_last[idx as usize];
    }
    let last = last_command_of_children(store, data, idx);
    if last.is_valid() {
        return last;
    }
    data.head_last[idx as usize]
}

/// The last installed command among `idx`'s children, in paint order.
fn last_command_of_children(store: &ElementStore, data: &RenderDataStore, idx: u32) -> CommandId {
    let mut best = CommandId::INVALID;
    let mut child = store.first_child_at(idx);
    while child != INVALID {
        let c = last_command_of_subtree(store, data, child);
        if c.is_valid() {
            best = c;
        }
        child = store.next_sibling_at(child);
    }
    best
}

/// The command a fresh head range for `idx` must be inserted after, or
/// invalid for the front of the list.
fn find_insertion_prev(store: &ElementStore, data: &RenderDataStore, idx: u32) -> CommandId {
    let mut e = idx;
    loop {
        // Nearest preceding sibling subtree with commands wins.
        let mut s = store.prev_sibling_at(e);
        while s != INVALID {
            let c = last_command_of_subtree(store, data, s);
            if c.is_valid() {
                return c;
            }
            s = store.prev_sibling_at(s);
        }
        let p = store.parent_at(e);
        if p == INVALID {
            return CommandId::INVALID;
        }
        if data.head_last[p as usize].is_valid() {
            return data.head_last[p as usize];
        }
        e = p;
    }
}

/// The command a fresh tail range for `idx` must be inserted after.
///
/// Called after the element's new head range is installed, so falling back
/// to the element's own head is safe.
fn tail_insertion_prev(store: &ElementStore, data: &RenderDataStore, idx: u32) -> CommandId {
    let last = last_command_of_children(store, data, idx);
    if last.is_valid() {
        return last;
    }
    if data.head_last[idx as usize].is_valid() {
        return data.head_last[idx as usize];
    }
    find_insertion_prev(store, data, idx)
}
