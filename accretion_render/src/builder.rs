// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable element builders.
//!
//! The dirty walk is agnostic to how an element's geometry is produced: it
//! selects an [`ElementBuilder`] from the element's render hints and hands it
//! a [`MeshGenerationContext`]. Three builders cover the element categories:
//!
//! - [`DefaultBuilder`] — background quad, border ring, clip brackets.
//! - [`TextBuilder`] — the same box, plus glyph meshes generated by
//!   scheduled jobs rather than inline.
//! - [`DynamicColorBuilder`] — the same box with the background resolved
//!   from a palette at generation time.
//!
//! Selection goes through [`BuilderRegistry::select_mut`], a fixed dispatch
//! table rather than an open registry; the hot walk pays one match, not a
//! hash lookup.

use alloc::string::ToString;
use alloc::vec::Vec;

use kurbo::Point;

use accretion_core::element::ElementStore;
use accretion_core::style::{Color, RenderHints};

use crate::context::MeshGenerationContext;
use crate::job::{JobQueue, TextRequest};
use crate::mesh::{MeshData, MeshSlot};

/// Produces draw entries for one category of element.
///
/// `prepare` runs element-type-specific precomputation (text layout
/// settings, dynamic color resolution) before `build` emits entries.
/// Builders that defer mesh work to jobs accumulate requests during `build`
/// and hand them to the queue in `schedule_mesh_generation_jobs`, which the
/// chain calls once per pass after the walk completes.
pub trait ElementBuilder {
    /// Element-type-specific precomputation for `element`.
    fn prepare(&mut self, store: &ElementStore, element: u32) {
        _ = (store, element);
    }

    /// Emits the element's draw entries into the context.
    fn build(&mut self, store: &ElementStore, element: u32, ctx: &mut MeshGenerationContext<'_>);

    /// Moves accumulated deferred work into the pass's job queue.
    fn schedule_mesh_generation_jobs(&mut self, jobs: &mut JobQueue) {
        _ = jobs;
    }
}

/// Emits the standard box visuals shared by all builders: clip bracket,
/// background quad, caller content, border ring.
fn emit_element_box(
    store: &ElementStore,
    element: u32,
    ctx: &mut MeshGenerationContext<'_>,
    background: Option<Color>,
    content: impl FnOnce(&ElementStore, u32, &mut MeshGenerationContext<'_>),
) {
    let style = store.style_at(element);
    let layout = store.layout_at(element);
    let flipped = ctx.winding_flipped();
    let clip = store.clip_at(element);

    if let Some(shape) = clip {
        let world = store.world_transform_at(element);
        ctx.push_clip(world.transform_rect_bbox(shape.bounds()));
    }

    if let Some(bg) = background
        && !bg.is_transparent()
        && layout.width() > 0.0
        && layout.height() > 0.0
    {
        ctx.draw_mesh(MeshData::solid_quad(layout, bg, flipped));
    }

    content(store, element, ctx);

    let border = MeshData::border(layout, style.border_width, style.border_color, flipped);
    if !border.is_empty() || clip.is_some() {
        ctx.begin_tail();
        if !border.is_empty() {
            ctx.draw_mesh(border);
        }
        if clip.is_some() {
            ctx.pop_clip();
        }
    }
}

/// Builder for plain box elements.
#[derive(Debug, Default)]
pub struct DefaultBuilder;

impl ElementBuilder for DefaultBuilder {
    fn build(&mut self, store: &ElementStore, element: u32, ctx: &mut MeshGenerationContext<'_>) {
        let background = store.style_at(element).background;
        emit_element_box(store, element, ctx, background, |_, _, _| {});
    }
}

/// Text layout settings computed by [`TextBuilder::prepare`].
#[derive(Clone, Copy, Debug)]
struct TextSettings {
    origin: Point,
    font_size: f64,
    color: Color,
}

/// Builder for text elements.
///
/// Glyph meshes are not generated inline: `build` reserves a staging slot
/// per element and `schedule_mesh_generation_jobs` turns the accumulated
/// requests into jobs.
#[derive(Debug, Default)]
pub struct TextBuilder {
    settings: Option<TextSettings>,
    pending: Vec<(MeshSlot, TextRequest)>,
}

impl ElementBuilder for TextBuilder {
    fn prepare(&mut self, store: &ElementStore, element: u32) {
        let style = store.style_at(element);
        let layout = store.layout_at(element);
        self.settings = Some(TextSettings {
            origin: Point::new(layout.x0, layout.y0),
            font_size: style.font_size,
            color: style.text_color,
        });
    }

    fn build(&mut self, store: &ElementStore, element: u32, ctx: &mut MeshGenerationContext<'_>) {
        let settings = self
            .settings
            .take()
            .expect("prepare must run before build");
        let background = store.style_at(element).background;
        let pending = &mut self.pending;
        emit_element_box(store, element, ctx, background, |store, element, ctx| {
            let Some(text) = store.text_at(element) else {
                return;
            };
            if text.is_empty() {
                return;
            }
            let slot = ctx.draw_deferred();
            pending.push((
                slot,
                TextRequest {
                    text: text.to_string(),
                    origin: settings.origin,
                    font_size: settings.font_size,
                    color: settings.color,
                    flipped: ctx.winding_flipped(),
                },
            ));
        });
    }

    fn schedule_mesh_generation_jobs(&mut self, jobs: &mut JobQueue) {
        for (slot, request) in self.pending.drain(..) {
            jobs.push_text(slot, request);
        }
    }
}

/// Builder for elements whose background comes from the dynamic palette.
#[derive(Debug, Default)]
pub struct DynamicColorBuilder {
    palette: Vec<Color>,
    resolved: Option<Color>,
}

impl DynamicColorBuilder {
    /// Replaces the palette used for resolution.
    pub fn set_palette(&mut self, palette: Vec<Color>) {
        self.palette = palette;
    }
}

impl ElementBuilder for DynamicColorBuilder {
    fn prepare(&mut self, store: &ElementStore, element: u32) {
        let style = store.style_at(element);
        self.resolved = style
            .palette_row
            .and_then(|row| self.palette.get(row as usize).copied())
            .or(style.background);
    }

    fn build(&mut self, store: &ElementStore, element: u32, ctx: &mut MeshGenerationContext<'_>) {
        let background = self.resolved.take();
        emit_element_box(store, element, ctx, background, |_, _, _| {});
    }
}

/// Fixed dispatch table from render hints to builders.
#[derive(Debug, Default)]
pub struct BuilderRegistry {
    default_builder: DefaultBuilder,
    text: TextBuilder,
    dynamic_color: DynamicColorBuilder,
}

impl BuilderRegistry {
    /// Creates a registry with the three standard builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the builder for an element's render hints.
    ///
    /// Text takes precedence over dynamic color when both hints are set.
    pub fn select_mut(&mut self, hints: RenderHints) -> &mut dyn ElementBuilder {
        if hints.contains(RenderHints::TEXT) {
            &mut self.text
        } else if hints.contains(RenderHints::DYNAMIC_COLOR) {
            &mut self.dynamic_color
        } else {
            &mut self.default_builder
        }
    }

    /// Replaces the palette consumed by [`DynamicColorBuilder`].
    pub fn set_palette(&mut self, palette: Vec<Color>) {
        self.dynamic_color.set_palette(palette);
    }

    /// Lets every builder move its accumulated deferred work into the queue.
    pub fn schedule_all(&mut self, jobs: &mut JobQueue) {
        self.default_builder.schedule_mesh_generation_jobs(jobs);
        self.text.schedule_mesh_generation_jobs(jobs);
        self.dynamic_color.schedule_mesh_generation_jobs(jobs);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use kurbo::Rect;

    use accretion_core::element::{ClipShape, ElementStore};
    use accretion_core::style::Style;

    use crate::entry::{EntryArena, EntryKind};
    use crate::mesh::MeshStaging;

    use super::*;

    fn styled_store(style: Style) -> (ElementStore, u32) {
        let mut store = ElementStore::new();
        let id = store.create_element();
        store.set_layout(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        store.set_style(id, style);
        let _ = store.evaluate();
        (store, id.index())
    }

    fn collect_kinds(entries: &EntryArena, root: crate::entry::EntryId) -> Vec<EntryKind> {
        let mut kinds = Vec::new();
        let mut e = entries.next(root);
        while e.is_valid() {
            kinds.push(entries.kind(e));
            e = entries.next(e);
        }
        kinds
    }

    #[test]
    fn default_builder_emits_background_and_border() {
        let (store, idx) = styled_store(Style {
            background: Some(Color::WHITE),
            border_width: 2.0,
            ..Style::default()
        });

        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);
        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, idx, root, false);
        DefaultBuilder.build(&store, idx, &mut ctx);
        let _ = ctx.finish();

        let kinds = collect_kinds(&entries, root);
        assert!(matches!(kinds[0], EntryKind::DrawMesh { .. }), "background");
        assert!(matches!(kinds[1], EntryKind::ChildrenMarker));
        assert!(matches!(kinds[2], EntryKind::DrawMesh { .. }), "border");
    }

    #[test]
    fn default_builder_emits_clip_brackets() {
        let (mut store, idx) = styled_store(Style::default());
        let id = store.roots()[0];
        store.set_clip(id, Some(ClipShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0))));
        let _ = store.evaluate();

        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);
        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, idx, root, false);
        DefaultBuilder.build(&store, idx, &mut ctx);
        let _ = ctx.finish();

        let kinds = collect_kinds(&entries, root);
        assert!(matches!(kinds[0], EntryKind::PushClip { .. }));
        assert!(matches!(kinds[1], EntryKind::ChildrenMarker));
        assert!(matches!(kinds[2], EntryKind::PopClip));
    }

    #[test]
    fn invisible_element_emits_nothing() {
        let (store, idx) = styled_store(Style::default());

        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);
        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, idx, root, false);
        DefaultBuilder.build(&store, idx, &mut ctx);
        assert_eq!(ctx.finish(), 0);
    }

    #[test]
    fn text_builder_defers_glyph_meshes() {
        let (mut store, idx) = styled_store(Style::default());
        let id = store.roots()[0];
        store.set_text(id, Some("hi".to_string()));
        let _ = store.evaluate();

        let mut builder = TextBuilder::default();
        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);

        builder.prepare(&store, idx);
        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, idx, root, false);
        builder.build(&store, idx, &mut ctx);
        let _ = ctx.finish();

        // The entry exists, but its staged slot is still empty.
        let kinds = collect_kinds(&entries, root);
        assert!(matches!(kinds[0], EntryKind::DrawMesh { .. }));

        let mut jobs = JobQueue::new();
        builder.schedule_mesh_generation_jobs(&mut jobs);
        assert_eq!(jobs.len(), 1);

        let mut device = crate::device::CpuDevice::new();
        jobs.execute();
        jobs.apply(&mut staging, &mut device);
        let EntryKind::DrawMesh { slot } = kinds[0] else {
            unreachable!()
        };
        assert_eq!(staging.take(slot).vertices.len(), 8);
    }

    #[test]
    fn dynamic_color_resolves_from_palette() {
        let (store, idx) = styled_store(Style {
            palette_row: Some(1),
            ..Style::default()
        });

        let mut builder = DynamicColorBuilder::default();
        builder.set_palette(vec![Color::BLACK, Color::rgb(10, 20, 30)]);

        let mut entries = EntryArena::new();
        let mut staging = MeshStaging::new();
        let root = entries.alloc(EntryKind::Root);
        builder.prepare(&store, idx);
        let mut ctx = MeshGenerationContext::begin(&mut entries, &mut staging, idx, root, false);
        builder.build(&store, idx, &mut ctx);
        let _ = ctx.finish();

        let kinds = collect_kinds(&entries, root);
        let EntryKind::DrawMesh { slot } = kinds[0] else {
            panic!("expected a background draw");
        };
        let mesh = staging.take(slot);
        assert_eq!(mesh.vertices[0].tint, [10, 20, 30, 255]);
    }

    #[test]
    fn registry_selects_by_hints() {
        let mut registry = BuilderRegistry::new();
        // Just exercise the dispatch paths; the concrete types are not
        // observable through the trait object.
        let _ = registry.select_mut(RenderHints::NONE);
        let _ = registry.select_mut(RenderHints::TEXT);
        let _ = registry.select_mut(RenderHints::DYNAMIC_COLOR);
        let _ = registry.select_mut(RenderHints::TEXT.union(RenderHints::DYNAMIC_COLOR));
    }
}
