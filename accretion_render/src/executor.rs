// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-list consumption contract.
//!
//! Downstream renderers do not walk the element tree; they walk the chain's
//! installed command list in paint order and implement [`CommandExecutor`].
//! Both GPU-backed renderers and test doubles implement this trait, enabling
//! generic draw loops.

use kurbo::Rect;

use crate::command::{CommandArena, CommandKind};
use crate::device::MeshHandle;

/// Executes draw commands in paint order.
///
/// All methods receive the owning element's raw slot index, which renderers
/// can use for per-element state lookups (transform and opacity rows).
pub trait CommandExecutor {
    /// Draw an allocated mesh.
    fn draw(&mut self, element: u32, mesh: MeshHandle);

    /// Begin scissoring to a world-space rect.
    fn push_scissor(&mut self, element: u32, rect: Rect);

    /// End the innermost scissor.
    fn pop_scissor(&mut self, element: u32);
}

/// Walks the global command list, dispatching each command to `executor`.
pub fn execute(commands: &CommandArena, executor: &mut dyn CommandExecutor) {
    for id in commands.iter() {
        let element = commands.element(id);
        match commands.kind(id) {
            CommandKind::Draw { mesh } => executor.draw(element, mesh),
            CommandKind::PushScissor { rect } => executor.push_scissor(element, rect),
            CommandKind::PopScissor => executor.pop_scissor(element),
        }
    }
}
