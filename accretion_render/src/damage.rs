// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use kurbo::Rect;

/// A region of the output that needs re-rendering.
///
/// Renderers can use this to minimize GPU work by only redrawing areas that
/// changed since the last pass.
#[derive(Clone, Debug, Default)]
pub enum DamageRegion {
    /// The entire output needs redrawing.
    Full,
    /// A list of axis-aligned rectangles that need redrawing.
    ///
    /// Each rectangle is `[x, y, width, height]` in output-space pixels.
    Rects(Vec<[f32; 4]>),
    /// Nothing changed; the previous frame can be reused.
    #[default]
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Adds a world-space rect to the damaged area.
    pub fn add_rect(&mut self, rect: Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let entry = [
            rect.x0 as f32,
            rect.y0 as f32,
            rect.width() as f32,
            rect.height() as f32,
        ];
        match self {
            Self::Full => {}
            Self::Rects(rects) => rects.push(entry),
            Self::None => *self = Self::Rects(alloc::vec![entry]),
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}
