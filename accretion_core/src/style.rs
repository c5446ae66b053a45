// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint properties and render hints.

use core::fmt;

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Creates a color from channel values.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from channel values.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Returns the channels as an `[r, g, b, a]` array.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns whether the color contributes no visible paint.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Paint properties of an element.
///
/// All fields are local to the element; inherited effects (ancestor opacity,
/// hidden state) are computed by evaluation, not stored here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Background fill, drawn before the element's children.
    pub background: Option<Color>,
    /// Border stroke, drawn after the element's children.
    pub border_color: Color,
    /// Border width in local units. Zero disables the border.
    pub border_width: f64,
    /// Text fill color.
    pub text_color: Color,
    /// Font size in local units.
    pub font_size: f64,
    /// Row in the dynamic palette, for elements with
    /// [`RenderHints::DYNAMIC_COLOR`].
    pub palette_row: Option<u32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: None,
            border_color: Color::BLACK,
            border_width: 0.0,
            text_color: Color::BLACK,
            font_size: 16.0,
            palette_row: None,
        }
    }
}

/// Hints selecting which element builder generates an element's visuals.
///
/// Hints are a bit set; an element with no hints uses the default builder.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenderHints(u32);

impl RenderHints {
    /// No hints — the default builder applies.
    pub const NONE: Self = Self(0);
    /// The element renders text; glyph meshes are generated by jobs.
    pub const TEXT: Self = Self(1 << 0);
    /// The element's background color is resolved from the dynamic palette
    /// at generation time.
    pub const DYNAMIC_COLOR: Self = Self(1 << 1);

    /// Returns whether all bits of `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two hint sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl fmt::Debug for RenderHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHints")
            .field("text", &self.contains(Self::TEXT))
            .field("dynamic_color", &self.contains(Self::DYNAMIC_COLOR))
            .finish()
    }
}
