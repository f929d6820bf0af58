#![forbid(unsafe_code)]

//! Styles applied by widgets when drawing.

use bitflags::bitflags;

use crate::cell::{Cell, Rgb};

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

/// A partial style: unset fields leave the cell unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
    /// Attributes OR-ed onto the cell.
    pub attrs: StyleFlags,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    /// Set the foreground color (builder).
    #[must_use]
    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color (builder).
    #[must_use]
    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Add attributes (builder).
    #[must_use]
    pub const fn attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }

    /// Add bold (builder).
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::BOLD);
        self
    }

    /// Add dim (builder).
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::DIM);
        self
    }

    /// Add reverse video (builder).
    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::REVERSE);
        self
    }

    /// Add strikethrough (builder).
    #[must_use]
    pub const fn strikethrough(mut self) -> Self {
        self.attrs = self.attrs.union(StyleFlags::STRIKETHROUGH);
        self
    }

    /// Whether the style changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Apply this style onto a cell, preserving its content.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = Some(fg);
        }
        if let Some(bg) = self.bg {
            cell.bg = Some(bg);
        }
        cell.attrs |= self.attrs;
    }
}
