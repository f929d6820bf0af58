#![forbid(unsafe_code)]

//! Terminal cells and colors.

use crate::style::StyleFlags;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What a cell displays.
///
/// Wide characters occupy their natural display width: the leading cell
/// carries the character, subsequent cells are `Continuation` and are skipped
/// when the buffer is presented or captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Nothing written yet; presents as a space.
    #[default]
    Empty,
    /// A single character.
    Char(char),
    /// Trailing cell of a wide character.
    Continuation,
}

impl CellContent {
    /// The displayed character, if any.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// A single terminal cell: content plus styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Displayed content.
    pub content: CellContent,
    /// Foreground color (`None` = terminal default).
    pub fg: Option<Rgb>,
    /// Background color (`None` = terminal default).
    pub bg: Option<Rgb>,
    /// Text attributes.
    pub attrs: StyleFlags,
}

impl Cell {
    /// Continuation cell placed after a wide character.
    pub const CONTINUATION: Self = Self {
        content: CellContent::Continuation,
        fg: None,
        bg: None,
        attrs: StyleFlags::empty(),
    };

    /// Create a cell displaying a character with default styling.
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    /// Whether nothing has been written to this cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Whether this is the trailing cell of a wide character.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// Set the foreground color (builder).
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color (builder).
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }
}
