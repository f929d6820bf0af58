#![forbid(unsafe_code)]

//! The cell buffer widgets render into.

use tuido_core::Rect;
use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, CellContent};

/// A rectangular grid of [`Cell`]s.
///
/// Writes through [`set`](Self::set) keep wide-character invariants: writing
/// a 2-wide character stores a continuation cell after it, and overwriting
/// either half of a wide pair clears the other half back to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer of empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Buffer width in columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full-buffer bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a cell, `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a cell mutably, `None` when out of bounds.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write a cell, maintaining wide-character invariants.
    ///
    /// Out-of-bounds writes are ignored. A wide character whose trailing half
    /// would fall outside the buffer is not written.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(i) = self.index(x, y) else {
            return;
        };

        let cell_width = match cell.content {
            CellContent::Char(c) => c.width().unwrap_or(0).max(1),
            _ => 1,
        };
        if cell_width > 1 && x + 1 >= self.width {
            return;
        }

        self.clear_overlap(x, y);
        if cell_width > 1 {
            self.clear_overlap(x + 1, y);
        }

        self.cells[i] = cell;
        if cell_width > 1 {
            self.cells[i + 1] = Cell {
                fg: cell.fg,
                bg: cell.bg,
                attrs: cell.attrs,
                ..Cell::CONTINUATION
            };
        }
    }

    /// Clear the other half of any wide pair occupying `(x, y)`.
    fn clear_overlap(&mut self, x: u16, y: u16) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match self.cells[i].content {
            CellContent::Continuation => {
                if x > 0 && matches!(self.cells[i - 1].content, CellContent::Char(_)) {
                    self.cells[i - 1].content = CellContent::Empty;
                }
            }
            CellContent::Char(c) if c.width().unwrap_or(0) > 1 => {
                if let Some(right) = self.index(x + 1, y)
                    && self.cells[right].is_continuation()
                {
                    self.cells[right].content = CellContent::Empty;
                }
            }
            _ => {}
        }
    }

    /// Fill a rectangular area with a cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Cells of one row, empty slice when out of bounds.
    #[must_use]
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Whether two buffers display identical content (styling included).
    #[must_use]
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}
