#![forbid(unsafe_code)]

//! A frame under construction: the buffer plus cursor state.

use tuido_core::Rect;

use crate::buffer::Buffer;

/// One rendering pass worth of output.
///
/// The model's `view` draws into the frame; the runtime then presents the
/// buffer and positions the cursor.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid being drawn.
    pub buffer: Buffer,
    /// Cursor position to show after presenting, `None` to hide it.
    cursor: Option<(u16, u16)>,
}

impl Frame {
    /// Create a frame with an empty buffer of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor: None,
        }
    }

    /// Frame width in columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Full-frame bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// Set (or hide) the cursor position.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }

    /// The cursor position, if shown.
    #[must_use]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}
