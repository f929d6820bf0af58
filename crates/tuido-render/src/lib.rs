#![forbid(unsafe_code)]

//! Cell-grid rendering model for tuido.
//!
//! Widgets draw into a [`Frame`] backed by a [`Buffer`] of [`Cell`]s; the
//! runtime presents the buffer to the terminal, and the harness converts it
//! to plain text for assertions.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod style;

pub use buffer::Buffer;
pub use cell::{Cell, CellContent, Rgb};
pub use frame::Frame;
pub use style::{Style, StyleFlags};
