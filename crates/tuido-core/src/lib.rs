#![forbid(unsafe_code)]

//! Core types for tuido: input events, geometry, and the clock abstraction.

pub mod clock;
pub mod event;
pub mod geometry;

pub use clock::{Clock, SystemClock, TestClock};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use geometry::Rect;
