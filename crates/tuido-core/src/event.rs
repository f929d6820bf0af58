#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` so tests can inject and
//! compare them directly. `KeyEventKind` defaults to `Press` when the
//! terminal does not report press/release separately.

use bitflags::bitflags;
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// A tick event from the runtime.
    ///
    /// Fired when the scheduled tick interval elapses. The application uses
    /// ticks to check clock deadlines (e.g. a pending task creation).
    Tick,
}

impl Event {
    /// Convenience constructor for a plain character key press.
    #[must_use]
    pub const fn key(c: char) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    /// Convenience constructor for a non-character key press.
    #[must_use]
    pub const fn key_code(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Convert a crossterm event into a tuido [`Event`].
    ///
    /// Returns `None` for event kinds tuido does not handle (mouse, paste,
    /// focus) and for key release events.
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => {
                if key.kind == cte::KeyEventKind::Release {
                    return None;
                }
                let code = match key.code {
                    cte::KeyCode::Char(c) => KeyCode::Char(c),
                    cte::KeyCode::Enter => KeyCode::Enter,
                    cte::KeyCode::Esc => KeyCode::Escape,
                    cte::KeyCode::Backspace => KeyCode::Backspace,
                    cte::KeyCode::Tab => KeyCode::Tab,
                    cte::KeyCode::BackTab => KeyCode::BackTab,
                    cte::KeyCode::Delete => KeyCode::Delete,
                    cte::KeyCode::Home => KeyCode::Home,
                    cte::KeyCode::End => KeyCode::End,
                    cte::KeyCode::PageUp => KeyCode::PageUp,
                    cte::KeyCode::PageDown => KeyCode::PageDown,
                    cte::KeyCode::Up => KeyCode::Up,
                    cte::KeyCode::Down => KeyCode::Down,
                    cte::KeyCode::Left => KeyCode::Left,
                    cte::KeyCode::Right => KeyCode::Right,
                    cte::KeyCode::F(n) => KeyCode::F(n),
                    _ => return None,
                };
                let mut modifiers = Modifiers::NONE;
                if key.modifiers.contains(cte::KeyModifiers::SHIFT) {
                    modifiers |= Modifiers::SHIFT;
                }
                if key.modifiers.contains(cte::KeyModifiers::CONTROL) {
                    modifiers |= Modifiers::CTRL;
                }
                if key.modifiers.contains(cte::KeyModifiers::ALT) {
                    modifiers |= Modifiers::ALT;
                }
                let kind = match key.kind {
                    cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    _ => KeyEventKind::Press,
                };
                Some(Self::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                }))
            }
            cte::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press or repeat).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and `Press` kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Attach modifiers (builder).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if the Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if the Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F12).
    F(u8),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (repeat event).
    Repeat,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE = 0;
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CTRL = 1 << 1;
        /// Alt key.
        const ALT = 1 << 2;
    }
}
