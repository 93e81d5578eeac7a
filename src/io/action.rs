//! The various data types representing the player's input.

use super::xy::XY;

/// A key which can be pressed or released in an [`Action`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Char(char),
    F(usize),
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Insert,
    Tab,
    Enter,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
}

impl Key {
    /// Whether this is the given character, ignoring case.
    pub fn is_char(&self, want: char) -> bool {
        match self {
            Key::Char(ch) => ch.eq_ignore_ascii_case(&want),
            _ => false,
        }
    }
}

/// A mouse button which can be pressed or released in an [`Action`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

/// An action the player has taken in the [`IoSystem`][super::sys::IoSystem].
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Action {
    /// A key was pressed.
    KeyPress { key: Key },
    /// A key was let go.
    KeyRelease { key: Key },
    /// A mouse button was pressed.
    MousePress { pos: XY, button: MouseButton },
    /// A mouse button was released.
    MouseRelease { pos: XY, button: MouseButton },
    /// The mouse has moved to a new location, possibly while holding a button
    MouseMove { pos: XY },
    /// The display wants a redraw, maybe without direct user input.
    Redraw,
    /// User requested the program end externally, e.g. clicking the X button in a window
    Closed,
    /// User requested that the program pause temporarily
    Paused,
    /// The program was unpaused. May be fired spuriously, without an associated [`Paused`][Self::Paused].
    Unpaused,
    /// Some unknown input was received, with a description of what it was
    Unknown(String),
    /// Trying to read input led to some kind of error, with a description
    Error(String),
}

impl Action {
    /// Get the screen position of mouse events, or None for non-mouse events
    pub fn position(&self) -> Option<XY> {
        match self {
            Self::MouseMove { pos } => Some(*pos),
            Self::MousePress { pos, .. } => Some(*pos),
            Self::MouseRelease { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}
