//! Terminal-agnostic input.
//!
//! Decouples the session logic from how a transport encodes keys and pointer
//! reports, so the state machine can be driven directly in tests.

/// Keyboard input abstraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Control chord, e.g. `Ctrl('c')` for 0x03.
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Pointer button reported with a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Middle button.
    Middle,
    /// Secondary button.
    Right,
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
    /// Motion without a button held.
    None,
}

/// What happened to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    /// Button pressed.
    Press,
    /// Button released.
    Release,
    /// Pointer moved with the button held.
    Drag,
}

/// A pointer event in 0-based terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Button involved.
    pub button: MouseButton,
    /// Press, release or drag.
    pub kind: MouseKind,
}

impl MouseInput {
    /// Release of the primary button at `(x, y)`.
    pub fn left_release(x: u16, y: u16) -> Self {
        Self { x, y, button: MouseButton::Left, kind: MouseKind::Release }
    }

    /// `true` for a release of the primary button, the only pointer event
    /// that selects anything.
    pub fn is_primary_release(&self) -> bool {
        self.kind == MouseKind::Release && self.button == MouseButton::Left
    }
}

/// Raw input as delivered by a [`crate::Driver`], before key bindings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalInput {
    /// A key press.
    Key(KeyInput),
    /// A pointer event.
    Mouse(MouseInput),
    /// New terminal size (columns, rows).
    Resize(u16, u16),
}
