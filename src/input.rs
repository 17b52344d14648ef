//! Windowing-agnostic input events
//!
//! The event loop that produces these lives outside the crate; it only has to
//! translate its native events into [`InputEvent`]s.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    Space,
    LeftShift,
    LeftControl,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Cursor position in pixels, origin top-left.
    MouseMove { x: f32, y: f32 },
    /// Positive is scrolling up / away from the user.
    MouseWheel { delta: f32 },
    MouseDown { button: MouseButton, x: f32, y: f32 },
    MouseUp { button: MouseButton },
    Resize { width: u32, height: u32 },
}
