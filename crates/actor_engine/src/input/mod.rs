//! Input routing
//!
//! The device layer (window / keyboard polling, outside this crate) feeds raw
//! key, button and mouse-motion events into the [`InputRouter`]. Once per frame
//! the world resolves every named axis and action from that snapshot and calls
//! the subscribers actors bound to them.

pub mod mapping;
pub mod router;
pub mod state;

pub use mapping::{ActionMapping, AxisBinding, AxisMapping, InputConfig};
pub use router::{ActionCallback, AxisCallback, InputDispatch, InputRouter};
pub use state::{ButtonState, InputState};

use serde::{Deserialize, Serialize};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Left shift
    LeftShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Continuous mouse motion axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAxis {
    /// Horizontal motion this frame
    X,
    /// Vertical motion this frame
    Y,
}

/// A raw input a mapping can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    /// Keyboard key (digital)
    Key(KeyCode),
    /// Mouse button (digital)
    MouseButton(MouseButton),
    /// Mouse motion (analog, only meaningful for axes)
    MouseAxis(MouseAxis),
}

impl InputSource {
    /// Digital sources are either held or not; analog ones report a magnitude
    pub const fn is_digital(self) -> bool {
        !matches!(self, Self::MouseAxis(_))
    }
}

impl From<KeyCode> for InputSource {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputSource {
    fn from(button: MouseButton) -> Self {
        Self::MouseButton(button)
    }
}

impl From<MouseAxis> for InputSource {
    fn from(axis: MouseAxis) -> Self {
        Self::MouseAxis(axis)
    }
}
