//! Raw per-frame device state
//!
//! - `pressed`: currently held down
//! - `just_pressed`: went down since the last frame was resolved
//! - `just_released`: went up since the last frame was resolved
//!
//! A press and release inside the same frame still registers as a key-down
//! transition, so quick taps are never lost.

use super::{InputSource, KeyCode, MouseAxis, MouseButton};
use std::collections::HashSet;
use std::hash::Hash;

/// Tracks the state of a set of digital inputs (keys or mouse buttons)
#[derive(Debug, Clone)]
pub struct ButtonState<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> ButtonState<T> {
    /// Create an empty state with nothing held
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Returns `true` if the input is currently held down
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    /// Returns `true` if the input went down this frame
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input went up this frame
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Record a press; repeats while already held are ignored
    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Record a release
    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Clear per-frame transitions
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Release everything (focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.clear_just();
    }
}

impl<T: Eq + Hash + Copy> Default for ButtonState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete raw input snapshot for one frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keyboard state
    pub keys: ButtonState<KeyCode>,
    /// Mouse button state
    pub mouse_buttons: ButtonState<MouseButton>,
    mouse_delta: (f32, f32),
}

impl InputState {
    /// Create an idle snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate mouse motion for the current frame
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Mouse motion accumulated this frame
    pub const fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Whether a digital source is held (analog sources report `false`)
    pub fn is_held(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(key) => self.keys.pressed(key),
            InputSource::MouseButton(button) => self.mouse_buttons.pressed(button),
            InputSource::MouseAxis(_) => false,
        }
    }

    /// Whether a digital source went down this frame (analog sources report `false`)
    pub fn went_down(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(key) => self.keys.just_pressed(key),
            InputSource::MouseButton(button) => self.mouse_buttons.just_pressed(button),
            InputSource::MouseAxis(_) => false,
        }
    }

    /// Magnitude of an analog source this frame (digital sources report 0)
    pub const fn analog(&self, source: InputSource) -> f32 {
        match source {
            InputSource::MouseAxis(MouseAxis::X) => self.mouse_delta.0,
            InputSource::MouseAxis(MouseAxis::Y) => self.mouse_delta.1,
            _ => 0.0,
        }
    }

    /// Drop per-frame transitions and motion once the frame has been resolved
    pub fn end_frame(&mut self) {
        self.keys.clear_just();
        self.mouse_buttons.clear_just();
        self.mouse_delta = (0.0, 0.0);
    }
}
