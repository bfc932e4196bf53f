//! Window-system-independent input state.
//!
//! The winit adapter in [`app::winit`](crate::app::winit) translates native
//! events into the types here; tests inject them directly.

use std::collections::HashSet;
use std::hash::Hash;

use glam::Vec2;

/// Keys the viewer reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    R,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Held and just-pressed sets for one kind of button.
#[derive(Debug, Clone)]
struct ButtonSet<T> {
    held: HashSet<T>,
    pressed_this_frame: HashSet<T>,
}

impl<T: Copy + Eq + Hash> ButtonSet<T> {
    fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed_this_frame: HashSet::new(),
        }
    }

    /// OS key repeat re-sends `Pressed` while held; only the first one counts.
    fn apply(&mut self, button: T, state: ButtonState) {
        match state {
            ButtonState::Pressed if self.held.insert(button) => {
                self.pressed_this_frame.insert(button);
            }
            ButtonState::Pressed => {}
            ButtonState::Released => {
                self.held.remove(&button);
            }
        }
    }

    fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
    }
}

/// Keyboard and mouse state for the current frame, fed by a platform adapter.
#[derive(Debug, Clone)]
pub struct Input {
    keys: ButtonSet<Key>,
    mouse_buttons: ButtonSet<MouseButton>,

    /// `None` until the first cursor sample arrives.
    cursor: Option<Vec2>,
    cursor_delta: Vec2,
    scroll: Vec2,

    viewport: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: ButtonSet::new(),
            mouse_buttons: ButtonSet::new(),
            cursor: None,
            cursor_delta: Vec2::ZERO,
            scroll: Vec2::ZERO,
            viewport: Vec2::ZERO,
        }
    }

    // ------------------------------------------------------------------
    // Adapter side
    // ------------------------------------------------------------------

    /// Drops this frame's edges and deltas. The engine calls it after the
    /// app has seen the frame.
    pub fn start_frame(&mut self) {
        self.keys.end_frame();
        self.mouse_buttons.end_frame();
        self.cursor_delta = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
    }

    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        self.keys.apply(key, state);
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        self.mouse_buttons.apply(button, state);
    }

    /// The first sample only seeds the cursor, so entering the window does
    /// not register as a drag.
    pub fn inject_mouse_position(&mut self, x: f32, y: f32) {
        let cursor = Vec2::new(x, y);
        if let Some(previous) = self.cursor.replace(cursor) {
            self.cursor_delta += cursor - previous;
        }
    }

    /// Scroll in lines; positive `y` zooms in.
    pub fn inject_scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll += Vec2::new(delta_x, delta_y);
    }

    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    // ------------------------------------------------------------------
    // App side
    // ------------------------------------------------------------------

    #[must_use]
    pub fn get_key(&self, key: Key) -> bool {
        self.keys.held.contains(&key)
    }

    /// True only on the frame the key went down.
    #[must_use]
    pub fn get_key_down(&self, key: Key) -> bool {
        self.keys.pressed_this_frame.contains(&key)
    }

    #[must_use]
    pub fn get_mouse_button(&self, button: MouseButton) -> bool {
        self.mouse_buttons.held.contains(&button)
    }

    #[must_use]
    pub fn get_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.pressed_this_frame.contains(&button)
    }

    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.cursor.unwrap_or(Vec2::ZERO)
    }

    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll
    }

    /// Viewport size in physical pixels.
    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.viewport
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
