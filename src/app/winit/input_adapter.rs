//! winit events → [`Input`].

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::app::input::{ButtonState, Input, Key, MouseButton};

/// Line-equivalent of one pixel of touchpad scroll.
const PIXEL_SCALE: f32 = 0.01;

impl From<ElementState> for ButtonState {
    fn from(state: ElementState) -> Self {
        if state.is_pressed() {
            Self::Pressed
        } else {
            Self::Released
        }
    }
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        use winit::event::MouseButton as Winit;
        match button {
            Winit::Left => Self::Left,
            Winit::Right => Self::Right,
            Winit::Middle => Self::Middle,
            Winit::Back => Self::Other(3),
            Winit::Forward => Self::Other(4),
            Winit::Other(id) => Self::Other(id),
        }
    }
}

/// Layout-independent key mapping. Unidentified keys yield `None`.
#[must_use]
pub fn translate_key(physical_key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    Some(match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::KeyR => Key::R,
        _ => Key::Other,
    })
}

fn scroll_lines(delta: &MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (*x, *y),
        MouseScrollDelta::PixelDelta(px) => (px.x as f32 * PIXEL_SCALE, px.y as f32 * PIXEL_SCALE),
    }
}

/// Feeds one window event into `input`; events that carry no input are ignored.
pub fn process_window_event(input: &mut Input, event: &WindowEvent) {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if let Some(key) = translate_key(event.physical_key) {
                input.inject_key(key, event.state.into());
            }
        }
        WindowEvent::MouseInput { state, button, .. } => {
            input.inject_mouse_button((*button).into(), (*state).into());
        }
        WindowEvent::CursorMoved { position, .. } => {
            input.inject_mouse_position(position.x as f32, position.y as f32);
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = scroll_lines(delta);
            input.inject_scroll(dx, dy);
        }
        WindowEvent::Resized(size) => input.inject_resize(size.width, size.height),
        _ => {}
    }
}
