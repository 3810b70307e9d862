//! Translation from winit window events to raw input notifications.
//!
//! The core state types are event-source agnostic; this module is the glue
//! for hosts that pump a winit event loop. Feed every [`WindowEvent`] through
//! [`apply_window_event`] and call [`InputManager::update`] once per frame.

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::Key;

use crate::manager::InputManager;
use crate::mouse::{MouseButton, Vec2};

/// Feed a window event into the manager. Events the input layer does not
/// consume are ignored.
pub fn apply_window_event(manager: &mut InputManager, event: &WindowEvent) {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let id = key_identity(&event.logical_key);
            match event.state {
                ElementState::Pressed => manager.on_key_down(&id),
                ElementState::Released => manager.on_key_up(&id),
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            manager.on_pointer_move(Vec2::new(position.x, position.y));
        }
        WindowEvent::MouseInput { state, button, .. } => {
            if let Some(button) = mouse_button(*button) {
                let position = manager.mouse.position();
                match state {
                    ElementState::Pressed => manager.on_pointer_down(button, position),
                    ElementState::Released => manager.on_pointer_up(button, position),
                }
            }
        }
        WindowEvent::MouseWheel { delta, .. } => {
            manager.on_wheel(wheel_delta_y(*delta));
        }
        _ => {}
    }
}

/// Stable key label for a logical key. Printable keys keep their text,
/// named keys use their name ("Space", "ArrowLeft", ...).
fn key_identity(key: &Key) -> String {
    match key {
        Key::Character(text) => text.to_string(),
        Key::Named(named) => format!("{named:?}"),
        Key::Unidentified(_) => "Unidentified".to_string(),
        Key::Dead(_) => "Dead".to_string(),
    }
}

fn mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// Wheel delta in the units the 0.01 scroll scale expects: roughly 100 per
/// notch, positive toward the user. winit's line delta is ~1 per notch with
/// the opposite sign, hence the remap.
fn wheel_delta_y(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(-y) * 100.0,
        MouseScrollDelta::PixelDelta(position) => -position.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::NamedKey;

    #[test]
    fn test_key_identity_character() {
        assert_eq!(key_identity(&Key::Character("w".into())), "w");
    }

    #[test]
    fn test_key_identity_named() {
        assert_eq!(key_identity(&Key::Named(NamedKey::Space)), "Space");
        assert_eq!(key_identity(&Key::Named(NamedKey::ArrowLeft)), "ArrowLeft");
    }

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(mouse_button(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(
            mouse_button(WinitMouseButton::Middle),
            Some(MouseButton::Middle)
        );
        assert_eq!(
            mouse_button(WinitMouseButton::Right),
            Some(MouseButton::Right)
        );
        assert_eq!(mouse_button(WinitMouseButton::Other(4)), None);
    }

    #[test]
    fn test_wheel_delta_units() {
        let line = wheel_delta_y(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert_eq!(line, 100.0);

        let pixel = wheel_delta_y(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            0.0, -120.0,
        )));
        assert_eq!(pixel, 120.0);
    }
}
