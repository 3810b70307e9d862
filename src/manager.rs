use crate::gamepad::Gamepads;
use crate::group::{GroupsConfig, InputGroups};
use crate::keyboard::Keyboard;
use crate::mouse::{Mouse, MouseButton, Vec2};

/// Owns the input components and routes raw notifications to them.
///
/// One instance per application, created at startup and held by whatever
/// drives the frame loop. Raw events mutate state immediately as they
/// arrive; [`update`](Self::update) must run exactly once per frame, after
/// application code has read the one-shot state for that frame.
pub struct InputManager {
    pub keyboard: Keyboard,
    pub groups: InputGroups,
    pub mouse: Mouse,
    pub gamepads: Gamepads,
}

impl InputManager {
    /// Create a manager with default configuration.
    pub fn new() -> Self {
        Self::with_groups_config(GroupsConfig::default())
    }

    /// Create a manager with a specific group registry configuration.
    pub fn with_groups_config(config: GroupsConfig) -> Self {
        Self {
            keyboard: Keyboard::new(),
            groups: InputGroups::with_config(config),
            mouse: Mouse::new(),
            gamepads: Gamepads::new(),
        }
    }

    /// Route a raw key-down notification to the keyboard and the group
    /// registry.
    pub fn on_key_down(&mut self, key: &str) {
        self.keyboard.on_key_down(key);
        self.groups.on_key_down(key);
    }

    /// Route a raw key-up notification to the keyboard and the group
    /// registry.
    pub fn on_key_up(&mut self, key: &str) {
        self.keyboard.on_key_up(key);
        self.groups.on_key_up(key);
    }

    /// Route a raw pointer button press, snapshotting the currently pressed
    /// keyboard keys into the new drag session.
    pub fn on_pointer_down(&mut self, button: MouseButton, position: Vec2) {
        let keys_held = self.keyboard.pressed_keys();
        self.mouse.on_button_down(button, position, keys_held);
    }

    /// Route a raw pointer move.
    pub fn on_pointer_move(&mut self, position: Vec2) {
        self.mouse.on_move(position);
    }

    /// Route a raw pointer button release.
    pub fn on_pointer_up(&mut self, button: MouseButton, position: Vec2) {
        self.mouse.on_button_up(button, position);
    }

    /// Route a raw wheel notification.
    pub fn on_wheel(&mut self, delta_y: f64) {
        self.mouse.on_wheel(delta_y);
    }

    /// Per-frame reset: clears one-shot keyboard, group, and mouse state,
    /// then polls gamepad device events. Call exactly once per frame.
    pub fn update(&mut self) {
        self.keyboard.update();
        self.groups.update();
        self.mouse.update();
        self.gamepads.poll();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
