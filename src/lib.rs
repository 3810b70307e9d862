//! Frame-based input state layer for keyboard, mouse, and gamepad.
//!
//! Raw hardware notifications arrive asynchronously and mutate state
//! immediately; application code reads discrete per-frame facts instead:
//! pressed, just pressed this frame, just released this frame. A group
//! registry maps raw keys onto named actions that can be enabled and
//! disabled contextually, so the same physical key can drive different
//! things in a menu than in gameplay.
//!
//! Typical frame:
//!
//! 1. Deliver raw events as they arrive (directly, or through
//!    [`apply_window_event`] when winit hosts the event loop).
//! 2. Read state: [`InputGroups::is_just_pressed`], [`Mouse::drag`], ...
//! 3. Call [`InputManager::update`] exactly once to clear one-shot flags.

pub mod edge;
pub mod gamepad;
pub mod group;
pub mod keyboard;
pub mod manager;
pub mod mouse;
pub mod winit_backend;

pub use edge::EdgeState;
pub use gamepad::{Gamepads, HapticCapability, PadButton, PadSnapshot};
pub use group::{
    GroupsConfig, InputBinding, InputCallback, InputGroup, InputGroups, InputHandler, LogicalInput,
};
pub use keyboard::{KeyId, Keyboard};
pub use manager::InputManager;
pub use mouse::{ClickPoint, Drag, DragRelease, Mouse, MouseButton, Vec2};
pub use winit_backend::apply_window_event;
