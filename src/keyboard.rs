use crate::edge::EdgeState;

/// Opaque platform-reported key label, e.g. `"w"`, `"Space"`, `"ArrowLeft"`.
/// Stable and unique per physical key for the duration of the run.
pub type KeyId = String;

#[derive(Debug)]
struct KeyEntry {
    id: KeyId,
    state: EdgeState,
}

/// Raw keyboard tracking: one [`EdgeState`] per key label ever seen.
///
/// Entries are created lazily on the first raw event for a key, in either
/// direction, and kept in first-seen order.
#[derive(Debug, Default)]
pub struct Keyboard {
    keys: Vec<KeyEntry>,
}

impl Keyboard {
    /// Create an empty keyboard tracker.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, id: &str) -> &mut EdgeState {
        let pos = match self.keys.iter().position(|k| k.id == id) {
            Some(pos) => pos,
            None => {
                self.keys.push(KeyEntry {
                    id: id.to_string(),
                    state: EdgeState::new(),
                });
                self.keys.len() - 1
            }
        };
        &mut self.keys[pos].state
    }

    fn state(&self, id: &str) -> Option<EdgeState> {
        self.keys.iter().find(|k| k.id == id).map(|k| k.state)
    }

    /// Apply a raw key-down notification.
    pub fn on_key_down(&mut self, id: &str) {
        self.entry_mut(id).on_raw_down();
    }

    /// Apply a raw key-up notification.
    pub fn on_key_up(&mut self, id: &str) {
        self.entry_mut(id).on_raw_up();
    }

    /// Clear edge flags for every tracked key. Call once per frame.
    pub fn update(&mut self) {
        for key in &mut self.keys {
            key.state.clear_edges();
        }
    }

    /// Whether the key is currently held down.
    pub fn is_pressed(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.pressed)
    }

    /// Whether the key went down this frame.
    pub fn is_just_pressed(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.just_pressed)
    }

    /// Whether the key went up this frame.
    pub fn is_just_released(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.just_released)
    }

    /// Whether any tracked key is held down.
    pub fn any_pressed(&self) -> bool {
        self.keys.iter().any(|k| k.state.pressed)
    }

    /// Whether any tracked key went down this frame.
    pub fn any_just_pressed(&self) -> bool {
        self.keys.iter().any(|k| k.state.just_pressed)
    }

    /// Whether any tracked key went up this frame.
    pub fn any_just_released(&self) -> bool {
        self.keys.iter().any(|k| k.state.just_released)
    }

    /// Labels of all currently held keys, in first-seen order.
    pub fn pressed_keys(&self) -> Vec<KeyId> {
        self.keys
            .iter()
            .filter(|k| k.state.pressed)
            .map(|k| k.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_reports_released() {
        let keyboard = Keyboard::new();
        assert!(!keyboard.is_pressed("w"));
        assert!(!keyboard.is_just_pressed("w"));
        assert!(!keyboard.is_just_released("w"));
    }

    #[test]
    fn test_down_then_update() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_down("w");

        assert!(keyboard.is_pressed("w"));
        assert!(keyboard.is_just_pressed("w"));

        keyboard.update();
        assert!(keyboard.is_pressed("w"));
        assert!(!keyboard.is_just_pressed("w"));
    }

    #[test]
    fn test_first_event_can_be_up() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_up("Escape");

        assert!(!keyboard.is_pressed("Escape"));
        assert!(keyboard.is_just_released("Escape"));

        keyboard.update();
        assert!(!keyboard.is_just_released("Escape"));
    }

    #[test]
    fn test_pressed_keys_in_first_seen_order() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_down("a");
        keyboard.on_key_down("b");
        keyboard.on_key_down("c");
        keyboard.on_key_up("b");

        assert_eq!(keyboard.pressed_keys(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_any_queries() {
        let mut keyboard = Keyboard::new();
        assert!(!keyboard.any_pressed());

        keyboard.on_key_down("Space");
        assert!(keyboard.any_pressed());
        assert!(keyboard.any_just_pressed());
        assert!(!keyboard.any_just_released());

        keyboard.update();
        keyboard.on_key_up("Space");
        assert!(!keyboard.any_pressed());
        assert!(keyboard.any_just_released());
    }

    #[test]
    fn test_held_key_repeat_keeps_single_edge() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_down("f");
        keyboard.update();

        // OS key repeat delivers more downs while held.
        keyboard.on_key_down("f");
        keyboard.on_key_down("f");

        assert!(keyboard.is_pressed("f"));
        assert!(!keyboard.is_just_pressed("f"));
    }
}
