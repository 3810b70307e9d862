use crate::keyboard::KeyId;

/// 2D point or displacement in window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The three tracked pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Cursor position plus the keyboard keys that were held when it was
/// captured.
#[derive(Debug, Clone, Default)]
pub struct ClickPoint {
    pub position: Vec2,
    pub keys_held: Vec<KeyId>,
}

/// Completed drag gesture, visible for one frame after button release.
#[derive(Debug, Clone)]
pub struct DragRelease {
    pub start: Vec2,
    pub end: Vec2,
    /// Keyboard keys held at press time, not at release.
    pub keys_held: Vec<KeyId>,
}

/// Live drag geometry between the session start and the current cursor
/// point.
#[derive(Debug, Clone)]
pub struct Drag {
    /// Direction of the drag vector in degrees, `atan2(y, x)`.
    pub rotation_degree: f64,
    /// Euclidean length of the drag vector.
    pub distance: f64,
    pub start: Vec2,
    pub end: Vec2,
    pub vector: Vec2,
}

#[derive(Debug, Default)]
struct ButtonTrack {
    /// Open session: present from press until release.
    start: Option<ClickPoint>,
    /// Last cursor point seen while the session was open.
    current: Option<Vec2>,
    /// One-frame release snapshot.
    released: Option<DragRelease>,
}

/// Pointer tracking: per-button drag sessions, absolute cursor position, and
/// per-frame scroll delta.
#[derive(Debug, Default)]
pub struct Mouse {
    buttons: [ButtonTrack; 3],
    position: Vec2,
    scroll: f64,
}

impl Mouse {
    /// Create a pointer tracker with the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw button-down notification. Opens a session for the button,
    /// replacing any prior one. `keys_held` is the snapshot of currently
    /// pressed keyboard keys.
    pub fn on_button_down(&mut self, button: MouseButton, position: Vec2, keys_held: Vec<KeyId>) {
        let track = &mut self.buttons[button.index()];
        track.start = Some(ClickPoint { position, keys_held });
        track.current = None;
    }

    /// Apply a raw pointer-move notification. Updates the absolute position
    /// and the current point of every open session.
    pub fn on_move(&mut self, position: Vec2) {
        self.position = position;
        for track in &mut self.buttons {
            if track.start.is_some() {
                track.current = Some(position);
            }
        }
    }

    /// Apply a raw button-up notification. If a session was open, produces
    /// the one-frame release snapshot and closes the session.
    pub fn on_button_up(&mut self, button: MouseButton, position: Vec2) {
        let track = &mut self.buttons[button.index()];
        if let Some(start) = track.start.take() {
            track.released = Some(DragRelease {
                start: start.position,
                end: position,
                keys_held: start.keys_held,
            });
        }
        track.current = None;
    }

    /// Apply a raw wheel notification. The last wheel event before
    /// `update()` wins; deltas within a frame are not accumulated.
    pub fn on_wheel(&mut self, delta_y: f64) {
        self.scroll = delta_y * 0.01;
    }

    /// Clear the one-frame release snapshots and the scroll delta. Open
    /// sessions survive so an ongoing drag spans frames. Call once per frame.
    pub fn update(&mut self) {
        for track in &mut self.buttons {
            track.released = None;
        }
        self.scroll = 0.0;
    }

    /// Whether the button is currently held (a session is open).
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].start.is_some()
    }

    /// Whether the button is held and the cursor has moved since the press.
    pub fn is_dragging(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].current.is_some()
    }

    /// The release snapshot for the button, present for one frame after an
    /// open session ended.
    pub fn just_released(&self, button: MouseButton) -> Option<&DragRelease> {
        self.buttons[button.index()].released.as_ref()
    }

    /// Current drag geometry. Requires an open session and at least one move
    /// since the press.
    pub fn drag(&self, button: MouseButton) -> Option<Drag> {
        let track = &self.buttons[button.index()];
        let start = track.start.as_ref()?.position;
        let end = track.current?;
        let vector = end - start;
        Some(Drag {
            rotation_degree: vector.y.atan2(vector.x).to_degrees(),
            distance: vector.length(),
            start,
            end,
            vector,
        })
    }

    /// Keyboard keys held when the button's session was opened.
    pub fn keys_held_at_press(&self, button: MouseButton) -> Option<&[KeyId]> {
        self.buttons[button.index()]
            .start
            .as_ref()
            .map(|p| p.keys_held.as_slice())
    }

    /// Absolute cursor position, relative to the window.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Scroll delta for the current frame.
    pub fn scroll(&self) -> f64 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_drag_round_trip() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(MouseButton::Left, Vec2::new(0.0, 0.0), Vec::new());
        mouse.on_move(Vec2::new(3.0, 4.0));

        let drag = mouse.drag(MouseButton::Left).unwrap();
        assert_close(drag.distance, 5.0);
        assert_close(drag.rotation_degree, (4.0f64).atan2(3.0).to_degrees());
        assert!((drag.rotation_degree - 53.13).abs() < 0.01);
        assert_eq!(drag.vector, Vec2::new(3.0, 4.0));
        assert_eq!(drag.start, Vec2::new(0.0, 0.0));
        assert_eq!(drag.end, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_drag_requires_a_move() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(MouseButton::Left, Vec2::new(1.0, 1.0), Vec::new());

        assert!(mouse.is_pressed(MouseButton::Left));
        assert!(!mouse.is_dragging(MouseButton::Left));
        assert!(mouse.drag(MouseButton::Left).is_none());
    }

    #[test]
    fn test_session_survives_update() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(MouseButton::Right, Vec2::new(0.0, 0.0), Vec::new());
        mouse.on_move(Vec2::new(2.0, 0.0));

        mouse.update();
        assert!(mouse.is_pressed(MouseButton::Right));
        assert!(mouse.drag(MouseButton::Right).is_some());

        mouse.on_move(Vec2::new(6.0, 8.0));
        let drag = mouse.drag(MouseButton::Right).unwrap();
        assert_close(drag.distance, 10.0);
    }

    #[test]
    fn test_release_snapshot_is_one_frame() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(
            MouseButton::Left,
            Vec2::new(1.0, 2.0),
            vec!["Shift".to_string()],
        );
        mouse.on_move(Vec2::new(5.0, 6.0));
        mouse.on_button_up(MouseButton::Left, Vec2::new(5.0, 6.0));

        assert!(!mouse.is_pressed(MouseButton::Left));
        assert!(mouse.drag(MouseButton::Left).is_none());

        let released = mouse.just_released(MouseButton::Left).unwrap();
        assert_eq!(released.start, Vec2::new(1.0, 2.0));
        assert_eq!(released.end, Vec2::new(5.0, 6.0));
        assert_eq!(released.keys_held, vec!["Shift".to_string()]);

        mouse.update();
        assert!(mouse.just_released(MouseButton::Left).is_none());
    }

    #[test]
    fn test_release_without_session_is_silent() {
        let mut mouse = Mouse::new();
        mouse.on_button_up(MouseButton::Middle, Vec2::new(0.0, 0.0));
        assert!(mouse.just_released(MouseButton::Middle).is_none());
    }

    #[test]
    fn test_press_replaces_prior_session() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(MouseButton::Left, Vec2::new(0.0, 0.0), Vec::new());
        mouse.on_move(Vec2::new(9.0, 9.0));

        mouse.on_button_down(MouseButton::Left, Vec2::new(4.0, 4.0), Vec::new());
        // Fresh session: no move seen yet.
        assert!(mouse.drag(MouseButton::Left).is_none());

        mouse.on_move(Vec2::new(7.0, 8.0));
        let drag = mouse.drag(MouseButton::Left).unwrap();
        assert_close(drag.distance, 5.0);
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(MouseButton::Left, Vec2::new(0.0, 0.0), Vec::new());
        mouse.on_move(Vec2::new(1.0, 0.0));

        assert!(mouse.is_dragging(MouseButton::Left));
        assert!(!mouse.is_dragging(MouseButton::Right));
        assert!(mouse.drag(MouseButton::Middle).is_none());
    }

    #[test]
    fn test_scroll_overwrites_and_resets() {
        let mut mouse = Mouse::new();
        mouse.on_wheel(100.0);
        assert_close(mouse.scroll(), 1.0);

        // Last wheel event within the frame wins.
        mouse.on_wheel(-50.0);
        assert_close(mouse.scroll(), -0.5);

        mouse.update();
        assert_close(mouse.scroll(), 0.0);
    }

    #[test]
    fn test_position_tracks_moves() {
        let mut mouse = Mouse::new();
        assert_eq!(mouse.position(), Vec2::new(0.0, 0.0));

        mouse.on_move(Vec2::new(12.0, 34.0));
        assert_eq!(mouse.position(), Vec2::new(12.0, 34.0));

        mouse.update();
        assert_eq!(mouse.position(), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn test_negative_direction_drag() {
        let mut mouse = Mouse::new();
        mouse.on_button_down(MouseButton::Left, Vec2::new(3.0, 4.0), Vec::new());
        mouse.on_move(Vec2::new(0.0, 0.0));

        let drag = mouse.drag(MouseButton::Left).unwrap();
        assert_close(drag.distance, 5.0);
        assert_eq!(drag.vector, Vec2::new(-3.0, -4.0));
        assert!(drag.rotation_degree < -90.0 && drag.rotation_degree > -180.0);
    }
}
