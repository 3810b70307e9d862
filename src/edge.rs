/// Discrete press state of a single key or button.
///
/// Raw events set the flags immediately; `clear_edges` is called once per
/// frame so `just_pressed`/`just_released` are visible for exactly the frame
/// following the triggering event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeState {
    /// Whether the input is currently held down.
    pub pressed: bool,
    /// Whether the input went down this frame.
    pub just_pressed: bool,
    /// Whether the input went up this frame.
    pub just_released: bool,
}

impl EdgeState {
    /// Create a new, fully released state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw down event. Repeat events from a held key are ignored so
    /// one physical press produces exactly one edge.
    pub fn on_raw_down(&mut self) {
        if !self.pressed {
            self.pressed = true;
            self.just_pressed = true;
        }
    }

    /// Apply a raw up event. Unconditional: the first event ever seen for a
    /// key can be an up, and a duplicate up must stay safe.
    pub fn on_raw_up(&mut self) {
        self.pressed = false;
        self.just_released = true;
    }

    /// Clear the one-shot edge flags. Called once per frame; never touches
    /// `pressed`.
    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}
