use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Replay, Ticks};
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use tracing::{debug, warn};

/// Button order used for numeric indexing. Face buttons first, then
/// shoulders and triggers, menu buttons, stick clicks, d-pad, guide.
const BUTTON_LAYOUT: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

/// Axis order used for numeric indexing.
const AXIS_LAYOUT: [Axis; 6] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::LeftZ,
    Axis::RightZ,
];

/// Live rumble effects kept alive until replaced; dropping a gilrs effect
/// removes it from the device.
const MAX_LIVE_EFFECTS: usize = 8;

/// Digital state plus analog value of one gamepad button.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadButton {
    pub pressed: bool,
    pub value: f32,
}

/// Poll-copied state of one connected gamepad.
#[derive(Debug, Clone)]
pub struct PadSnapshot {
    id: GamepadId,
    name: String,
    buttons: Vec<PadButton>,
    axes: Vec<f32>,
    ff_supported: bool,
}

impl PadSnapshot {
    /// Device name as reported by the platform.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Button states indexed per the fixed layout order.
    pub fn buttons(&self) -> &[PadButton] {
        &self.buttons
    }

    /// Axis values indexed per the fixed layout order.
    pub fn axes(&self) -> &[f32] {
        &self.axes
    }
}

/// Proof that a pad reported force-feedback support when queried.
#[derive(Debug, Clone, Copy)]
pub struct HapticCapability {
    id: GamepadId,
}

/// Registry of connected gamepads.
///
/// Pads are added on connect and removed on disconnect; slots are in
/// connection order and every accessor treats an out-of-range index as a
/// normal absent result, since disconnection is routine, not a failure.
pub struct Gamepads {
    gilrs: Option<Gilrs>,
    pads: Vec<PadSnapshot>,
    effects: Vec<Effect>,
}

impl Gamepads {
    /// Create the registry, adopting already connected devices. A failed
    /// gamepad subsystem init degrades to an empty registry.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                warn!("Failed to initialize gamepad support: {}", e);
                None
            }
        };

        let mut registry = Self {
            gilrs,
            pads: Vec::new(),
            effects: Vec::new(),
        };
        registry.adopt_connected();
        registry.refresh();
        registry
    }

    /// Pick up devices that were connected before the registry existed.
    fn adopt_connected(&mut self) {
        let ids: Vec<GamepadId> = match &self.gilrs {
            Some(gilrs) => gilrs.gamepads().map(|(id, _)| id).collect(),
            None => return,
        };
        for id in ids {
            self.add_pad(id);
        }
    }

    fn add_pad(&mut self, id: GamepadId) {
        if self.pads.iter().any(|p| p.id == id) {
            return;
        }
        let Some(gilrs) = &self.gilrs else {
            return;
        };
        let Some(pad) = gilrs.connected_gamepad(id) else {
            return;
        };
        debug!("Gamepad connected: {} ({:?})", pad.name(), id);
        self.pads.push(PadSnapshot {
            id,
            name: pad.name().to_string(),
            buttons: Vec::new(),
            axes: Vec::new(),
            ff_supported: pad.is_ff_supported(),
        });
    }

    fn remove_pad(&mut self, id: GamepadId) {
        if self.pads.iter().any(|p| p.id == id) {
            debug!("Gamepad disconnected: {:?}", id);
        }
        self.pads.retain(|p| p.id != id);
    }

    /// Drain pending device events and refresh every snapshot. Call once per
    /// frame, or whenever fresh state is needed.
    pub fn poll(&mut self) {
        loop {
            let event = match &mut self.gilrs {
                Some(gilrs) => gilrs.next_event(),
                None => None,
            };
            let Some(event) = event else {
                break;
            };
            match event.event {
                EventType::Connected => self.add_pad(event.id),
                EventType::Disconnected => self.remove_pad(event.id),
                _ => {}
            }
        }
        self.refresh();
    }

    /// Re-copy button and axis arrays from the platform state.
    fn refresh(&mut self) {
        let Some(gilrs) = &self.gilrs else {
            return;
        };
        for snap in &mut self.pads {
            let Some(pad) = gilrs.connected_gamepad(snap.id) else {
                continue;
            };
            snap.buttons = BUTTON_LAYOUT
                .iter()
                .map(|&button| PadButton {
                    pressed: pad.is_pressed(button),
                    value: pad.button_data(button).map(|d| d.value()).unwrap_or(0.0),
                })
                .collect();
            snap.axes = AXIS_LAYOUT
                .iter()
                .map(|&axis| pad.axis_data(axis).map(|d| d.value()).unwrap_or(0.0))
                .collect();
        }
    }

    /// All connected pads, in connection order.
    pub fn gamepads(&self) -> &[PadSnapshot] {
        &self.pads
    }

    /// Pad by slot index.
    pub fn gamepad(&self, index: usize) -> Option<&PadSnapshot> {
        self.pads.get(index)
    }

    /// Button array of a pad.
    pub fn buttons(&self, index: usize) -> Option<&[PadButton]> {
        self.pads.get(index).map(|p| p.buttons.as_slice())
    }

    /// Axis array of a pad.
    pub fn axes(&self, index: usize) -> Option<&[f32]> {
        self.pads.get(index).map(|p| p.axes.as_slice())
    }

    /// Single button of a pad by layout index.
    pub fn button(&self, index: usize, button: usize) -> Option<PadButton> {
        self.pads.get(index)?.buttons.get(button).copied()
    }

    /// Single axis of a pad by layout index.
    pub fn axis(&self, index: usize, axis: usize) -> Option<f32> {
        self.pads.get(index)?.axes.get(axis).copied()
    }

    /// Typed haptics handle, present only when the pad reported
    /// force-feedback support.
    pub fn haptics(&self, index: usize) -> Option<HapticCapability> {
        let pad = self.pads.get(index)?;
        pad.ff_supported.then_some(HapticCapability { id: pad.id })
    }

    /// Best-effort dual-motor rumble. Returns false when the pad is absent
    /// or reports no haptics; actuation is fire-and-forget with no
    /// completion signal.
    pub fn request_vibration(
        &mut self,
        index: usize,
        duration_ms: u32,
        strong: f32,
        weak: f32,
    ) -> bool {
        let Some(capability) = self.haptics(index) else {
            return false;
        };
        let Some(gilrs) = &mut self.gilrs else {
            return false;
        };

        let replay = || Replay {
            play_for: Ticks::from_ms(duration_ms),
            ..Replay::default()
        };
        let magnitude = |m: f32| (m.clamp(0.0, 1.0) * f32::from(u16::MAX)) as u16;

        let mut builder = EffectBuilder::new();
        builder
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong {
                    magnitude: magnitude(strong),
                },
                scheduling: replay(),
                ..BaseEffect::default()
            })
            .add_effect(BaseEffect {
                kind: BaseEffectType::Weak {
                    magnitude: magnitude(weak),
                },
                scheduling: replay(),
                ..BaseEffect::default()
            });
        if let Some(pad) = gilrs.connected_gamepad(capability.id) {
            builder.add_gamepad(&pad);
        } else {
            return false;
        }

        let effect = match builder.finish(gilrs) {
            Ok(effect) => effect,
            Err(e) => {
                debug!("Vibration request failed: {}", e);
                return false;
            }
        };
        if let Err(e) = effect.play() {
            debug!("Vibration playback failed: {}", e);
            return false;
        }

        if self.effects.len() >= MAX_LIVE_EFFECTS {
            self.effects.remove(0);
        }
        self.effects.push(effect);
        true
    }

    /// Apply the same rumble to every connected pad, ignoring individual
    /// failures.
    pub fn vibrate_all(&mut self, value: f32, duration_ms: u32) {
        for index in 0..self.pads.len() {
            self.request_vibration(index, duration_ms, value, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_registry() -> Gamepads {
        Gamepads {
            gilrs: None,
            pads: Vec::new(),
            effects: Vec::new(),
        }
    }

    #[test]
    fn test_absent_pad_is_not_an_error() {
        let registry = empty_registry();
        assert!(registry.gamepad(0).is_none());
        assert!(registry.buttons(0).is_none());
        assert!(registry.axes(0).is_none());
        assert!(registry.button(0, 0).is_none());
        assert!(registry.axis(0, 0).is_none());
        assert!(registry.gamepads().is_empty());
    }

    #[test]
    fn test_vibration_on_absent_pad_returns_false() {
        let mut registry = empty_registry();
        assert!(registry.haptics(0).is_none());
        assert!(!registry.request_vibration(0, 200, 1.0, 0.5));
    }

    #[test]
    fn test_vibrate_all_on_empty_registry_is_noop() {
        let mut registry = empty_registry();
        registry.vibrate_all(1.0, 100);
        assert!(registry.effects.is_empty());
    }

    #[test]
    fn test_poll_without_subsystem_is_noop() {
        let mut registry = empty_registry();
        registry.poll();
        assert!(registry.gamepads().is_empty());
    }

    #[test]
    fn test_layout_indices_are_distinct() {
        for (i, a) in BUTTON_LAYOUT.iter().enumerate() {
            for b in &BUTTON_LAYOUT[i + 1..] {
                assert_ne!(a, b);
            }
        }
        for (i, a) in AXIS_LAYOUT.iter().enumerate() {
            for b in &AXIS_LAYOUT[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
