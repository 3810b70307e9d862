use tracing::debug;

use crate::edge::EdgeState;
use crate::keyboard::KeyId;

/// Handler invoked during raw key fan-out. Receives the raw key label that
/// triggered the transition.
pub type InputHandler = Box<dyn FnMut(&str)>;

/// Callback attached to a logical input, fired synchronously on the matching
/// transition, in registration order.
pub enum InputCallback {
    /// Fires on down transitions only.
    OnPress(InputHandler),
    /// Fires on up transitions only.
    OnRelease(InputHandler),
}

/// A named action bound to one or more raw keys.
pub struct LogicalInput {
    name: String,
    keys: Vec<KeyId>,
    state: EdgeState,
    callbacks: Vec<InputCallback>,
}

impl LogicalInput {
    /// Action name, unique within its group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw keys bound to this action.
    pub fn keys(&self) -> &[KeyId] {
        &self.keys
    }

    /// Current edge state of this action.
    pub fn state(&self) -> EdgeState {
        self.state
    }
}

/// Name/keys pair consumed by [`InputGroups::update_mapping`].
pub struct InputBinding {
    pub name: String,
    pub keys: Vec<KeyId>,
}

impl InputBinding {
    pub fn new(name: impl Into<String>, keys: &[&str]) -> Self {
        Self {
            name: name.into(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// A named, independently enable/disable-able collection of logical inputs.
///
/// Created implicitly (disabled) on first registration targeting an unseen
/// name; never destroyed implicitly. Inputs keep insertion order.
pub struct InputGroup {
    name: String,
    enabled: bool,
    inputs: Vec<LogicalInput>,
}

impl InputGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn inputs(&self) -> &[LogicalInput] {
        &self.inputs
    }
}

/// Configuration for the group registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupsConfig {
    /// Also clear edge flags of disabled groups during `update()`.
    ///
    /// Off by default: a disabled group keeps stale edges until it is
    /// re-enabled and the next `update()` runs. Turning this on clears all
    /// groups unconditionally.
    pub clear_disabled_edges: bool,
}

/// Registry of input groups: maps raw key events onto logical, contextually
/// scoped actions.
///
/// The same raw key may drive any number of logical inputs across groups;
/// only enabled groups receive fan-out, and queries against a disabled group
/// report released/empty regardless of stored edge state.
pub struct InputGroups {
    groups: Vec<InputGroup>,
    config: GroupsConfig,
}

impl Default for InputGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl InputGroups {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(GroupsConfig::default())
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: GroupsConfig) -> Self {
        Self {
            groups: Vec::new(),
            config,
        }
    }

    fn group(&self, name: &str) -> Option<&InputGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut InputGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Look up a group, creating it disabled if absent.
    fn group_entry(&mut self, name: &str) -> &mut InputGroup {
        let pos = match self.groups.iter().position(|g| g.name == name) {
            Some(pos) => pos,
            None => {
                debug!("created input group: {}", name);
                self.groups.push(InputGroup {
                    name: name.to_string(),
                    enabled: false,
                    inputs: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos]
    }

    fn insert_input(
        &mut self,
        group: &str,
        name: &str,
        keys: Vec<KeyId>,
        callbacks: Vec<InputCallback>,
    ) -> bool {
        let group = self.group_entry(group);
        if group.inputs.iter().any(|i| i.name == name) {
            return false;
        }
        group.inputs.push(LogicalInput {
            name: name.to_string(),
            keys,
            state: EdgeState::new(),
            callbacks,
        });
        true
    }

    /// Register a logical input in a group, creating the group (disabled) if
    /// needed. Returns false without mutating when the name is already taken
    /// in that group.
    pub fn register_input(&mut self, group: &str, name: &str, keys: &[&str]) -> bool {
        self.register_input_with_callbacks(group, name, keys, Vec::new())
    }

    /// Like [`register_input`](Self::register_input), with press/release
    /// callbacks attached in the given order.
    pub fn register_input_with_callbacks(
        &mut self,
        group: &str,
        name: &str,
        keys: &[&str],
        callbacks: Vec<InputCallback>,
    ) -> bool {
        let keys = keys.iter().map(|k| k.to_string()).collect();
        self.insert_input(group, name, keys, callbacks)
    }

    /// Replace the entire input set of a group. Existing inputs are
    /// discarded, the new bindings registered in order, and the group ends up
    /// enabled.
    pub fn update_mapping(&mut self, group: &str, mapping: Vec<InputBinding>) {
        {
            let entry = self.group_entry(group);
            entry.enabled = true;
            entry.inputs.clear();
        }
        for InputBinding { name, keys } in mapping {
            self.insert_input(group, &name, keys, Vec::new());
        }
    }

    /// Remove an input by name. Returns false when the group or the input
    /// does not exist.
    pub fn remove_input(&mut self, group: &str, name: &str) -> bool {
        let Some(group) = self.group_mut(group) else {
            return false;
        };
        let Some(pos) = group.inputs.iter().position(|i| i.name == name) else {
            return false;
        };
        group.inputs.remove(pos);
        true
    }

    /// Enable or disable a group. Returns false when the group is unknown.
    pub fn enable_group(&mut self, group: &str, enable: bool) -> bool {
        match self.group_mut(group) {
            Some(group) => {
                group.enabled = enable;
                true
            }
            None => false,
        }
    }

    /// Enable or disable every known group.
    pub fn enable_all(&mut self, enable: bool) {
        for group in &mut self.groups {
            group.enabled = enable;
        }
    }

    /// Disable every known group.
    pub fn disable_all(&mut self) {
        self.enable_all(false);
    }

    /// Disable every group, then enable only the named one.
    ///
    /// The disable-all side effect applies even when the named group does not
    /// exist and false is returned.
    pub fn enable_only(&mut self, group: &str) -> bool {
        self.disable_all();
        self.enable_group(group, true)
    }

    /// Apply a raw key-down notification to every matching input of every
    /// enabled group, firing press callbacks on each down transition.
    pub fn on_key_down(&mut self, key: &str) {
        for group in &mut self.groups {
            if !group.enabled {
                continue;
            }
            for input in &mut group.inputs {
                if !input.state.pressed && input.keys.iter().any(|k| k == key) {
                    input.state.on_raw_down();
                    for callback in &mut input.callbacks {
                        if let InputCallback::OnPress(handler) = callback {
                            handler(key);
                        }
                    }
                }
            }
        }
    }

    /// Apply a raw key-up notification to every matching input of every
    /// enabled group, firing release callbacks on each up transition.
    pub fn on_key_up(&mut self, key: &str) {
        for group in &mut self.groups {
            if !group.enabled {
                continue;
            }
            for input in &mut group.inputs {
                if input.keys.iter().any(|k| k == key) {
                    input.state.on_raw_up();
                    for callback in &mut input.callbacks {
                        if let InputCallback::OnRelease(handler) = callback {
                            handler(key);
                        }
                    }
                }
            }
        }
    }

    /// Clear edge flags. Call once per frame.
    ///
    /// Only enabled groups are cleared unless
    /// [`GroupsConfig::clear_disabled_edges`] is set.
    pub fn update(&mut self) {
        for group in &mut self.groups {
            if group.enabled || self.config.clear_disabled_edges {
                for input in &mut group.inputs {
                    input.state.clear_edges();
                }
            }
        }
    }

    /// Edge state of an input, gated on the group being enabled.
    fn input_state(&self, group: &str, name: &str) -> Option<EdgeState> {
        let group = self.group(group)?;
        if !group.enabled {
            return None;
        }
        group
            .inputs
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.state)
    }

    /// Whether the named input is held down. False when the group is unknown
    /// or disabled.
    pub fn is_pressed(&self, group: &str, name: &str) -> bool {
        self.input_state(group, name).is_some_and(|s| s.pressed)
    }

    /// Whether the named input went down this frame. False when the group is
    /// unknown or disabled.
    pub fn is_just_pressed(&self, group: &str, name: &str) -> bool {
        self.input_state(group, name).is_some_and(|s| s.just_pressed)
    }

    /// Whether the named input went up this frame. False when the group is
    /// unknown or disabled.
    pub fn is_just_released(&self, group: &str, name: &str) -> bool {
        self.input_state(group, name).is_some_and(|s| s.just_released)
    }

    /// Look up an input regardless of the group's enabled state.
    pub fn input(&self, group: &str, name: &str) -> Option<&LogicalInput> {
        self.group(group)?.inputs.iter().find(|i| i.name == name)
    }

    /// Inputs of a group, empty when the group is unknown.
    pub fn group_inputs(&self, group: &str) -> &[LogicalInput] {
        self.group(group).map(|g| g.inputs.as_slice()).unwrap_or(&[])
    }

    /// Every input across every group, including disabled ones.
    pub fn all_inputs(&self) -> impl Iterator<Item = &LogicalInput> {
        self.groups.iter().flat_map(|g| g.inputs.iter())
    }

    /// Names of all known groups, in creation order.
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    /// Whether the named group exists and is enabled.
    pub fn is_enabled(&self, group: &str) -> bool {
        self.group(group).is_some_and(|g| g.enabled)
    }

    /// Whether any input in any group is held down.
    pub fn any_pressed(&self) -> bool {
        self.all_inputs().any(|i| i.state.pressed)
    }

    /// Whether any input in any group went down this frame.
    pub fn any_just_pressed(&self) -> bool {
        self.all_inputs().any(|i| i.state.just_pressed)
    }

    /// Whether any input in any group went up this frame.
    pub fn any_just_released(&self) -> bool {
        self.all_inputs().any(|i| i.state.just_released)
    }

    fn any_in(&self, group: &str, select: impl Fn(&EdgeState) -> bool) -> bool {
        self.group(group)
            .is_some_and(|g| g.enabled && g.inputs.iter().any(|i| select(&i.state)))
    }

    /// Whether any input in the group is held down. False when the group is
    /// unknown or disabled.
    pub fn any_pressed_in(&self, group: &str) -> bool {
        self.any_in(group, |s| s.pressed)
    }

    /// Whether any input in the group went down this frame.
    pub fn any_just_pressed_in(&self, group: &str) -> bool {
        self.any_in(group, |s| s.just_pressed)
    }

    /// Whether any input in the group went up this frame.
    pub fn any_just_released_in(&self, group: &str) -> bool {
        self.any_in(group, |s| s.just_released)
    }

    /// Input names across all groups matching the selector, de-duplicated in
    /// first-seen order.
    fn collect_names(&self, select: impl Fn(&EdgeState) -> bool) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for input in self.all_inputs() {
            if select(&input.state) && !names.iter().any(|n| n == &input.name) {
                names.push(input.name.clone());
            }
        }
        names
    }

    fn collect_names_in(&self, group: &str, select: impl Fn(&EdgeState) -> bool) -> Vec<String> {
        let Some(group) = self.group(group) else {
            return Vec::new();
        };
        if !group.enabled {
            return Vec::new();
        }
        group
            .inputs
            .iter()
            .filter(|i| select(&i.state))
            .map(|i| i.name.clone())
            .collect()
    }

    /// Names of all held inputs across all groups, de-duplicated.
    pub fn pressed_names(&self) -> Vec<String> {
        self.collect_names(|s| s.pressed)
    }

    /// Names of all inputs that went down this frame, de-duplicated.
    pub fn just_pressed_names(&self) -> Vec<String> {
        self.collect_names(|s| s.just_pressed)
    }

    /// Names of all inputs that went up this frame, de-duplicated.
    pub fn just_released_names(&self) -> Vec<String> {
        self.collect_names(|s| s.just_released)
    }

    /// Names of held inputs in a group. Empty when the group is unknown or
    /// disabled.
    pub fn pressed_names_in(&self, group: &str) -> Vec<String> {
        self.collect_names_in(group, |s| s.pressed)
    }

    /// Names of inputs in a group that went down this frame.
    pub fn just_pressed_names_in(&self, group: &str) -> Vec<String> {
        self.collect_names_in(group, |s| s.just_pressed)
    }

    /// Names of inputs in a group that went up this frame.
    pub fn just_released_names_in(&self, group: &str) -> Vec<String> {
        self.collect_names_in(group, |s| s.just_released)
    }
}
