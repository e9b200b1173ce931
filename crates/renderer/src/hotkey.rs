use keyconfig::{Keybind, KeybindConfig};
use tracing::info;

/// What a key press meant to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Visibility flipped; carries the new state.
    Toggled(bool),
    Exit,
    Ignored,
}

/// Owns the visibility flag and decides what each key press does.
///
/// Lives inside the render loop; the input callback mutates it and the draw
/// step reads it on the same thread.
#[derive(Debug, Clone)]
pub struct HotkeyHandler {
    visible: bool,
    keybind: Keybind,
    exit_key: Keybind,
}

impl HotkeyHandler {
    pub fn new(keybind: Keybind, exit_key: Keybind) -> Self {
        Self {
            visible: true,
            keybind,
            exit_key,
        }
    }

    pub fn from_config(config: &KeybindConfig) -> Self {
        Self::new(config.keybind.clone(), config.exit_key())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn keybind(&self) -> &Keybind {
        &self.keybind
    }

    pub fn exit_key(&self) -> &Keybind {
        &self.exit_key
    }

    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Handles one key event. Releases and auto-repeats are ignored. When the
    /// toggle key and the exit key are the same, toggling wins.
    pub fn handle_key(&mut self, name: &str, pressed: bool, repeat: bool) -> KeyOutcome {
        if !pressed || repeat {
            return KeyOutcome::Ignored;
        }

        if self.keybind.matches(name) {
            let visible = self.toggle();
            info!(visible, key = %self.keybind, "image visibility toggled");
            KeyOutcome::Toggled(visible)
        } else if self.exit_key.matches(name) {
            info!(key = %self.exit_key, "exit key pressed");
            KeyOutcome::Exit
        } else {
            KeyOutcome::Ignored
        }
    }
}

impl Default for HotkeyHandler {
    fn default() -> Self {
        Self::from_config(&KeybindConfig::default())
    }
}
