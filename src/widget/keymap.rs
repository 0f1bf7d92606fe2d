//! Key bindings with help labels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key plus modifiers, with a short help label for key hint bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
    /// How the key is shown in help (e.g. "←").
    pub help_key: &'static str,
    /// What the key does, may be empty.
    pub help_desc: &'static str,
}

impl KeyBinding {
    /// A binding with the given modifiers.
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self {
            code,
            modifiers,
            help_key: "",
            help_desc: "",
        }
    }

    /// A binding without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    /// A binding with Ctrl held.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// Attach help text.
    #[must_use]
    pub const fn with_help(mut self, key: &'static str, desc: &'static str) -> Self {
        self.help_key = key;
        self.help_desc = desc;
        self
    }

    /// Check whether a key event triggers this binding.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.modifiers
    }
}
