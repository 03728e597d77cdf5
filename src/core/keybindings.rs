//! Dismiss keybindings for the tutorial modal.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// How the user asked to leave the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissAction {
    /// Close control.
    Close,
    /// Click outside the modal.
    Backdrop,
    /// Footer confirmation button.
    Confirm,
}

impl DismissAction {
    pub const ALL: [DismissAction; 3] = [
        DismissAction::Close,
        DismissAction::Backdrop,
        DismissAction::Confirm,
    ];
}

pub type KeyId = String;

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(|item| item.to_string()).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DismissKeybindingsConfig {
    entries: HashMap<DismissAction, KeyBinding>,
}

impl DismissKeybindingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<KeyBinding>>(&mut self, action: DismissAction, keys: K) {
        self.entries.insert(action, keys.into());
    }
}

pub static DEFAULT_DISMISS_KEYBINDINGS: Lazy<HashMap<DismissAction, Vec<KeyId>>> =
    Lazy::new(|| {
        let mut map = HashMap::new();
        map.insert(
            DismissAction::Close,
            vec!["escape".to_string(), "ctrl+c".to_string()],
        );
        map.insert(DismissAction::Backdrop, vec!["q".to_string()]);
        map.insert(DismissAction::Confirm, vec!["enter".to_string()]);
        map
    });

#[derive(Debug, Clone)]
pub struct DismissKeybindings {
    action_to_keys: HashMap<DismissAction, Vec<KeyId>>,
}

impl DismissKeybindings {
    pub fn new(config: DismissKeybindingsConfig) -> Self {
        let mut action_to_keys = (*DEFAULT_DISMISS_KEYBINDINGS).clone();
        for (action, binding) in config.entries {
            let keys = match binding {
                KeyBinding::Single(key) => vec![key],
                KeyBinding::Multiple(keys) => keys,
            };
            action_to_keys.insert(action, keys);
        }
        Self { action_to_keys }
    }

    pub fn matches(&self, key_id: &str, action: DismissAction) -> bool {
        self.action_to_keys
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|key| key == key_id))
    }

    /// First action bound to `key_id`, in `DismissAction::ALL` order.
    pub fn action_for(&self, key_id: &str) -> Option<DismissAction> {
        DismissAction::ALL
            .into_iter()
            .find(|action| self.matches(key_id, *action))
    }

    pub fn get_keys(&self, action: DismissAction) -> Vec<KeyId> {
        self.action_to_keys.get(&action).cloned().unwrap_or_default()
    }
}

impl Default for DismissKeybindings {
    fn default() -> Self {
        Self::new(DismissKeybindingsConfig::default())
    }
}
