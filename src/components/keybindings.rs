//! Keybinding system for context-aware keyboard shortcuts
//!
//! Bindings depend on what has focus: text inputs accept editing keys, the submit
//! button accepts activation. Unbound printable keys are treated as text input by
//! the form view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// What currently has focus, for binding lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusKind {
    TextInput,
    Button,
}

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NextField,
    PreviousField,
    Activate,
    DeleteChar,
    ClearField,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Unmodified bindings tolerate Shift (terminals report BackTab and capitals
    /// with it) but not Ctrl or Alt.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        if self.modifiers.is_empty() {
            !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        } else {
            event.modifiers.contains(self.modifiers)
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Focus-specific keybindings
    focus_bindings: HashMap<FocusKind, Vec<Keybinding>>,
    /// Global keybindings (available regardless of focus)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            focus_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
            Keybinding::new(KeyCode::Down, KeyAction::NextField, "Down", "Next field"),
            Keybinding::new(KeyCode::BackTab, KeyAction::PreviousField, "S-Tab", "Previous field"),
            Keybinding::new(KeyCode::Up, KeyAction::PreviousField, "Up", "Previous field"),
            Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.focus_bindings.insert(
            FocusKind::TextInput,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::NextField, "Enter", "Next field"),
                Keybinding::new(KeyCode::Backspace, KeyAction::DeleteChar, "Bksp", "Delete"),
                Keybinding::with_modifiers(
                    KeyCode::Char('u'),
                    KeyModifiers::CONTROL,
                    KeyAction::ClearField,
                    "Ctrl+U",
                    "Clear",
                ),
            ],
        );

        self.focus_bindings.insert(
            FocusKind::Button,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Activate, "Enter", "Create account"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Activate, "Space", "Create account"),
            ],
        );
    }

    /// Get keybindings for a focus kind (focus-specific first, then global)
    pub fn get_bindings(&self, focus: FocusKind) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(focus_bindings) = self.focus_bindings.get(&focus) {
            bindings.extend(focus_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key event to an action, if bound
    pub fn resolve(&self, focus: FocusKind, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(focus)
            .into_iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Get navigation bar items for display, one per action
    pub fn get_nav_items(&self, focus: FocusKind) -> Vec<NavBarItem> {
        let priority_actions = match focus {
            FocusKind::TextInput => vec![
                KeyAction::NextField,
                KeyAction::PreviousField,
                KeyAction::ClearField,
                KeyAction::Quit,
            ],
            FocusKind::Button => vec![
                KeyAction::Activate,
                KeyAction::PreviousField,
                KeyAction::Quit,
            ],
        };

        let bindings = self.get_bindings(focus);
        priority_actions
            .into_iter()
            .filter_map(|action| bindings.iter().find(|b| b.action == action))
            .map(|binding| NavBarItem {
                key_display: binding.display.clone(),
                action_label: binding.description.clone(),
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}
