use crate::tui::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Maps KeyEvents to Actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings_list: Vec<KeyBinding>,
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings_list = vec![
            // Navigation - Arrow keys
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("Left", Action::MoveLeft),
            KeyBinding::new("Right", Action::MoveRight),
            KeyBinding::new("BackTab", Action::MoveLeft),
            KeyBinding::new("Tab", Action::MoveRight),
            // Navigation - Vim-style
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("h", Action::MoveLeft),
            KeyBinding::new("l", Action::MoveRight),
            KeyBinding::new("Home", Action::Home),
            KeyBinding::new("End", Action::End),
            // Filters
            KeyBinding::new("f", Action::OpenFilterMenu),
            KeyBinding::new("a", Action::OpenFilterMenu),
            KeyBinding::new("c", Action::OpenConditionMenu),
            KeyBinding::new("v", Action::OpenValuesMenu),
            KeyBinding::new("i", Action::OpenFilterIdentityMenu),
            KeyBinding::new("x", Action::RemoveFilter),
            KeyBinding::new("Delete", Action::RemoveFilter),
            KeyBinding::new("Ctrl+r", Action::ClearFilters),
            // Help
            KeyBinding::new("?", Action::ToggleHelp),
            KeyBinding::new("F1", Action::ToggleHelp),
            // Application
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Ctrl+c", Action::Quit),
            KeyBinding::new("Esc", Action::Cancel),
            KeyBinding::new("Enter", Action::Confirm),
            KeyBinding::new("Space", Action::Confirm),
        ];

        Self::from_list(bindings_list)
    }
}

impl KeyBindings {
    pub fn from_list(bindings_list: Vec<KeyBinding>) -> Self {
        let bindings_map = Self::build_map(&bindings_list);
        Self {
            bindings_list,
            bindings_map,
        }
    }

    /// Build hashmap from bindings list
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::from_string(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    /// Rebind keys; an override replaces any existing binding for the same key
    pub fn apply_overrides(&mut self, overrides: &[KeyBinding]) {
        for binding in overrides {
            self.bindings_list.retain(|b| b.key != binding.key);
            self.bindings_list.push(binding.clone());
        }
        self.bindings_map = Self::build_map(&self.bindings_list);
    }

    /// Get all bindings for an action (for help display)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }

    /// Check for actions that don't have any keybindings
    /// Returns Vec of (Action, description) for unbound actions
    pub fn get_unbound_actions(&self) -> Vec<(Action, &'static str)> {
        let bound_actions: HashSet<Action> = self.bindings_list.iter().map(|b| b.action).collect();

        Action::all()
            .into_iter()
            .filter(|action| !bound_actions.contains(action))
            .map(|action| (action, action.description()))
            .collect()
    }

    /// Validate bindings and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        // Check for duplicate key bindings
        let mut seen_keys: HashMap<String, Action> = HashMap::new();
        for binding in &self.bindings_list {
            if let Some(existing_action) = seen_keys.get(&binding.key) {
                warnings.push(format!(
                    "Duplicate key '{}': bound to both {:?} and {:?}",
                    binding.key, existing_action, binding.action
                ));
            } else {
                seen_keys.insert(binding.key.clone(), binding.action);
            }
        }

        let unbound = self.get_unbound_actions();
        if !unbound.is_empty() {
            warnings.push(format!(
                "Warning: {} action(s) have no keybindings: {}",
                unbound.len(),
                unbound
                    .iter()
                    .map(|(action, _)| format!("{:?}", action))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        for binding in &self.bindings_list {
            if KeyPattern::from_string(&binding.key).is_err() {
                warnings.push(format!(
                    "Invalid key pattern '{}' for action {:?}",
                    binding.key, binding.action
                ));
            }
        }

        warnings
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Characters carry their own case, so SHIFT is dropped for them
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self {
            code: event.code,
            modifiers,
        }
    }

    /// Parse from string (e.g., "Ctrl+c", "?", "a")
    pub fn from_string(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('+').collect();

        let mut modifiers = KeyModifiers::empty();
        let key_part = if parts.len() > 1 {
            for part in &parts[..parts.len() - 1] {
                match part.to_lowercase().as_str() {
                    "ctrl" => modifiers |= KeyModifiers::CONTROL,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    "cmd" | "command" | "super" => {
                        // Mac Command key maps to SUPER
                        #[cfg(target_os = "macos")]
                        {
                            modifiers |= KeyModifiers::SUPER;
                        }
                        #[cfg(not(target_os = "macos"))]
                        {
                            modifiers |= KeyModifiers::CONTROL; // Fallback to Ctrl on non-Mac
                        }
                    }
                    _ => return Err(format!("Unknown modifier: {}", part)),
                }
            }
            parts[parts.len() - 1]
        } else {
            parts[0]
        };

        // Single characters keep their case
        let mut chars = key_part.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            modifiers.remove(KeyModifiers::SHIFT);
            return Ok(Self {
                code: KeyCode::Char(ch),
                modifiers,
            });
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "insert" | "ins" => KeyCode::Insert,
            "space" => KeyCode::Char(' '),

            // Function keys: F1-F12
            s if s.starts_with('f') && s.len() >= 2 && s.len() <= 3 => match s[1..].parse::<u8>() {
                Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
                _ => return Err(format!("Invalid function key: {}", s)),
            },

            _ => return Err(format!("Unknown key: {}", key_part)),
        };

        // BackTab arrives with SHIFT set
        if code == KeyCode::BackTab {
            modifiers |= KeyModifiers::SHIFT;
        }

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.contains(KeyModifiers::SUPER) {
            parts.push(if cfg!(target_os = "macos") { "Cmd" } else { "Super" }.to_string());
        }
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) && self.code != KeyCode::BackTab {
            parts.push("Shift".to_string());
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };

        parts.push(key_str);
        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pattern_parsing() {
        assert!(KeyPattern::from_string("Ctrl+c").is_ok());
        assert!(KeyPattern::from_string("a").is_ok());
        assert!(KeyPattern::from_string("F1").is_ok());
        assert!(KeyPattern::from_string("Up").is_ok());
        assert!(KeyPattern::from_string("Ctrl+Alt+Delete").is_ok());
        assert!(KeyPattern::from_string("F13").is_err());
        assert!(KeyPattern::from_string("Hyper+x").is_err());
    }

    #[test]
    fn test_mac_command_key() {
        let pattern = KeyPattern::from_string("Cmd+c").unwrap();
        #[cfg(target_os = "macos")]
        assert!(pattern.modifiers.contains(KeyModifiers::SUPER));
        #[cfg(not(target_os = "macos"))]
        assert!(pattern.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_shifted_characters_match_events() {
        let bindings = KeyBindings::default();
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(bindings.get_action(&question), Some(Action::ToggleHelp));

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(bindings.get_action(&back_tab), Some(Action::MoveLeft));

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(bindings.get_action(&space), Some(Action::Confirm));
    }

    #[test]
    fn test_default_bindings_are_valid() {
        let bindings = KeyBindings::default();
        let warnings = bindings.validate();

        for warning in &warnings {
            eprintln!("Warning: {}", warning);
        }

        // Every action is bound and every pattern parses
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert!(bindings.get_unbound_actions().is_empty());
    }

    #[test]
    fn test_apply_overrides() {
        let mut bindings = KeyBindings::default();
        bindings.apply_overrides(&[KeyBinding::new("x", Action::ClearFilters)]);

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(bindings.get_action(&x), Some(Action::ClearFilters));
        assert_eq!(bindings.get_keys_for_action(Action::RemoveFilter), vec!["Delete".to_string()]);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyPattern::from_string("Ctrl+r").unwrap().to_string(), "Ctrl+r");
        assert_eq!(KeyPattern::from_string("Space").unwrap().to_string(), "Space");
        assert_eq!(KeyPattern::from_string("BackTab").unwrap().to_string(), "Shift+Tab");
    }
}
