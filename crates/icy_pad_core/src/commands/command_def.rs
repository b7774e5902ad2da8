//! Command Definition
//!
//! A single menu command with its ID and platform-specific hotkeys.

use serde::{Deserialize, Serialize};

use super::Hotkey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique identifier, e.g. `file.save`
    pub id: String,

    /// Hotkeys for Windows/Linux
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hotkeys: Vec<Hotkey>,

    /// Hotkeys for macOS (falls back to `hotkeys` if empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hotkeys_mac: Vec<Hotkey>,
}

impl CommandDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hotkeys: Vec::new(),
            hotkeys_mac: Vec::new(),
        }
    }

    /// Add hotkeys for Windows/Linux; unparsable strings are skipped.
    pub fn with_hotkeys(mut self, hotkeys: &[&str]) -> Self {
        self.hotkeys.extend(hotkeys.iter().filter_map(|s| Hotkey::parse(s)));
        self
    }

    /// Add hotkeys for macOS; unparsable strings are skipped.
    pub fn with_hotkeys_mac(mut self, hotkeys: &[&str]) -> Self {
        self.hotkeys_mac.extend(hotkeys.iter().filter_map(|s| Hotkey::parse(s)));
        self
    }

    /// Hotkeys for the platform we are running on
    pub fn active_hotkeys(&self) -> &[Hotkey] {
        if cfg!(target_os = "macos") && !self.hotkeys_mac.is_empty() {
            &self.hotkeys_mac
        } else {
            &self.hotkeys
        }
    }

    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }

    pub fn hotkeys_mac(&self) -> &[Hotkey] {
        &self.hotkeys_mac
    }

    /// Hotkey shown next to the menu entry
    pub fn primary_hotkey(&self) -> Option<&Hotkey> {
        self.active_hotkeys().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{KeyCode, Modifiers};

    #[test]
    fn test_with_hotkeys() {
        let cmd = CommandDef::new("edit.copy").with_hotkeys(&["Ctrl+C", "bogus+"]).with_hotkeys_mac(&["Cmd+C"]);

        assert_eq!(cmd.hotkeys().len(), 1);
        assert!(cmd.hotkeys()[0].matches(KeyCode::Char('C'), Modifiers::CTRL));
        assert!(cmd.hotkeys_mac()[0].matches(KeyCode::Char('C'), Modifiers::CMD));
    }

    #[test]
    fn test_no_hotkey() {
        let cmd = CommandDef::new("format.font");
        assert!(cmd.primary_hotkey().is_none());
    }

    #[test]
    fn test_serde_skips_empty_hotkeys() {
        let toml_str = toml::to_string(&CommandDef::new("format.font")).unwrap();
        assert!(!toml_str.contains("hotkeys"));

        let cmd = CommandDef::new("file.save").with_hotkeys(&["Ctrl+S"]);
        let parsed: CommandDef = toml::from_str(&toml::to_string(&cmd).unwrap()).unwrap();
        assert_eq!(parsed.id, "file.save");
        assert_eq!(parsed.hotkeys().len(), 1);
    }
}
