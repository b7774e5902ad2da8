//! TOML loader for command definitions

use serde::Deserialize;

use super::{CommandDef, CommandSet};
use crate::Result;

/// Raw command definition as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct CommandToml {
    pub id: String,
    #[serde(default)]
    pub hotkey: Vec<String>,
    #[serde(default)]
    pub hotkey_mac: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CommandsFile {
    #[serde(default)]
    commands: Vec<CommandToml>,
}

impl CommandToml {
    pub fn into_command_def(self) -> CommandDef {
        let hotkeys: Vec<&str> = self.hotkey.iter().map(String::as_str).collect();
        let hotkeys_mac: Vec<&str> = self.hotkey_mac.iter().map(String::as_str).collect();
        CommandDef::new(self.id).with_hotkeys(&hotkeys).with_hotkeys_mac(&hotkeys_mac)
    }
}

/// Load commands from a TOML string of `[[commands]]` tables
pub fn load_commands_from_str(toml_str: &str) -> Result<CommandSet> {
    let file: CommandsFile = toml::from_str(toml_str)?;
    let mut set = CommandSet::new();
    for cmd in file.commands {
        set.add(cmd.into_command_def());
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{KeyCode, Modifiers};
    use crate::PadError;

    const TEST_TOML: &str = r#"
[[commands]]
id = "test.copy"
hotkey = ["Ctrl+C"]
hotkey_mac = ["Cmd+C"]

[[commands]]
id = "test.nokey"
"#;

    #[test]
    fn test_load() {
        let set = load_commands_from_str(TEST_TOML).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("test.nokey").unwrap().primary_hotkey().is_none());

        #[cfg(not(target_os = "macos"))]
        assert_eq!(set.match_key(KeyCode::Char('C'), Modifiers::CTRL), Some("test.copy"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(load_commands_from_str("[[commands]]\nhotkey = 3"), Err(PadError::Commands(_))));
    }
}
