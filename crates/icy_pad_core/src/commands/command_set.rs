//! Command Set
//!
//! A collection of command definitions that can match keyboard events.

use std::collections::HashMap;

use super::{CommandDef, Hotkey, KeyCode, Modifiers};

#[derive(Debug, Default)]
pub struct CommandSet {
    /// Commands indexed by their ID
    commands: HashMap<String, CommandDef>,

    /// Hotkey -> command ID
    hotkey_map: HashMap<Hotkey, String>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: CommandDef) {
        let id = command.id.clone();
        for hotkey in command.active_hotkeys() {
            self.hotkey_map.insert(*hotkey, id.clone());
        }
        self.commands.insert(id, command);
    }

    pub fn get(&self, id: &str) -> Option<&CommandDef> {
        self.commands.get(id)
    }

    pub fn match_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<&str> {
        self.match_hotkey(&Hotkey::new(key, modifiers))
    }

    pub fn match_hotkey(&self, hotkey: &Hotkey) -> Option<&str> {
        self.hotkey_map.get(hotkey).map(|s| s.as_str())
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandDef> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Hotkeys bound to more than one command
    pub fn find_conflicts(&self) -> Vec<(Hotkey, Vec<String>)> {
        let mut hotkey_to_commands: HashMap<Hotkey, Vec<String>> = HashMap::new();
        for (id, cmd) in &self.commands {
            for hotkey in cmd.active_hotkeys() {
                hotkey_to_commands.entry(*hotkey).or_default().push(id.clone());
            }
        }
        hotkey_to_commands.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_set() -> CommandSet {
        let mut set = CommandSet::new();
        set.add(CommandDef::new("copy").with_hotkeys(&["Ctrl+C"]).with_hotkeys_mac(&["Cmd+C"]));
        set.add(CommandDef::new("paste").with_hotkeys(&["Ctrl+V"]).with_hotkeys_mac(&["Cmd+V"]));
        set
    }

    #[test]
    fn test_match_key() {
        let set = create_test_set();

        #[cfg(not(target_os = "macos"))]
        {
            assert_eq!(set.match_key(KeyCode::Char('C'), Modifiers::CTRL), Some("copy"));
            assert_eq!(set.match_key(KeyCode::Char('V'), Modifiers::CTRL), Some("paste"));
        }

        assert!(set.match_key(KeyCode::Char('X'), Modifiers::NONE).is_none());
    }

    #[test]
    fn test_find_conflicts() {
        let mut set = CommandSet::new();
        set.add(CommandDef::new("cmd1").with_hotkeys(&["Ctrl+C"]));
        set.add(CommandDef::new("cmd2").with_hotkeys(&["Ctrl+C"]));
        assert_eq!(set.find_conflicts().len(), 1);
    }
}
