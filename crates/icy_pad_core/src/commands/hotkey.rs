//! Menu accelerators
//!
//! Accelerators are written as text in the command table ("Ctrl+Shift+S",
//! "F5", "Del") and parsed into [`Hotkey`] values the window manager can
//! look up.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Command key on macOS
    pub cmd: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        cmd: false,
    };

    pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };
    pub const SHIFT: Self = Self { shift: true, ..Self::NONE };
    pub const CMD: Self = Self { cmd: true, ..Self::NONE };
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        ..Self::NONE
    };
    pub const CMD_SHIFT: Self = Self {
        cmd: true,
        shift: true,
        ..Self::NONE
    };

    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.cmd
    }

    pub fn none(&self) -> bool {
        !self.any()
    }

    fn names(&self) -> Vec<&'static str> {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.cmd {
            parts.push("Cmd");
        }
        parts
    }

    /// Strip one leading modifier (`ctrl+`, `alt+` ...) from `s`.
    /// Returns the rest of the string if a modifier was found.
    fn strip_one<'a>(&mut self, s: &'a str) -> Option<&'a str> {
        const PREFIXES: &[(&str, u8)] = &[
            ("ctrl+", 0),
            ("control+", 0),
            ("alt+", 1),
            ("opt+", 1),
            ("option+", 1),
            ("shift+", 2),
            ("cmd+", 3),
            ("command+", 3),
            ("meta+", 3),
            ("super+", 3),
        ];
        let lower = s.to_ascii_lowercase();
        for (prefix, which) in PREFIXES {
            if lower.starts_with(prefix) {
                match which {
                    0 => self.ctrl = true,
                    1 => self.alt = true,
                    2 => self.shift = true,
                    _ => self.cmd = true,
                }
                return Some(&s[prefix.len()..]);
            }
        }
        None
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("+"))
    }
}

/// A keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Letter (stored upper case), digit or printable symbol
    Char(char),
    /// Function key F1..F12
    F(u8),
    Escape,
    Tab,
    Space,
    Backspace,
    Enter,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl KeyCode {
    /// Parse a key name like "A", "F5", "Del" or "+"
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                ' ' => Some(Self::Space),
                c if c.is_ascii_alphanumeric() || "+-=[]\\;',./`".contains(c) => Some(Self::Char(c.to_ascii_uppercase())),
                _ => None,
            };
        }

        let lower = s.to_ascii_lowercase();
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            return (1..=12).contains(&n).then_some(Self::F(n));
        }

        match lower.as_str() {
            "escape" | "esc" => Some(Self::Escape),
            "tab" => Some(Self::Tab),
            "space" => Some(Self::Space),
            "backspace" => Some(Self::Backspace),
            "enter" | "return" => Some(Self::Enter),
            "delete" | "del" => Some(Self::Delete),
            "insert" | "ins" => Some(Self::Insert),
            "home" => Some(Self::Home),
            "end" => Some(Self::End),
            "pageup" | "pgup" => Some(Self::PageUp),
            "pagedown" | "pgdn" => Some(Self::PageDown),
            "arrowup" | "up" => Some(Self::ArrowUp),
            "arrowdown" | "down" => Some(Self::ArrowDown),
            "arrowleft" | "left" => Some(Self::ArrowLeft),
            "arrowright" | "right" => Some(Self::ArrowRight),
            "plus" => Some(Self::Char('+')),
            "minus" => Some(Self::Char('-')),
            "equals" => Some(Self::Char('=')),
            _ => None,
        }
    }

    /// Display name for menus
    pub fn name(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::F(n) => format!("F{}", n),
            Self::Escape => "Escape".to_string(),
            Self::Tab => "Tab".to_string(),
            Self::Space => "Space".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Delete => "Del".to_string(),
            Self::Insert => "Insert".to_string(),
            Self::Home => "Home".to_string(),
            Self::End => "End".to_string(),
            Self::PageUp => "PageUp".to_string(),
            Self::PageDown => "PageDown".to_string(),
            Self::ArrowUp => "Up".to_string(),
            Self::ArrowDown => "Down".to_string(),
            Self::ArrowLeft => "Left".to_string(),
            Self::ArrowRight => "Right".to_string(),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Key plus modifiers. Stored in TOML as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hotkey::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid hotkey: '{}'", s)))
    }
}

impl Hotkey {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parse a hotkey string like "Ctrl+Shift+N" or "Ctrl++" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let mut remaining = s.trim();
        if remaining.is_empty() {
            return None;
        }

        let mut modifiers = Modifiers::default();
        while let Some(rest) = modifiers.strip_one(remaining) {
            remaining = rest;
        }

        let key = KeyCode::parse(remaining)?;
        Some(Self { key, modifiers })
    }

    pub fn matches(&self, key: KeyCode, modifiers: Modifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.modifiers.names().into_iter().map(str::to_string).collect();
        parts.push(self.key.name());
        write!(f, "{}", parts.join("+"))
    }
}
