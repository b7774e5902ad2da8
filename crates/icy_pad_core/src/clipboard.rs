//! Clipboard access for cut/copy/paste
//!
//! The edit state only talks to [`ClipboardProvider`]. The system clipboard
//! is used by the application; [`MemoryClipboard`] is used when no system
//! clipboard is available (headless sessions, tests).

use clipboard_rs::{Clipboard, ClipboardContext};

pub trait ClipboardProvider {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// Clipboard held in process memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

pub struct SystemClipboard {
    context: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> Option<Self> {
        match ClipboardContext::new() {
            Ok(context) => Some(Self { context }),
            Err(err) => {
                log::warn!("System clipboard not available: {}", err);
                None
            }
        }
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self.context.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                log::warn!("Failed to read clipboard: {}", err);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Err(err) = self.context.set_text(text.to_string()) {
            log::error!("Failed to set clipboard text: {}", err);
        }
    }
}

/// The system clipboard if there is one, otherwise an in-memory fallback.
pub fn default_clipboard() -> Box<dyn ClipboardProvider> {
    match SystemClipboard::new() {
        Some(clipboard) => Box::new(clipboard),
        None => Box::new(MemoryClipboard::new()),
    }
}
