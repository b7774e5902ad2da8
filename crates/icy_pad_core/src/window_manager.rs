//! Window Manager
//!
//! Keeps all open editor windows. Each window has its own document; only the
//! settings, the MRU list and the clipboard are shared.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::clipboard::ClipboardProvider;
use crate::commands::{Command, CommandSet, Hotkey, create_pad_commands};
use crate::window::{EditorWindow, Message, WindowEvent};
use crate::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct WindowManager {
    windows: BTreeMap<WindowId, EditorWindow>,
    active: Option<WindowId>,
    next_id: u64,
    options: Arc<RwLock<Settings>>,
    commands: CommandSet,
    clipboard: Box<dyn ClipboardProvider>,
    /// Exit was requested and dirty windows are being asked one by one
    exiting: bool,
}

impl WindowManager {
    /// Manager with a single empty window.
    pub fn new(options: Settings, clipboard: Box<dyn ClipboardProvider>) -> Self {
        let mut manager = Self {
            windows: BTreeMap::new(),
            active: None,
            next_id: 1,
            options: Arc::new(RwLock::new(options)),
            commands: create_pad_commands(),
            clipboard,
            exiting: false,
        };
        manager.open_window();
        manager
    }

    /// Manager with a single window that has `path` loaded.
    /// The returned event reports whether loading worked.
    pub fn with_path(options: Settings, clipboard: Box<dyn ClipboardProvider>, path: PathBuf) -> (Self, WindowEvent) {
        let mut manager = Self::new(options, clipboard);
        let event = match manager.active {
            Some(id) => manager.update(id, Message::OpenPath(path)),
            None => WindowEvent::None,
        };
        (manager, event)
    }

    pub fn open_window(&mut self) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.insert(id, EditorWindow::new(self.options.clone()));
        self.active = Some(id);
        log::info!("Opened window {}", id);
        id
    }

    pub fn settings(&self) -> &Arc<RwLock<Settings>> {
        &self.options
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    pub fn active_id(&self) -> Option<WindowId> {
        self.active
    }

    pub fn active(&self) -> Option<&EditorWindow> {
        self.active.and_then(|id| self.windows.get(&id))
    }

    pub fn window(&self, id: WindowId) -> Option<&EditorWindow> {
        self.windows.get(&id)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn focus(&mut self, id: WindowId) -> bool {
        if self.windows.contains_key(&id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Look up the command bound to `hotkey` and run it in window `id`.
    pub fn handle_hotkey(&mut self, id: WindowId, hotkey: &Hotkey) -> Option<WindowEvent> {
        let command = self.commands.match_hotkey(hotkey).and_then(Command::from_id)?;
        Some(self.update(id, Message::Command(command)))
    }

    pub fn update(&mut self, id: WindowId, message: Message) -> WindowEvent {
        let Some(window) = self.windows.get_mut(&id) else {
            log::warn!("Message for unknown window {}", id);
            return WindowEvent::None;
        };
        let event = window.update(message, self.clipboard.as_mut());
        // Exit only goes on while windows keep asking or closing. A cancel or
        // a failed save stops it.
        if self.exiting && !matches!(event, WindowEvent::Prompt(_) | WindowEvent::Close | WindowEvent::Exit) {
            log::info!("Exit cancelled");
            self.exiting = false;
        }

        match event {
            WindowEvent::NewWindow => {
                self.open_window();
                WindowEvent::NewWindow
            }
            WindowEvent::Close => {
                self.remove(id);
                if self.exiting {
                    return self.continue_exit();
                }
                WindowEvent::Close
            }
            WindowEvent::Exit => self.exit(),
            other => other,
        }
    }

    /// Close every window without unsaved changes, then ask about the
    /// remaining ones one at a time. Returns [`WindowEvent::Exit`] once all
    /// windows are gone.
    pub fn exit(&mut self) -> WindowEvent {
        self.exiting = true;
        let clean: Vec<WindowId> = self.windows.iter().filter(|(_, w)| !w.is_modified()).map(|(id, _)| *id).collect();
        for id in clean {
            self.remove(id);
        }
        self.continue_exit()
    }

    /// Windows that still hold unsaved changes.
    pub fn modified_windows(&self) -> Vec<WindowId> {
        self.windows.iter().filter(|(_, w)| w.is_modified()).map(|(id, _)| *id).collect()
    }

    fn continue_exit(&mut self) -> WindowEvent {
        let Some(id) = self.windows.keys().next().copied() else {
            self.exiting = false;
            return WindowEvent::Exit;
        };
        self.active = Some(id);
        let event = match self.windows.get_mut(&id) {
            Some(window) => window.update(Message::Close, self.clipboard.as_mut()),
            None => return WindowEvent::None,
        };
        match event {
            WindowEvent::Close => {
                self.remove(id);
                self.continue_exit()
            }
            other => other,
        }
    }

    fn remove(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            log::info!("Closed window {}", id);
        }
        if self.active == Some(id) {
            self.active = self.windows.keys().next_back().copied();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::window::{ConfirmAnswer, Notification, Prompt};
    use std::fs;

    fn manager() -> WindowManager {
        WindowManager::new(Settings::default(), Box::new(MemoryClipboard::new()))
    }

    #[test]
    fn test_new_window_is_independent() {
        let mut wm = manager();
        let first = wm.active_id().unwrap();
        wm.update(first, Message::TypeText("one".into()));

        assert!(matches!(wm.update(first, Message::Command(Command::NewWindow)), WindowEvent::NewWindow));
        let second = wm.active_id().unwrap();
        assert_ne!(first, second);
        assert_eq!(wm.len(), 2);
        assert_eq!(wm.window(second).unwrap().document().text(), "");
        assert_eq!(wm.window(first).unwrap().document().text(), "one");
    }

    #[test]
    fn test_clipboard_is_shared() {
        let mut wm = manager();
        let first = wm.active_id().unwrap();
        wm.update(first, Message::TypeText("shared".into()));
        wm.update(first, Message::Command(Command::SelectAll));
        wm.update(first, Message::Command(Command::Copy));

        let second = wm.open_window();
        wm.update(second, Message::Command(Command::Paste));
        assert_eq!(wm.window(second).unwrap().document().text(), "shared");
    }

    #[test]
    fn test_hotkey_dispatch() {
        let mut wm = manager();
        let id = wm.active_id().unwrap();
        let hotkey = wm.commands().get(crate::commands::cmd::WINDOW_NEW).and_then(|c| c.primary_hotkey()).copied().unwrap();
        assert!(matches!(wm.handle_hotkey(id, &hotkey), Some(WindowEvent::NewWindow)));
        assert_eq!(wm.len(), 2);
    }

    #[test]
    fn test_exit_closes_clean_windows() {
        let mut wm = manager();
        wm.open_window();
        assert!(matches!(wm.exit(), WindowEvent::Exit));
        assert!(wm.is_empty());
    }

    #[test]
    fn test_exit_asks_for_dirty_windows() {
        let mut wm = manager();
        let dirty = wm.active_id().unwrap();
        wm.update(dirty, Message::TypeText("unsaved".into()));
        wm.open_window();

        let event = wm.update(dirty, Message::Command(Command::Exit));
        assert!(matches!(event, WindowEvent::Prompt(Prompt::ConfirmDiscard { .. })));
        assert_eq!(wm.window_ids(), vec![dirty]);

        wm.update(dirty, Message::Confirm(ConfirmAnswer::Cancel));
        assert_eq!(wm.len(), 1);

        wm.update(dirty, Message::Command(Command::Exit));
        let event = wm.update(dirty, Message::Confirm(ConfirmAnswer::Discard));
        assert!(matches!(event, WindowEvent::Exit));
        assert!(wm.is_empty());
    }

    #[test]
    fn test_failed_save_during_exit_stops_exit() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let path = sub.join("a.txt");

        let mut wm = manager();
        let dirty = wm.active_id().unwrap();
        wm.update(dirty, Message::TypeText("first".into()));
        wm.update(dirty, Message::SaveAsPath(path.clone()));
        wm.update(dirty, Message::TypeText(" more".into()));
        fs::remove_dir_all(&sub).unwrap();

        let event = wm.update(dirty, Message::Command(Command::Exit));
        assert!(matches!(event, WindowEvent::Prompt(Prompt::ConfirmDiscard { .. })));
        let event = wm.update(dirty, Message::Confirm(ConfirmAnswer::Save));
        assert!(matches!(event, WindowEvent::Notify(Notification::SaveFailed(_))));

        fs::create_dir(&sub).unwrap();
        let event = wm.update(dirty, Message::Command(Command::Save));
        assert!(matches!(event, WindowEvent::Notify(Notification::Saved(_))));

        let scratch = wm.open_window();
        assert!(matches!(wm.update(scratch, Message::Close), WindowEvent::Close));
        assert_eq!(wm.window_ids(), vec![dirty]);
    }

    #[test]
    fn test_close_one_window_keeps_others() {
        let mut wm = manager();
        let first = wm.active_id().unwrap();
        let second = wm.open_window();
        assert!(matches!(wm.update(second, Message::Close), WindowEvent::Close));
        assert_eq!(wm.window_ids(), vec![first]);
        assert_eq!(wm.active_id(), Some(first));
    }
}
