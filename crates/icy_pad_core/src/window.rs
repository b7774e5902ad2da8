//! One editor window: a document, its edit state and the glue between menu
//! commands and the document controller.
//!
//! The window never shows anything itself. Anything that needs the user
//! (file dialogs, "save changes?", find, font) is returned as a [`Prompt`];
//! the front-end answers it with another [`Message`].

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::clipboard::ClipboardProvider;
use crate::commands::Command;
use crate::controller::{self, NewDocument, SaveOutcome};
use crate::file_filter::{FileFilter, default_filters};
use crate::layout::wrap_lines;
use crate::{Document, EditState, FindOptions, FontSettings, PadError, Settings, StatusInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Command(Command),
    TypeText(String),
    Backspace,
    SetCaret(usize),
    Select(usize, usize),
    /// Answer to [`Prompt::ChooseOpenPath`]
    OpenPath(PathBuf),
    /// Answer to [`Prompt::ChooseSavePath`]
    SaveAsPath(PathBuf),
    /// Answer to [`Prompt::ConfirmDiscard`]
    Confirm(ConfirmAnswer),
    /// Answer to [`Prompt::FindText`]
    FindText { needle: String, options: FindOptions },
    /// Answer to [`Prompt::ChooseFont`]
    SetFont(FontSettings),
    /// Window close button
    Close,
    /// A dialog was dismissed without an answer
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Save,
    Discard,
    Cancel,
}

/// What to do once the unsaved changes are dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    New,
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// "Save changes to {name}?" with Save / Don't Save / Cancel
    ConfirmDiscard { name: String },
    ChooseOpenPath { filters: Vec<FileFilter> },
    ChooseSavePath { suggested_name: String, filters: Vec<FileFilter> },
    FindText { needle: String, options: FindOptions },
    ChooseFont { current: FontSettings },
}

#[derive(Debug)]
pub enum Notification {
    Loaded(PathBuf),
    Saved(PathBuf),
    TextNotFound(String),
    OpenFailed(PadError),
    SaveFailed(PadError),
}

impl Notification {
    pub fn is_error(&self) -> bool {
        matches!(self, Notification::OpenFailed(_) | Notification::SaveFailed(_))
    }
}

#[derive(Debug)]
pub enum WindowEvent {
    None,
    Prompt(Prompt),
    Notify(Notification),
    /// The user asked for another independent window
    NewWindow,
    /// The user asked to leave the application
    Exit,
    /// The window may be closed now
    Close,
}

pub struct EditorWindow {
    document: Document,
    edit: EditState,
    options: Arc<RwLock<Settings>>,
    pending: Option<PendingAction>,
    last_find: String,
}

impl EditorWindow {
    pub fn new(options: Arc<RwLock<Settings>>) -> Self {
        Self {
            document: Document::new(),
            edit: EditState::new(),
            options,
            pending: None,
            last_find: String::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    pub fn is_modified(&self) -> bool {
        controller::is_unsaved_change_pending(&self.document)
    }

    pub fn status(&self) -> Option<StatusInfo> {
        let options = self.options.read();
        let show = *options.show_status_bar.read();
        show.then(|| StatusInfo::new(&self.document, &self.edit))
    }

    /// Buffer lines as the text widget would show them at `width` columns.
    pub fn visible_lines(&self, width: usize) -> Vec<String> {
        let options = self.options.read();
        let word_wrap = *options.word_wrap.read();
        wrap_lines(self.document.text(), width, word_wrap)
    }

    pub fn update(&mut self, message: Message, clipboard: &mut dyn ClipboardProvider) -> WindowEvent {
        match message {
            Message::Command(command) => self.run_command(command, clipboard),
            Message::TypeText(text) => {
                self.edit.insert_text(&mut self.document, &text);
                WindowEvent::None
            }
            Message::Backspace => {
                self.edit.backspace(&mut self.document);
                WindowEvent::None
            }
            Message::SetCaret(offset) => {
                self.edit.set_caret(&self.document, offset);
                WindowEvent::None
            }
            Message::Select(start, end) => {
                self.edit.select_range(&self.document, start, end);
                WindowEvent::None
            }
            Message::OpenPath(path) => self.file_opened(path),
            Message::SaveAsPath(path) => self.file_saved(path),
            Message::Confirm(answer) => self.confirm(answer),
            Message::FindText { needle, options } => {
                *self.options.read().find.write() = options;
                self.last_find = needle;
                self.find_next()
            }
            Message::SetFont(font) => {
                self.options.read().set_font(font);
                self.options.read().store_persistent();
                WindowEvent::None
            }
            Message::Close => self.request(PendingAction::Close),
            Message::Cancel => {
                self.pending = None;
                WindowEvent::None
            }
        }
    }

    fn run_command(&mut self, command: Command, clipboard: &mut dyn ClipboardProvider) -> WindowEvent {
        match command {
            Command::NewFile => self.request(PendingAction::New),
            Command::NewWindow => WindowEvent::NewWindow,
            Command::Open => self.request(PendingAction::Open),
            Command::Save => self.save_file(),
            Command::SaveAs => self.save_file_as(),
            Command::Exit => WindowEvent::Exit,
            Command::Undo => {
                self.edit.undo(&mut self.document);
                WindowEvent::None
            }
            Command::Redo => {
                self.edit.redo(&mut self.document);
                WindowEvent::None
            }
            Command::Cut => {
                self.edit.cut(&mut self.document, clipboard);
                WindowEvent::None
            }
            Command::Copy => {
                self.edit.copy(&self.document, clipboard);
                WindowEvent::None
            }
            Command::Paste => {
                self.edit.paste(&mut self.document, clipboard);
                WindowEvent::None
            }
            Command::Delete => {
                self.edit.delete(&mut self.document);
                WindowEvent::None
            }
            Command::SelectAll => {
                self.edit.select_all(&self.document);
                WindowEvent::None
            }
            Command::InsertTimeDate => {
                self.edit.insert_time_date(&mut self.document);
                WindowEvent::None
            }
            Command::Find => {
                let needle = self
                    .edit
                    .selected_text(&self.document)
                    .filter(|s| !s.contains('\n'))
                    .map(str::to_string)
                    .unwrap_or_else(|| self.last_find.clone());
                let options = *self.options.read().find.read();
                WindowEvent::Prompt(Prompt::FindText { needle, options })
            }
            Command::FindNext => {
                if self.last_find.is_empty() {
                    self.run_command(Command::Find, clipboard)
                } else {
                    self.find_next()
                }
            }
            Command::ToggleWordWrap => {
                let options = self.options.read();
                let wrap = options.toggle_word_wrap();
                options.store_persistent();
                log::debug!("Word wrap {}", if wrap { "on" } else { "off" });
                WindowEvent::None
            }
            Command::ChooseFont => {
                let current = self.options.read().font.read().clone();
                WindowEvent::Prompt(Prompt::ChooseFont { current })
            }
            Command::ToggleStatusBar => {
                let options = self.options.read();
                options.toggle_status_bar();
                options.store_persistent();
                WindowEvent::None
            }
        }
    }

    /// Start `action`, asking about unsaved changes first.
    fn request(&mut self, action: PendingAction) -> WindowEvent {
        if controller::is_unsaved_change_pending(&self.document) {
            self.pending = Some(action);
            return WindowEvent::Prompt(Prompt::ConfirmDiscard {
                name: self.document.display_name(),
            });
        }
        self.perform(action)
    }

    fn perform(&mut self, action: PendingAction) -> WindowEvent {
        self.pending = None;
        match action {
            PendingAction::New => {
                if controller::new_document(&mut self.document) == NewDocument::ConfirmDiscard {
                    controller::discard(&mut self.document);
                }
                self.edit.reset();
                WindowEvent::None
            }
            PendingAction::Open => WindowEvent::Prompt(Prompt::ChooseOpenPath { filters: default_filters() }),
            PendingAction::Close => WindowEvent::Close,
        }
    }

    fn confirm(&mut self, answer: ConfirmAnswer) -> WindowEvent {
        let Some(action) = self.pending else {
            return WindowEvent::None;
        };
        match answer {
            ConfirmAnswer::Save => self.save_file(),
            ConfirmAnswer::Discard => {
                if action == PendingAction::New {
                    controller::discard(&mut self.document);
                }
                self.perform(action)
            }
            ConfirmAnswer::Cancel => {
                self.pending = None;
                WindowEvent::None
            }
        }
    }

    fn save_file(&mut self) -> WindowEvent {
        match controller::save(&mut self.document) {
            Ok(SaveOutcome::Saved(path)) => self.after_save(path),
            Ok(SaveOutcome::NeedsPath) => self.save_file_as(),
            Err(err) => {
                self.pending = None;
                WindowEvent::Notify(Notification::SaveFailed(err))
            }
        }
    }

    fn save_file_as(&mut self) -> WindowEvent {
        let suggested_name = self
            .document
            .file_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled.txt".to_string());
        WindowEvent::Prompt(Prompt::ChooseSavePath {
            suggested_name,
            filters: default_filters(),
        })
    }

    /// Save-as target chosen
    fn file_saved(&mut self, path: PathBuf) -> WindowEvent {
        match controller::save_as(&mut self.document, &path) {
            Ok(()) => self.after_save(path),
            Err(err) => {
                self.pending = None;
                WindowEvent::Notify(Notification::SaveFailed(err))
            }
        }
    }

    fn after_save(&mut self, path: PathBuf) -> WindowEvent {
        self.options.write().recent_files.add_recent_file(&path);
        if let Some(action) = self.pending.take() {
            return self.perform(action);
        }
        WindowEvent::Notify(Notification::Saved(path))
    }

    fn file_opened(&mut self, path: PathBuf) -> WindowEvent {
        match controller::load(&mut self.document, &path) {
            Ok(()) => {
                self.edit.reset();
                self.options.write().recent_files.add_recent_file(&path);
                WindowEvent::Notify(Notification::Loaded(path))
            }
            Err(err) => {
                log::error!("Error loading file '{}': {}", path.display(), err);
                WindowEvent::Notify(Notification::OpenFailed(err))
            }
        }
    }

    fn find_next(&mut self) -> WindowEvent {
        let options = *self.options.read().find.read();
        match self.edit.find(&self.document, &self.last_find, &options) {
            Some(_) => WindowEvent::None,
            None => WindowEvent::Notify(Notification::TextNotFound(self.last_find.clone())),
        }
    }
}
