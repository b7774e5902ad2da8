//! Command System
//!
//! String-based menu commands with platform-specific hotkeys, loaded from
//! the embedded `data/commands_pad.toml`.
//!
//! # Example TOML format:
//! ```toml
//! [[commands]]
//! id = "edit.copy"
//! hotkey = ["Ctrl+C"]
//! hotkey_mac = ["Cmd+C"]
//! ```

mod command_def;
mod command_set;
mod hotkey;
mod toml_loader;

pub use command_def::CommandDef;
pub use command_set::CommandSet;
pub use hotkey::{Hotkey, KeyCode, Modifiers};
pub use toml_loader::{CommandToml, load_commands_from_str};

/// The embedded default commands TOML
const PAD_COMMANDS_TOML: &str = include_str!("../../data/commands_pad.toml");

/// Create the command set with the default key bindings
pub fn create_pad_commands() -> CommandSet {
    match load_commands_from_str(PAD_COMMANDS_TOML) {
        Ok(set) => {
            for (hotkey, ids) in set.find_conflicts() {
                log::warn!("Hotkey {} is bound to more than one command: {}", hotkey, ids.join(", "));
            }
            set
        }
        Err(err) => {
            log::error!("Failed to parse embedded commands_pad.toml: {}", err);
            CommandSet::new()
        }
    }
}

/// Command IDs
pub mod cmd {
    pub const FILE_NEW: &str = "file.new";
    pub const WINDOW_NEW: &str = "window.new";
    pub const FILE_OPEN: &str = "file.open";
    pub const FILE_SAVE: &str = "file.save";
    pub const FILE_SAVE_AS: &str = "file.save_as";
    pub const APP_EXIT: &str = "app.exit";

    pub const EDIT_UNDO: &str = "edit.undo";
    pub const EDIT_REDO: &str = "edit.redo";
    pub const EDIT_CUT: &str = "edit.cut";
    pub const EDIT_COPY: &str = "edit.copy";
    pub const EDIT_PASTE: &str = "edit.paste";
    pub const EDIT_DELETE: &str = "edit.delete";
    pub const EDIT_FIND: &str = "edit.find";
    pub const EDIT_FIND_NEXT: &str = "edit.find_next";
    pub const EDIT_SELECT_ALL: &str = "edit.select_all";
    pub const EDIT_TIME_DATE: &str = "edit.time_date";

    pub const FORMAT_WORD_WRAP: &str = "format.word_wrap";
    pub const FORMAT_FONT: &str = "format.font";
    pub const VIEW_STATUS_BAR: &str = "view.status_bar";
}

/// Typed form of a command ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NewFile,
    NewWindow,
    Open,
    Save,
    SaveAs,
    Exit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    Delete,
    Find,
    FindNext,
    SelectAll,
    InsertTimeDate,
    ToggleWordWrap,
    ChooseFont,
    ToggleStatusBar,
}

impl Command {
    pub const ALL: [Command; 19] = [
        Command::NewFile,
        Command::NewWindow,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Exit,
        Command::Undo,
        Command::Redo,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::Delete,
        Command::Find,
        Command::FindNext,
        Command::SelectAll,
        Command::InsertTimeDate,
        Command::ToggleWordWrap,
        Command::ChooseFont,
        Command::ToggleStatusBar,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Command::NewFile => cmd::FILE_NEW,
            Command::NewWindow => cmd::WINDOW_NEW,
            Command::Open => cmd::FILE_OPEN,
            Command::Save => cmd::FILE_SAVE,
            Command::SaveAs => cmd::FILE_SAVE_AS,
            Command::Exit => cmd::APP_EXIT,
            Command::Undo => cmd::EDIT_UNDO,
            Command::Redo => cmd::EDIT_REDO,
            Command::Cut => cmd::EDIT_CUT,
            Command::Copy => cmd::EDIT_COPY,
            Command::Paste => cmd::EDIT_PASTE,
            Command::Delete => cmd::EDIT_DELETE,
            Command::Find => cmd::EDIT_FIND,
            Command::FindNext => cmd::EDIT_FIND_NEXT,
            Command::SelectAll => cmd::EDIT_SELECT_ALL,
            Command::InsertTimeDate => cmd::EDIT_TIME_DATE,
            Command::ToggleWordWrap => cmd::FORMAT_WORD_WRAP,
            Command::ChooseFont => cmd::FORMAT_FONT,
            Command::ToggleStatusBar => cmd::VIEW_STATUS_BAR,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }
}
