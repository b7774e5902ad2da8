pub mod clipboard;
pub mod commands;
pub mod controller;
mod document;
pub mod edit;
mod error;
pub mod file_filter;
pub mod find;
pub mod layout;
pub mod recent_files;
pub mod settings;
mod status;
pub mod window;
pub mod window_manager;

pub use clipboard::{ClipboardProvider, MemoryClipboard, SystemClipboard, default_clipboard};
pub use controller::{NewDocument, OpenRequest, Request, Response, SaveAsRequest, SaveOutcome};
pub use document::{Document, DocumentState, UNTITLED};
pub use edit::EditState;
pub use error::{PadError, Result};
pub use file_filter::FileFilter;
pub use find::{FindDirection, FindOptions};
pub use recent_files::MostRecentlyUsedFiles;
pub use settings::{FontSettings, Settings};
pub use status::StatusInfo;
pub use window::{ConfirmAnswer, EditorWindow, Message, Notification, Prompt, WindowEvent};
pub use window_manager::{WindowId, WindowManager};
