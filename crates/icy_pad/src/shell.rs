//! Line based front-end
//!
//! Every input line is either text typed into the active window or a
//! `:command`. Prompts raised by a window are printed and the next line
//! answers them.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use icy_pad_core::commands::{Command, Hotkey};
use icy_pad_core::{ConfirmAnswer, FileFilter, FontSettings, Message, Notification, Prompt, WindowEvent, WindowManager};
use thiserror::Error;

use crate::fl;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("command '{0}' needs an argument")]
    MissingArgument(String),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("'{0}' is not a valid hotkey")]
    InvalidHotkey(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    Send(Message),
    /// A menu command. The argument answers the file/find/font prompt the
    /// command raises, if any.
    Command(Command, Option<String>),
    Key(Hotkey),
    Print,
    Windows,
    Focus(usize),
    Recent,
    ClearRecent,
    Help,
}

pub fn parse_line(line: &str) -> Result<Input, InputError> {
    if let Some(rest) = line.strip_prefix("::") {
        return Ok(Input::Text(format!(":{rest}\n")));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Input::Text(format!("{line}\n")));
    };

    let (name, raw_arg) = match rest.split_once(' ') {
        Some((name, arg)) => (name, arg),
        None => (rest.trim(), ""),
    };
    let arg = Some(raw_arg.trim().to_string()).filter(|a| !a.is_empty());
    let name = name.to_ascii_lowercase();
    let required = |arg: Option<String>| arg.ok_or_else(|| InputError::MissingArgument(name.clone()));

    let input = match name.as_str() {
        "new" => Input::Command(Command::NewFile, None),
        "window" => Input::Command(Command::NewWindow, None),
        "open" => Input::Command(Command::Open, arg),
        "save" if arg.is_some() => Input::Command(Command::SaveAs, arg),
        "save" => Input::Command(Command::Save, None),
        "saveas" => Input::Command(Command::SaveAs, arg),
        "exit" | "quit" => Input::Command(Command::Exit, None),
        "undo" => Input::Command(Command::Undo, None),
        "redo" => Input::Command(Command::Redo, None),
        "cut" => Input::Command(Command::Cut, None),
        "copy" => Input::Command(Command::Copy, None),
        "paste" => Input::Command(Command::Paste, None),
        "delete" => Input::Command(Command::Delete, None),
        "find" => Input::Command(Command::Find, arg),
        "findnext" => Input::Command(Command::FindNext, None),
        "selectall" => Input::Command(Command::SelectAll, None),
        "time" => Input::Command(Command::InsertTimeDate, None),
        "wrap" => Input::Command(Command::ToggleWordWrap, None),
        "font" => Input::Command(Command::ChooseFont, arg),
        "statusbar" => Input::Command(Command::ToggleStatusBar, None),
        "type" => Input::Text(required(Some(raw_arg.to_string()).filter(|a| !a.is_empty()))?),
        "backspace" => Input::Send(Message::Backspace),
        "caret" => Input::Send(Message::SetCaret(number(&required(arg)?)?)),
        "select" => {
            let arg = required(arg)?;
            let mut parts = arg.split_whitespace();
            let start = number(parts.next().unwrap_or_default())?;
            let end = number(parts.next().unwrap_or_default())?;
            Input::Send(Message::Select(start, end))
        }
        "key" => {
            let key = required(arg)?;
            Input::Key(Hotkey::parse(&key).ok_or(InputError::InvalidHotkey(key))?)
        }
        "print" => Input::Print,
        "windows" => Input::Windows,
        "focus" => Input::Focus(number(&required(arg)?)?),
        "recent" if arg.as_deref() == Some("clear") => Input::ClearRecent,
        "recent" => Input::Recent,
        "help" => Input::Help,
        _ => return Err(InputError::UnknownCommand(name.clone())),
    };
    Ok(input)
}

fn number(s: &str) -> Result<usize, InputError> {
    s.parse().map_err(|_| InputError::InvalidNumber(s.to_string()))
}

/// Turn a reply line into the message answering `prompt`.
pub fn answer(prompt: &Prompt, reply: &str) -> Message {
    let reply = reply.trim();
    match prompt {
        Prompt::ConfirmDiscard { .. } => match reply.to_ascii_lowercase().as_str() {
            "y" | "yes" => Message::Confirm(ConfirmAnswer::Save),
            "n" | "no" => Message::Confirm(ConfirmAnswer::Discard),
            _ => Message::Confirm(ConfirmAnswer::Cancel),
        },
        _ if reply.is_empty() => Message::Cancel,
        Prompt::ChooseOpenPath { .. } => Message::OpenPath(PathBuf::from(reply)),
        Prompt::ChooseSavePath { .. } => Message::SaveAsPath(PathBuf::from(reply)),
        Prompt::FindText { options, .. } => Message::FindText {
            needle: reply.to_string(),
            options: *options,
        },
        Prompt::ChooseFont { current } => Message::SetFont(parse_font(reply, current)),
    }
}

/// "Courier New 12", "Courier New" or "12"
fn parse_font(reply: &str, current: &FontSettings) -> FontSettings {
    let (family, size) = match reply.rsplit_once(' ') {
        Some((family, size)) if size.parse::<u16>().is_ok() => (family.trim(), size.parse().ok()),
        _ => match reply.parse::<u16>() {
            Ok(size) => ("", Some(size)),
            Err(_) => (reply, None),
        },
    };
    let family = if family.is_empty() { current.family.clone() } else { family.to_string() };
    let mut font = FontSettings::new(family, size.unwrap_or(current.size));
    font.bold = current.bold;
    font.italic = current.italic;
    font
}

fn filter_list(filters: &[FileFilter]) -> String {
    filters.iter().map(FileFilter::pattern).collect::<Vec<_>>().join(", ")
}

/// Reply given together with a command. It only answers the prompt that
/// command raises and waits through any "save changes?" detour.
#[derive(Debug, Clone, PartialEq)]
struct Preset {
    command: Command,
    reply: String,
}

impl Preset {
    fn new(command: Command, reply: Option<String>) -> Option<Self> {
        reply.map(|reply| Self { command, reply })
    }

    fn answers(&self, prompt: &Prompt) -> bool {
        matches!(
            (self.command, prompt),
            (Command::Open, Prompt::ChooseOpenPath { .. })
                | (Command::Save | Command::SaveAs, Prompt::ChooseSavePath { .. })
                | (Command::Find, Prompt::FindText { .. })
                | (Command::ChooseFont, Prompt::ChooseFont { .. })
        )
    }
}

pub struct Shell<W: Write> {
    manager: WindowManager,
    out: W,
    width: usize,
    awaiting: Option<Prompt>,
    /// Argument of a command whose own prompt has not come up yet
    deferred: Option<Preset>,
}

impl<W: Write> Shell<W> {
    pub fn new(manager: WindowManager, out: W, width: usize) -> Self {
        Self {
            manager,
            out,
            width,
            awaiting: None,
            deferred: None,
        }
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn is_running(&self) -> bool {
        !self.manager.is_empty()
    }

    /// Print the greeting and the outcome of the startup file load.
    pub fn start(&mut self, initial: WindowEvent) -> io::Result<()> {
        writeln!(self.out, "{}", fl!("shell-ready", version = crate::VERSION.to_string()))?;
        self.process(initial, None)
    }

    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        for line in input.lines() {
            self.handle_line(&line?)?;
            if !self.is_running() {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<()> {
        let line = line.trim_end_matches('\r');
        if let Some(prompt) = self.awaiting.take() {
            let preset = self.deferred.take();
            return self.send(answer(&prompt, line), preset);
        }

        match parse_line(line) {
            Ok(input) => self.execute(input),
            Err(err) => {
                log::warn!("Invalid input: {}", err);
                self.report(&err)
            }
        }
    }

    fn execute(&mut self, input: Input) -> io::Result<()> {
        match input {
            Input::Text(text) => self.send(Message::TypeText(text), None),
            Input::Send(message) => self.send(message, None),
            Input::Command(command, arg) => self.send(Message::Command(command), Preset::new(command, arg)),
            Input::Key(hotkey) => {
                let Some(id) = self.manager.active_id() else {
                    return Ok(());
                };
                match self.manager.handle_hotkey(id, &hotkey) {
                    Some(event) => self.process(event, None),
                    None => writeln!(self.out, "{}", fl!("shell-unbound-hotkey", key = hotkey.to_string())),
                }
            }
            Input::Print => self.print(),
            Input::Windows => {
                let active = self.manager.active_id();
                for (i, id) in self.manager.window_ids().into_iter().enumerate() {
                    let marker = if Some(id) == active { '*' } else { ' ' };
                    let title = self.manager.window(id).map(|w| w.title()).unwrap_or_default();
                    writeln!(self.out, "{marker}{} {title}", i + 1)?;
                }
                Ok(())
            }
            Input::Focus(index) => {
                let ids = self.manager.window_ids();
                match index.checked_sub(1).and_then(|i| ids.get(i)) {
                    Some(id) => {
                        self.manager.focus(*id);
                        Ok(())
                    }
                    None => writeln!(self.out, "{}", fl!("shell-no-window", index = index.to_string())),
                }
            }
            Input::Recent => {
                let files = self.manager.settings().write().recent_files.get_recent_files().to_vec();
                if files.is_empty() {
                    return writeln!(self.out, "{}", fl!("shell-no-recent-files"));
                }
                for file in files.iter().rev() {
                    writeln!(self.out, "{}", file.display())?;
                }
                Ok(())
            }
            Input::ClearRecent => {
                self.manager.settings().write().recent_files.clear_recent_files();
                Ok(())
            }
            Input::Help => writeln!(self.out, "{}", fl!("shell-help")),
        }
    }

    fn send(&mut self, message: Message, preset: Option<Preset>) -> io::Result<()> {
        let Some(id) = self.manager.active_id() else {
            return Ok(());
        };
        let event = self.manager.update(id, message);
        self.process(event, preset)
    }

    fn process(&mut self, mut event: WindowEvent, mut preset: Option<Preset>) -> io::Result<()> {
        loop {
            match event {
                WindowEvent::None => return Ok(()),
                WindowEvent::Prompt(prompt) => {
                    match preset.take() {
                        Some(reply) if reply.answers(&prompt) => {
                            let Some(id) = self.manager.active_id() else {
                                return Ok(());
                            };
                            event = self.manager.update(id, answer(&prompt, &reply.reply));
                            continue;
                        }
                        other => preset = other,
                    }
                    self.ask(&prompt)?;
                    self.awaiting = Some(prompt);
                    self.deferred = preset;
                    return Ok(());
                }
                WindowEvent::Notify(notification) => return self.notify(&notification),
                WindowEvent::NewWindow => {
                    return writeln!(self.out, "{}", fl!("shell-window-opened", count = self.manager.len().to_string()));
                }
                WindowEvent::Close => return writeln!(self.out, "{}", fl!("shell-window-closed")),
                WindowEvent::Exit => return writeln!(self.out, "{}", fl!("shell-exit")),
            }
        }
    }

    fn ask(&mut self, prompt: &Prompt) -> io::Result<()> {
        let text = match prompt {
            Prompt::ConfirmDiscard { name } => fl!("prompt-confirm-discard", name = name.clone()),
            Prompt::ChooseOpenPath { filters } => fl!("prompt-open-path", filters = filter_list(filters)),
            Prompt::ChooseSavePath { suggested_name, filters } => {
                fl!("prompt-save-path", filters = filter_list(filters), name = suggested_name.clone())
            }
            Prompt::FindText { .. } => fl!("prompt-find"),
            Prompt::ChooseFont { current } => fl!("prompt-font", family = current.family.clone(), size = current.size.to_string()),
        };
        writeln!(self.out, "{text}")
    }

    fn notify(&mut self, notification: &Notification) -> io::Result<()> {
        let text = match notification {
            Notification::Loaded(path) => fl!("notify-loaded", path = path.display().to_string()),
            Notification::Saved(path) => fl!("notify-saved", path = path.display().to_string()),
            Notification::TextNotFound(text) => fl!("notify-not-found", text = text.clone()),
            Notification::OpenFailed(err) => fl!("notify-open-failed", error = err.to_string()),
            Notification::SaveFailed(err) => fl!("notify-save-failed", error = err.to_string()),
        };
        writeln!(self.out, "{text}")
    }

    fn report(&mut self, err: &InputError) -> io::Result<()> {
        let text = match err {
            InputError::UnknownCommand(name) => fl!("shell-unknown-command", name = name.clone()),
            InputError::MissingArgument(name) => fl!("shell-missing-argument", name = name.clone()),
            InputError::InvalidNumber(value) => fl!("shell-invalid-number", value = value.clone()),
            InputError::InvalidHotkey(key) => fl!("shell-invalid-hotkey", key = key.clone()),
        };
        writeln!(self.out, "{text}")
    }

    fn print(&mut self) -> io::Result<()> {
        let Some(window) = self.manager.active() else {
            return Ok(());
        };
        writeln!(self.out, "{}", fl!("shell-title", title = window.title()))?;
        for line in window.visible_lines(self.width) {
            writeln!(self.out, "{line}")?;
        }
        if let Some(status) = window.status() {
            writeln!(self.out, "{status}")?;
        }
        Ok(())
    }
}
