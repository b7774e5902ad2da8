#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use icy_pad_core::{Settings, WindowEvent, WindowManager, default_clipboard};
use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use semver::Version;

mod shell;

use shell::Shell;

lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| Version::new(0, 1, 0));
}

#[derive(rust_embed::RustEmbed)]
#[folder = "i18n"]
struct Localizations;

static LANGUAGE_LOADER: Lazy<i18n_embed::fluent::FluentLanguageLoader> = Lazy::new(|| {
    let loader = i18n_embed::fluent::fluent_language_loader!();
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    let _result = i18n_embed::select(&loader, &Localizations, &requested_languages);
    loader.set_use_isolating(false);
    loader
});

#[macro_export]
macro_rules! fl {
    ($message_id:literal) => {{
        i18n_embed_fl::fl!($crate::LANGUAGE_LOADER, $message_id)
    }};
    ($message_id:literal, $($args:expr),* $(,)?) => {{
        i18n_embed_fl::fl!($crate::LANGUAGE_LOADER, $message_id, $($args),*)
    }};
}

const DEFAULT_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(version, about = i18n_embed_fl::fl!(crate::LANGUAGE_LOADER, "app-about"), long_about = None)]
pub struct Args {
    #[arg(value_name = "PATH", help = i18n_embed_fl::fl!(crate::LANGUAGE_LOADER, "arg-path-help"))]
    path: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = i18n_embed_fl::fl!(crate::LANGUAGE_LOADER, "arg-script-help"))]
    script: Option<PathBuf>,

    #[arg(long, value_name = "COLUMNS", default_value_t = DEFAULT_WIDTH, help = i18n_embed_fl::fl!(crate::LANGUAGE_LOADER, "arg-width-help"))]
    width: usize,
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(dir) = Settings::config_dir() {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<LoggerHandle> {
    let log_dir = get_log_dir()?;
    let result = Logger::try_with_env_or_str("info, i18n_embed=error").and_then(|logger| {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("icy_pad").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .create_symlink(log_dir.join("icy_pad.log"))
            .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
            .start()
    });
    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to create log file: {err}");
            None
        }
    }
}

fn run(args: Args) -> io::Result<()> {
    let settings = Settings::load();
    let clipboard = default_clipboard();
    let (manager, initial) = match args.path {
        Some(path) => WindowManager::with_path(settings, clipboard, path),
        None => (WindowManager::new(settings, clipboard), WindowEvent::None),
    };

    let stdout = io::stdout();
    let mut shell = Shell::new(manager, stdout.lock(), args.width);
    shell.start(initial)?;
    match args.script {
        Some(script) => shell.run(BufReader::new(File::open(script)?)),
        None => shell.run(io::stdin().lock()),
    }
}

fn main() {
    let args = Args::parse();
    let _logger = start_logger();

    log::info!("Starting icy_pad {}", *VERSION);
    if let Err(err) = run(args) {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
    log::info!("Shutting down.");
}
