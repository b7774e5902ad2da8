use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{FindOptions, MostRecentlyUsedFiles, PadError, Result};

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "icy_pad";

/// Lazily initialized project directories (computed once on first access)
pub(crate) static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 72;

// =============================================================================
// FontSettings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSettings {
    #[serde(default = "default_font_family")]
    pub family: String,
    #[serde(default = "default_font_size")]
    pub size: u16,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

fn default_font_family() -> String {
    "Monospace".to_string()
}

fn default_font_size() -> u16 {
    11
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            size: default_font_size(),
            bold: false,
            italic: false,
        }
    }
}

impl FontSettings {
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..Default::default()
        }
    }

    fn normalized(mut self) -> Self {
        if self.family.trim().is_empty() {
            self.family = default_font_family();
        }
        self.size = self.size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedOptions {
    #[serde(default)]
    pub word_wrap: bool,

    #[serde(default = "default_true")]
    pub show_status_bar: bool,

    #[serde(default)]
    pub font: FontSettings,

    #[serde(default)]
    pub find: FindOptions,
}

fn default_true() -> bool {
    true
}

impl Default for PersistedOptions {
    fn default() -> Self {
        Self {
            word_wrap: false,
            show_status_bar: true,
            font: FontSettings::default(),
            find: FindOptions::default(),
        }
    }
}

/// Shared options between all windows.
///
/// Persisted values are stored in `settings.toml`.
/// The MRU list is stored separately (see `recent_files`).
pub struct Settings {
    /// Most recently used files
    pub recent_files: MostRecentlyUsedFiles,

    /// Wrap long lines at the window edge (persisted, default: false)
    pub word_wrap: Arc<RwLock<bool>>,

    /// Whether the status bar is shown (persisted, default: true)
    pub show_status_bar: Arc<RwLock<bool>>,

    /// Editor font (persisted)
    pub font: Arc<RwLock<FontSettings>>,

    /// Last used find options (persisted)
    pub find: Arc<RwLock<FindOptions>>,

    config_dir: Option<PathBuf>,
}

impl Default for Settings {
    /// In-memory settings that are never written to disk.
    fn default() -> Self {
        Self::from_persisted(PersistedOptions::default(), MostRecentlyUsedFiles::new(), None)
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.toml";

    pub fn load() -> Self {
        Self::load_from(Self::config_dir())
    }

    /// Load settings and MRU list from `config_dir`. `None` gives defaults
    /// that are kept in memory only.
    pub fn load_from(config_dir: Option<PathBuf>) -> Self {
        let persistent = match &config_dir {
            Some(dir) => Self::load_settings_file(dir),
            None => PersistedOptions::default(),
        };
        let recent_files = match &config_dir {
            Some(dir) => MostRecentlyUsedFiles::load_from(dir),
            None => MostRecentlyUsedFiles::new(),
        };
        Self::from_persisted(persistent, recent_files, config_dir)
    }

    fn from_persisted(persistent: PersistedOptions, recent_files: MostRecentlyUsedFiles, config_dir: Option<PathBuf>) -> Self {
        Self {
            recent_files,
            word_wrap: Arc::new(RwLock::new(persistent.word_wrap)),
            show_status_bar: Arc::new(RwLock::new(persistent.show_status_bar)),
            font: Arc::new(RwLock::new(persistent.font.normalized())),
            find: Arc::new(RwLock::new(persistent.find)),
            config_dir,
        }
    }

    pub fn store_persistent(&self) {
        let settings = PersistedOptions {
            word_wrap: *self.word_wrap.read(),
            show_status_bar: *self.show_status_bar.read(),
            font: self.font.read().clone(),
            find: *self.find.read(),
        };
        let Some(config_dir) = &self.config_dir else {
            return;
        };
        if let Err(err) = Self::store_options_file(config_dir, &settings) {
            log::error!("Error storing settings: {}", err);
        }
    }

    pub fn toggle_word_wrap(&self) -> bool {
        let mut wrap = self.word_wrap.write();
        *wrap = !*wrap;
        *wrap
    }

    pub fn toggle_status_bar(&self) -> bool {
        let mut show = self.show_status_bar.write();
        *show = !*show;
        *show
    }

    pub fn set_font(&self, font: FontSettings) {
        *self.font.write() = font.normalized();
    }

    fn load_settings_file(config_dir: &Path) -> PersistedOptions {
        if !config_dir.exists() {
            if let Err(err) = fs::create_dir_all(config_dir) {
                log::error!("Can't create configuration directory {:?}: {}", config_dir, err);
                return PersistedOptions::default();
            }
        }

        let options_file = config_dir.join(Self::FILE_NAME);
        if options_file.exists() {
            match fs::read_to_string(&options_file) {
                Ok(txt) => match parse_options(&txt) {
                    Ok(result) => return result,
                    Err(err) => log::warn!("Ignoring {}: {}", options_file.display(), err),
                },
                Err(err) => log::error!("Error reading options file: {}", err),
            }
        }

        PersistedOptions::default()
    }

    /// Write to a temp file, then rename over the real one so a crash never
    /// leaves a truncated settings file.
    fn store_options_file(config_dir: &Path, options: &PersistedOptions) -> Result<()> {
        let file_path = config_dir.join(Self::FILE_NAME);
        let temp_path = config_dir.join(format!(".{}.tmp", Self::FILE_NAME));

        let text = toml::to_string_pretty(options).map_err(|e| PadError::Settings(e.to_string()))?;

        let write_result = (|| -> std::io::Result<()> {
            fs::create_dir_all(config_dir)?;
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();

        if let Err(err) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(PadError::io(&temp_path, err));
        }

        if let Err(err) = fs::rename(&temp_path, &file_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(PadError::io(&file_path, err));
        }
        Ok(())
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }
}

fn parse_options(txt: &str) -> Result<PersistedOptions> {
    let mut options: PersistedOptions = toml::from_str(txt).map_err(|e| PadError::Settings(e.to_string()))?;
    options.font = options.font.normalized();
    Ok(options)
}
