//! Most Recently Used (MRU) files management
//!
//! Tracks and persists recently opened files for quick access.

use std::fs::{File, create_dir_all, rename};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum number of recent files to keep
pub const MAX_RECENT_FILES: usize = 10;

const FILE_NAME: &str = "recent_files.json";

/// Manages the list of most recently used files.
///
/// The most recent entry is last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MostRecentlyUsedFiles {
    files: Vec<PathBuf>,

    /// Where the list is stored; `None` keeps it in memory only.
    #[serde(skip)]
    store_path: Option<PathBuf>,
}

impl MostRecentlyUsedFiles {
    /// Create a new empty MRU list
    pub fn new() -> Self {
        Self::default()
    }

    /// Load MRU list from `recent_files.json` in `config_dir`
    pub fn load_from(config_dir: &Path) -> Self {
        let path = config_dir.join(FILE_NAME);
        let mut result = if path.exists() {
            match File::open(&path) {
                Ok(file) => {
                    let reader = BufReader::new(file);
                    serde_json::from_reader(reader).unwrap_or_else(|e| {
                        log::warn!("Ignoring invalid recent files list: {}", e);
                        Self::new()
                    })
                }
                Err(e) => {
                    log::warn!("Failed to load recent files: {}", e);
                    Self::new()
                }
            }
        } else {
            Self::new()
        };
        result.files.truncate(MAX_RECENT_FILES);
        result.store_path = Some(path);
        result
    }

    /// Get recent files, filtering out non-existent ones
    pub fn get_recent_files(&mut self) -> &[PathBuf] {
        self.files.retain(|p| p.exists());
        &self.files
    }

    /// Get recent files without modifying (for menu display)
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Check if there are any recent files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Add a file to the recent files list
    pub fn add_recent_file(&mut self, file: &Path) {
        let file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());

        // Remove if already exists (to move to end)
        self.files.retain(|f| f != &file);
        self.files.push(file);

        while self.files.len() > MAX_RECENT_FILES {
            self.files.remove(0);
        }

        if let Err(e) = self.save() {
            log::error!("Error saving recent files: {}", e);
        }
    }

    /// Clear all recent files
    pub fn clear_recent_files(&mut self) {
        self.files.clear();
        if let Err(e) = self.save() {
            log::error!("Error saving recent files: {}", e);
        }
    }

    /// Save MRU list atomically (temp file + rename)
    fn save(&self) -> std::io::Result<()> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self)?;
            writer.flush()?;
        }
        rename(&temp_path, path)
    }
}
