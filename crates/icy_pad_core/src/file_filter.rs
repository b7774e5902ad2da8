//! File type filters offered by the open and save dialogs.
//!
//! Filters only guide the dialog; any path the user picks is accepted.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading `*.`; `*` matches every file.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Patterns as shown to the user, e.g. `*.py;*.pyc`.
    pub fn pattern(&self) -> String {
        self.extensions
            .iter()
            .map(|e| if e == "*" { "*.*".to_string() } else { format!("*.{}", e) })
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// The filters every file dialog offers, in display order.
pub fn default_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("Text files (*.txt)", &["txt"]),
        FileFilter::new("Python files (*.py, *.pyc)", &["py", "pyc"]),
        FileFilter::new("All Files (*.*)", &["*"]),
    ]
}
