use std::path::{Path, PathBuf};

use crate::library::Entry;
use crate::wave::Waveform;

/// Content of the properties popup for the selected entry.
pub struct PropertiesView {
    pub title: String,
    pub details: String,
    pub waveform: Waveform,
}

/// The browser model: current directory listing, cursor and display
/// artifacts. Replaced listings reset the cursor; playback carries on
/// untouched while the user browses elsewhere.
pub struct App {
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub selected: usize,
    /// Waveform of the file most recently opened for playback.
    pub waveform: Option<Waveform>,
    /// Codec summary of the playing file, for the status line.
    pub codec: Option<String>,
    pub properties: Option<PropertiesView>,
    /// One-line user-visible notice (errors, "not an audio file", ...).
    pub notice: Option<String>,
}

impl App {
    pub fn new(dir: PathBuf, entries: Vec<Entry>) -> Self {
        Self {
            dir,
            entries,
            selected: 0,
            waveform: None,
            codec: None,
            properties: None,
            notice: None,
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Move the cursor down one row, stopping at the bottom.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Move the cursor up one row, stopping at the top.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Put the cursor on the row listing `path`, if present.
    pub fn select_path(&mut self, path: &Path) {
        if let Some(at) = self.entries.iter().position(|e| e.path == path) {
            self.selected = at;
        }
    }

    /// Navigation: the whole listing is swapped out, never patched.
    pub fn replace_listing(&mut self, dir: PathBuf, entries: Vec<Entry>) {
        self.dir = dir;
        self.entries = entries;
        self.selected = 0;
        self.notice = None;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn close_properties(&mut self) {
        self.properties = None;
    }
}
