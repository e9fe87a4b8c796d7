use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Entry, EntryKind};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("cannot read directory {path}: {source}")]
    PathNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn is_audio_name(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// List the immediate children of `dir`, classified and sorted by name
/// (case-sensitive, ascending), with a synthetic `..` entry prepended.
///
/// Hidden entries are skipped unless configured otherwise. An unreadable
/// directory is an error so the caller can keep its previous listing.
pub fn list_dir(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Entry>, LibraryError> {
    let mut entries: Vec<Entry> = Vec::new();

    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links)
    {
        let item = match result {
            Ok(item) => item,
            Err(err) if err.path() == Some(dir) => {
                return Err(LibraryError::PathNotAccessible {
                    path: dir.to_path_buf(),
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!(%err, "skipping unreadable entry");
                continue;
            }
        };

        let name = item.file_name().to_string_lossy().into_owned();
        if !settings.include_hidden && is_hidden(&name) {
            continue;
        }

        let meta = match item.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                warn!(path = %item.path().display(), %err, "skipping entry without metadata");
                continue;
            }
        };

        let kind = if item.file_type().is_dir() {
            EntryKind::Directory
        } else if is_audio_name(item.path(), settings) {
            EntryKind::AudioFile
        } else {
            EntryKind::Other
        };

        entries.push(Entry {
            name,
            path: item.path().to_path_buf(),
            kind,
            size_bytes: meta.len(),
            mode_bits: meta.mode(),
            modified: meta.modified().ok(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.insert(0, parent_entry(dir));
    Ok(entries)
}

/// The unconditional `..` row. At the filesystem root it points back at the
/// root itself, making the navigation a no-op.
fn parent_entry(dir: &Path) -> Entry {
    let parent = dir.parent().unwrap_or(dir).to_path_buf();
    let meta = fs::metadata(&parent).ok();
    Entry {
        name: "..".to_string(),
        path: parent,
        kind: EntryKind::Directory,
        size_bytes: meta.as_ref().map(|m| m.len()).unwrap_or(0),
        mode_bits: meta.as_ref().map(|m| m.mode()).unwrap_or(0),
        modified: meta.and_then(|m| m.modified().ok()),
    }
}
