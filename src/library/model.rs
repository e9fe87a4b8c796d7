use std::path::PathBuf;
use std::time::SystemTime;

/// What a listed entry is, decided once at listing time. Everything
/// downstream (row markers, activation, next-track skipping) branches on
/// this instead of re-matching extension strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    AudioFile,
    Other,
}

/// One row of a directory listing. Never mutated after the listing is
/// built; navigating replaces the whole listing.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size_bytes: u64,
    pub mode_bits: u32,
    pub modified: Option<SystemTime>,
}
