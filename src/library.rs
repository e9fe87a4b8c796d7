//! Directory listing model: exposes ordered, classified entries for the
//! browser, recomputed in full on every navigation.

mod display;
mod model;
mod scan;

pub use display::{format_mode, format_mtime, humanize_size};
pub use model::{Entry, EntryKind};
pub use scan::{LibraryError, list_dir};

#[cfg(test)]
mod tests;
