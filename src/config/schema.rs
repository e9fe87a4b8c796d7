use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/beatpick/config.toml` or
/// `~/.config/beatpick/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BEATPICK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub player: PlayerSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions classified as audio (case-insensitive, without dot).
    /// This single set gates both row classification and next-track skipping.
    pub extensions: Vec<String>,
    /// Whether to list dotfiles.
    pub include_hidden: bool,
    /// Whether to follow symlinks when classifying entries.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "wav".into(),
                "mp3".into(),
                "ogg".into(),
                "flac".into(),
                "wma".into(),
            ],
            include_hidden: false,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Cadence of position polling while playing (milliseconds).
    pub poll_interval_ms: u64,
    /// Number of seconds the seek keys jump by.
    pub seek_step_secs: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            seek_step_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Height of the inline waveform pane, in terminal rows.
    pub waveform_rows: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ pick your beats ~ ".to_string(),
            waveform_rows: 6,
        }
    }
}
