use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_beatpick_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("BEATPICK_CONFIG_PATH", "/tmp/beatpick-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/beatpick-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("beatpick")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("beatpick")
            .join("config.toml")
    );
}

#[test]
fn default_extension_set_matches_recognized_formats() {
    let settings = LibrarySettings::default();
    assert_eq!(settings.extensions, vec!["wav", "mp3", "ogg", "flac", "wma"]);
    assert!(!settings.include_hidden);
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
extensions = ["wav"]
include_hidden = true
follow_links = false

[player]
poll_interval_ms = 250
seek_step_secs = 10

[ui]
header_text = "hello"
waveform_rows = 9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BEATPICK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("BEATPICK__PLAYER__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.extensions, vec!["wav".to_string()]);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.player.poll_interval_ms, 250);
    assert_eq!(s.player.seek_step_secs, 10);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.waveform_rows, 9);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
poll_interval_ms = 100
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BEATPICK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("BEATPICK__PLAYER__POLL_INTERVAL_MS", "40");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.poll_interval_ms, 40);
}

#[test]
fn validate_rejects_zero_poll_interval_and_empty_extensions() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.player.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    s.player.poll_interval_ms = 100;
    s.library.extensions.clear();
    assert!(s.validate().is_err());
}
