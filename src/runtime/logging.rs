use std::path::PathBuf;
use std::sync::Arc;
use std::{env, fs};

use tracing_subscriber::EnvFilter;

/// File-backed logging, enabled by setting `BEATPICK_LOG` to an `EnvFilter`
/// spec (e.g. `debug` or `beatpick=trace`). Output goes to a file under the
/// XDG state dir; stderr is off-limits while the alternate screen is up.
pub fn init() {
    let Ok(filter) = env::var("BEATPICK_LOG") else {
        return;
    };
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = fs::File::create(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

fn log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };
    state_home.map(|d| d.join("beatpick").join("beatpick.log"))
}
