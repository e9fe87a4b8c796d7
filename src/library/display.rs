use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Humanize a byte count: `432.0bytes`, `3.1KB`, `12.4MB`, ...
pub fn humanize_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["bytes", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{value:3.1}{unit}");
        }
        value /= 1024.0;
    }
    format!("{value:3.1}TB")
}

/// Permission bits rendered as octal, like `755`.
pub fn format_mode(mode_bits: u32) -> String {
    format!("{:o}", mode_bits & 0o7777)
}

/// Local-time mtime column, `Sat Jan  4 14:02:11 2025` style.
pub fn format_mtime(modified: Option<SystemTime>) -> String {
    match modified {
        Some(t) => DateTime::<Local>::from(t)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string(),
        None => "-".to_string(),
    }
}
