//! Platform-specific directory utilities

use std::path::PathBuf;

/// Default directory for user content overrides
///
/// - macOS: `~/Library/Application Support/tune`
/// - Linux: `~/.config/tune` (or `$XDG_CONFIG_HOME/tune`)
/// - Windows: `%APPDATA%\tune\config`
/// - Fallback: `./tune_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tune")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./tune_data"))
}

/// Default log directory
///
/// - macOS: `~/Library/Caches/tune/logs`
/// - Linux: `~/.cache/tune/logs` (or `$XDG_CACHE_HOME/tune/logs`)
/// - Windows: `%LOCALAPPDATA%\tune\cache\logs`
/// - Fallback: `/tmp/tune/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tune")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/tune"))
        .join("logs")
}
