//! XDG Base Directory paths for pulso.
//!
//! CLI tools should use XDG paths for cross-platform consistency,
//! not platform-native paths. This matches tools like gh, docker, kubectl.

use std::path::PathBuf;

/// Get the pulso config directory.
///
/// Returns `$XDG_CONFIG_HOME/pulso` if set, otherwise `~/.config/pulso`.
/// This is where the config file lives.
///
/// # Examples
///
/// ```
/// use pulso_paths::config_dir;
///
/// let config = config_dir();
/// let config_file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("pulso")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/pulso")
    } else {
        PathBuf::from(".config/pulso")
    }
}

/// Get the pulso data directory.
///
/// Returns `$XDG_DATA_HOME/pulso` if set, otherwise `~/.local/share/pulso`.
/// This is where the persisted monitor state is stored.
///
/// # Examples
///
/// ```
/// use pulso_paths::data_dir;
///
/// let data = data_dir();
/// let state_file = data.join("last_state.json");
/// ```
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("pulso")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/pulso")
    } else {
        PathBuf::from(".local/share/pulso")
    }
}
