//! Filesystem locations for logs and configuration.
//!
//! Follows the XDG base directory convention: data under
//! `$XDG_DATA_HOME/notehub` (else `~/.local/share/notehub`), configuration
//! under `$XDG_CONFIG_HOME/notehub` (else `~/.config/notehub`).

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "notehub";

/// Returns the data directory, where the log file lives.
///
/// Falls back to the current directory when neither `XDG_DATA_HOME` nor
/// `HOME` is set.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        env::var("XDG_DATA_HOME").ok().as_deref(),
        env::var("HOME").ok().as_deref(),
    )
}

/// Path of the default configuration file.
#[must_use]
pub fn get_config_file() -> PathBuf {
    config_dir_from(
        env::var("XDG_CONFIG_HOME").ok().as_deref(),
        env::var("HOME").ok().as_deref(),
    )
    .join("config.toml")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolves the data directory from explicit variable values.
///
/// # Examples
///
/// ```
/// use notehub::infrastructure::paths::data_dir_from;
/// use std::path::PathBuf;
///
/// assert_eq!(data_dir_from(Some("/xdg"), Some("/home/me")), PathBuf::from("/xdg/notehub"));
/// assert_eq!(
///     data_dir_from(None, Some("/home/me")),
///     PathBuf::from("/home/me/.local/share/notehub")
/// );
/// ```
#[must_use]
pub fn data_dir_from(xdg_data_home: Option<&str>, home: Option<&str>) -> PathBuf {
    non_empty(xdg_data_home).map_or_else(
        || {
            non_empty(home).map_or_else(
                || PathBuf::from(".").join(APP_DIR),
                |home| PathBuf::from(home).join(".local/share").join(APP_DIR),
            )
        },
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

#[must_use]
pub fn config_dir_from(xdg_config_home: Option<&str>, home: Option<&str>) -> PathBuf {
    non_empty(xdg_config_home).map_or_else(
        || {
            non_empty(home).map_or_else(
                || PathBuf::from(".").join(APP_DIR),
                |home| PathBuf::from(home).join(".config").join(APP_DIR),
            )
        },
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use notehub::infrastructure::paths::expand_tilde_with;
///
/// assert_eq!(expand_tilde_with("~/themes/dark.toml", Some("/home/me")), "/home/me/themes/dark.toml");
/// assert_eq!(expand_tilde_with("~", Some("/home/me")), "/home/me");
/// assert_eq!(expand_tilde_with("/absolute/path", Some("/home/me")), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    let Some(home) = non_empty(home) else {
        return path.to_string();
    };

    if path.starts_with("~/") {
        path.replacen('~', home.trim_end_matches('/'), 1)
    } else if path == "~" {
        home.to_string()
    } else {
        path.to_string()
    }
}

#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, env::var("HOME").ok().as_deref())
}
