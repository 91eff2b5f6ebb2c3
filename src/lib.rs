//! notehub: terminal client for a notes API and a movie search API.
//!
//! notehub provides two list workflows over remote REST APIs:
//! - A notes manager: debounced search, pagination, create and delete
//! - A movie browser: debounced search, pagination, and a detail view
//!
//! Both are driven by the same machinery: a search controller that settles
//! keystrokes into a term, a list controller that derives a cache key from
//! `(page, term)`, and a keyed query cache that deduplicates requests, keeps
//! the previous page visible while the next one loads, and refetches after
//! mutations.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Front End (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machines
//! │  - Event handling, action dispatching               │
//! │  - Search / list / mutation controllers             │
//! │  - Runtime event loop                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Cache Layer   │   │ API Layer     │
//! │ (ui/)         │   │ (cache/)      │   │ (api/)        │
//! │ - Rendering   │   │ - Query cache │   │ - HTTP client │
//! │ - Theming     │   │ - Sequencing  │   │ - Wire DTOs   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types, notes, movies, queries (domain/)    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file (`--config`, `$NOTEHUB_CONFIG`, or `~/.config/notehub/config.toml`),
//! and environment variables.
//!
//! ```toml
//! notes_base_url = "https://notehub-public.goit.study/api"
//! notes_token = "..."
//! movies_token = "..."
//! per_page = 12
//! debounce_ms = 300
//! theme = "light"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use notehub::app::{Action, App, Event, NotesApp};
//! use notehub::Config;
//!
//! let config = Config::default();
//! let mut app = NotesApp::new(config.notes_settings());
//!
//! let (_, actions) = app.handle_event(&Event::SearchInput("milk".to_string()))?;
//! assert!(matches!(actions.as_slice(), [Action::ScheduleDebounce { .. }]));
//! # Ok::<(), notehub::NotehubError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod cache;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{Action, App, Event, MoviesApp, NotesApp, Runtime};
pub use domain::{NotehubError, Result};
pub use ui::Theme;

use crate::api::http::DEFAULT_MOVIES_SEARCH_PATH;
use crate::api::{HttpMoviesClient, HttpNotesClient, Services};
use crate::app::{MoviesSettings, NotesSettings};
use crate::cache::CacheOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_NOTES_BASE_URL: &str = "https://notehub-public.goit.study/api";
pub const DEFAULT_MOVIES_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_PER_PAGE: u32 = 12;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration.
///
/// Deserialized from the TOML config file; missing keys take their defaults
/// and unknown keys are ignored. Environment variables are applied on top by
/// [`Config::apply_env`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the notes API.
    pub notes_base_url: String,

    /// Bearer token for the notes API.
    pub notes_token: Option<String>,

    /// Base URL of the movie search API.
    pub movies_base_url: String,

    /// Search endpoint path relative to `movies_base_url`.
    pub movies_search_path: String,

    /// Bearer token for the movie search API.
    pub movies_token: Option<String>,

    /// Notes per page.
    pub per_page: u32,

    /// Search debounce window in milliseconds.
    pub debounce_ms: u64,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Keep a key's last value when its refetch fails.
    pub retain_value_on_error: bool,

    /// Built-in theme name (`default`, `light`).
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`, or a
    /// full `EnvFilter` directive).
    pub trace_level: Option<String>,

    /// Directory for the log file; defaults to the data directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_base_url: DEFAULT_NOTES_BASE_URL.to_string(),
            notes_token: None,
            movies_base_url: DEFAULT_MOVIES_BASE_URL.to_string(),
            movies_search_path: DEFAULT_MOVIES_SEARCH_PATH.to_string(),
            movies_token: None,
            per_page: DEFAULT_PER_PAGE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            retain_value_on_error: false,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Parses a TOML config document.
    ///
    /// Zero page sizes and timeouts fall back to defaults; blank strings
    /// count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use notehub::Config;
    ///
    /// let config = Config::from_toml("per_page = 20\ntheme = \"light\"\nnotes_token = \"\"")?;
    /// assert_eq!(config.per_page, 20);
    /// assert_eq!(config.theme_name.as_deref(), Some("light"));
    /// assert_eq!(config.notes_token, None);
    /// assert_eq!(config.debounce_ms, 300);
    /// # Ok::<(), notehub::NotehubError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Config`] if `contents` is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| NotehubError::Config(format!("Failed to parse config TOML: {e}")))?;
        Ok(config.normalized())
    }

    /// Overrides fields from recognized environment variables.
    ///
    /// Blank values are skipped and unparsable numbers keep the current
    /// value.
    pub fn apply_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (name, value) in vars {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                "NOTEHUB_TOKEN" => self.notes_token = Some(value.to_string()),
                "TMDB_TOKEN" => self.movies_token = Some(value.to_string()),
                "NOTEHUB_BASE_URL" => self.notes_base_url = value.to_string(),
                "TMDB_BASE_URL" => self.movies_base_url = value.to_string(),
                "NOTEHUB_PER_PAGE" => set_parsed(&mut self.per_page, &name, value),
                "NOTEHUB_DEBOUNCE_MS" => set_parsed(&mut self.debounce_ms, &name, value),
                "NOTEHUB_TIMEOUT_SECS" => set_parsed(&mut self.request_timeout_secs, &name, value),
                "NOTEHUB_TRACE_LEVEL" => self.trace_level = Some(value.to_string()),
                "NOTEHUB_THEME" => self.theme_name = Some(value.to_string()),
                "NOTEHUB_LOG_DIR" => self.log_dir = Some(PathBuf::from(value)),
                _ => {}
            }
        }
    }

    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.per_page == 0 {
            self.per_page = defaults.per_page;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = defaults.request_timeout_secs;
        }
        if self.notes_base_url.trim().is_empty() {
            self.notes_base_url = defaults.notes_base_url;
        }
        if self.movies_base_url.trim().is_empty() {
            self.movies_base_url = defaults.movies_base_url;
        }
        if self.movies_search_path.trim().is_empty() {
            self.movies_search_path = defaults.movies_search_path;
        }
        for field in [
            &mut self.notes_token,
            &mut self.movies_token,
            &mut self.theme_name,
            &mut self.theme_file,
            &mut self.trace_level,
        ] {
            if field.as_deref().is_some_and(|value| value.trim().is_empty()) {
                *field = None;
            }
        }
        self.log_dir = self
            .log_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| PathBuf::from(infrastructure::expand_tilde(&dir.to_string_lossy())));
        self
    }

    /// Loads configuration from defaults, the config file and the process
    /// environment.
    ///
    /// An explicitly given `path` must exist; the default location is read
    /// only when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => {
                let default_path = infrastructure::get_config_file();
                if default_path.is_file() {
                    Self::from_toml(&std::fs::read_to_string(&default_path)?)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(std::env::vars());
        Ok(config.normalized())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            retain_value_on_error: self.retain_value_on_error,
        }
    }

    #[must_use]
    pub const fn notes_settings(&self) -> NotesSettings {
        NotesSettings {
            per_page: self.per_page,
            debounce: self.debounce(),
            cache: self.cache_options(),
        }
    }

    #[must_use]
    pub const fn movies_settings(&self) -> MoviesSettings {
        MoviesSettings {
            debounce: self.debounce(),
            cache: self.cache_options(),
        }
    }

    /// Builds the HTTP notes client.
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Config`] for an unusable token.
    pub fn notes_services(&self) -> Result<Services> {
        let client = HttpNotesClient::new(
            self.notes_base_url.clone(),
            self.notes_token.as_deref(),
            self.request_timeout(),
        )?;
        Ok(Services::notes(Arc::new(client)))
    }

    /// Builds the HTTP movie search client.
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Config`] for an unusable token.
    pub fn movies_services(&self) -> Result<Services> {
        let client = HttpMoviesClient::new(
            &self.movies_base_url,
            &self.movies_search_path,
            self.movies_token.as_deref(),
            self.request_timeout(),
        )?;
        Ok(Services::movies(Arc::new(client)))
    }

    /// Loads the configured theme: `theme_file` first, then `theme_name`,
    /// falling back to the default theme when either fails.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

fn set_parsed<V: FromStr>(slot: &mut V, name: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => tracing::debug!(name = %name, value = %value, "ignoring unparsable environment value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn defaults_match_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.notes_base_url, DEFAULT_NOTES_BASE_URL);
        assert_eq!(config.per_page, 12);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[rstest]
    #[case("per_page = 0")]
    #[case("request_timeout_secs = 0")]
    #[case("notes_token = \"  \"")]
    #[case("movies_search_path = \"\"")]
    #[case("[nested]\nx = 1")]
    fn degenerate_values_fall_back_to_defaults(#[case] contents: &str) {
        assert_eq!(Config::from_toml(contents).unwrap(), Config::default());
    }

    #[rstest]
    #[case("per_page = \"many\"")]
    #[case("retain_value_on_error = \"yes\"")]
    #[case("per_page = -3")]
    fn mistyped_file_values_are_rejected(#[case] contents: &str) {
        assert!(matches!(Config::from_toml(contents), Err(NotehubError::Config(_))));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::from_toml(
            "notes_token = \"from-file\"\nper_page = 6\nretain_value_on_error = true\ndebounce_ms = 150\n",
        )
        .unwrap();
        config.apply_env([
            ("NOTEHUB_TOKEN".to_string(), "from-env".to_string()),
            ("NOTEHUB_DEBOUNCE_MS".to_string(), "soon".to_string()),
            ("NOTEHUB_THEME".to_string(), " ".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);

        assert_eq!(config.notes_token.as_deref(), Some("from-env"));
        assert_eq!(config.per_page, 6);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.theme_name, None);
        assert!(config.retain_value_on_error);
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "movies_search_path = \"/movies/search\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.movies_search_path, "/movies/search");
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "per_page = = 3").unwrap();

        assert!(matches!(
            Config::load(Some(file.path())),
            Err(NotehubError::Config(_))
        ));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "default");
    }
}
