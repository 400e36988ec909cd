//! Startup configuration: backend origin and theme name.
//!
//! Read once before terminal init from `~/.config/codelens/config.toml`,
//! with `CODELENS_BACKEND_URL` overriding the file. Config errors are soft
//! failures printed to stderr — a typo never prevents startup.

use serde::Deserialize;

/// Default backend origin when neither file nor env supplies one.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, injected into the `ApiClient` at startup.
    pub backend_url: String,
    /// Theme name resolved by `Theme::from_name`.
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            theme: "catppuccin-mocha".to_owned(),
        }
    }
}

/// On-disk shape; every field optional so partial files parse.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    backend_url: Option<String>,
    theme: Option<String>,
}

/// Returns the path to the codelens config file.
///
/// Prefers `$XDG_CONFIG_HOME/codelens/config.toml`; falls back to
/// `~/.config/codelens/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("codelens").join("config.toml")
}

impl Config {
    /// Loads configuration from the XDG path and the environment.
    pub fn load() -> Self {
        let raw = std::fs::read_to_string(config_path()).ok();
        let env_url = std::env::var("CODELENS_BACKEND_URL").ok();
        Self::from_sources(raw.as_deref(), env_url)
    }

    /// Pure resolution from an optional file body and env override.
    ///
    /// Precedence for the backend URL: env var, then file, then default.
    fn from_sources(raw: Option<&str>, env_url: Option<String>) -> Self {
        let parsed: RawConfig = match raw {
            Some(body) => match toml::from_str(body) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("codelens: config parse error: {e}");
                    RawConfig::default()
                }
            },
            None => RawConfig::default(),
        };

        let defaults = Config::default();
        Config {
            backend_url: env_url
                .filter(|u| !u.trim().is_empty())
                .or(parsed.backend_url)
                .unwrap_or(defaults.backend_url),
            theme: parsed.theme.unwrap_or(defaults.theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::from_sources(None, None);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn file_values_are_used() {
        let cfg = Config::from_sources(
            Some("backend_url = \"http://analysis.internal:9000\"\ntheme = \"dark\"\n"),
            None,
        );
        assert_eq!(cfg.backend_url, "http://analysis.internal:9000");
        assert_eq!(cfg.theme, "dark");
    }

    #[test]
    fn env_overrides_file_for_backend_url() {
        let cfg = Config::from_sources(
            Some("backend_url = \"http://from-file:1\"\n"),
            Some("http://from-env:2".to_owned()),
        );
        assert_eq!(cfg.backend_url, "http://from-env:2");
    }

    #[test]
    fn unparseable_file_falls_back_softly() {
        let cfg = Config::from_sources(Some("backend_url = [not toml"), None);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let cfg = Config::from_sources(None, Some("  ".to_owned()));
        assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    }
}
