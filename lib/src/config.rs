use serde::de::DeserializeOwned;

use crate::{ErrorKind, Result};

pub static CONFIG_FILE: &'static str = "accounts.toml";

/// Application configuration. Defines how the account pages are exposed and
/// how the library reports what it's doing.
///
/// # Sensible defaults
///
/// `Config::default()` mounts all pages at their canonical paths and
/// enables formatted logging.
///
/// Using the *struct update syntax* one can initialize a new `Config`, making
/// a few changes right in the definition.
///
/// ```
/// use accounts::config::{Config, Pages};
///
/// let cfg = Config {
///     pages: Pages {
///         base: "/accounts".to_string(),
///     },
///     ..Default::default()
/// };
/// # assert_eq!(cfg.name, "accounts");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub name: String,
    pub version: String,

    /// Scheme, host and optional port under which the application is
    /// reachable. Used when building absolute page urls. Defaults to
    /// `http://localhost:8080`.
    pub origin: String,

    pub pages: Pages,
    pub tracing: Tracing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            origin: "http://localhost:8080".to_string(),
            pages: Pages::default(),
            tracing: Tracing::default(),
        }
    }
}

impl Config {
    /// Parsed [`Config::origin`].
    pub fn origin_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.origin)?)
    }
}

/// Loads application config from toml file at default location.
pub fn load<T: DeserializeOwned>() -> Result<T> {
    load_from(CONFIG_FILE)
}

/// Loads application config from toml file at standard path using provided
/// name.
///
/// For example for `name` == `accounts.toml` we will load both
/// `accounts.toml` and `secret.accounts.toml` from the main project
/// directory.
pub fn load_from<T: DeserializeOwned>(name: impl AsRef<str>) -> Result<T> {
    let config = config::Config::builder()
        .add_source(config::File::with_name(name.as_ref()))
        .add_source(config::File::with_name(&format!("secret.{}", name.as_ref())).required(false))
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix_separator("__"),
        )
        .build()?;

    let config: T = config.try_deserialize()?;

    Ok(config)
}

/// Loads application config like [`load_from`], returning `None` when the
/// config file doesn't exist.
///
/// A file that exists but fails to load, e.g. because of a syntax error, is
/// still an error.
pub fn try_load_from<T: DeserializeOwned>(name: impl AsRef<str>) -> Result<Option<T>> {
    match load_from(name) {
        Ok(config) => Ok(Some(config)),
        Err(e) if is_missing_file(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_missing_file(error: &crate::Error) -> bool {
    match &error.kind {
        ErrorKind::ConfigError(config::ConfigError::Foreign(cause)) => cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound),
        _ => false,
    }
}

/// Loads application config from multiple toml files at given paths.
pub fn load_from_many<T: DeserializeOwned>(paths: &[impl AsRef<str>]) -> Result<T> {
    let mut builder = config::Config::builder().add_source(
        config::Environment::default()
            .separator("__")
            .prefix_separator("__"),
    );

    for path in paths {
        builder = builder.add_source(config::File::with_name(path.as_ref()));
    }
    let config = builder.build()?;

    let config: T = config.try_deserialize()?;

    Ok(config)
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Pages {
    /// Mount point for all the account pages, e.g. `/accounts`. Empty by
    /// default, meaning pages are served at their canonical paths.
    pub base: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Tracing {
    pub enabled: bool,

    pub mode: crate::tracing::Mode,
    pub level: crate::tracing::Level,
}

impl Default for Tracing {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: crate::tracing::Mode::default(),
            level: crate::tracing::Level::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::tracing::{Level, Mode};

    fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.name, "accounts");
        assert_eq!(config.pages.base, "");
        assert!(config.tracing.enabled);
        assert_eq!(config.tracing.level, Level::Normal);
        assert_eq!(config.origin_url().unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[pages]\nbase = \"/accounts\"").unwrap();
        assert_eq!(config.pages.base, "/accounts");
        assert_eq!(config.origin, "http://localhost:8080");
        assert!(matches!(config.tracing.mode, Mode::Formatted));
    }

    #[test]
    fn test_load_from_many() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_config(
            &dir,
            "first.toml",
            "origin = \"https://example.com\"\n[tracing]\nlevel = \"debug\"",
        );
        let second = write_config(&dir, "second.toml", "[pages]\nbase = \"/auth\"");

        let config: Config = load_from_many(&[first, second]).unwrap();
        assert_eq!(config.origin, "https://example.com");
        assert_eq!(config.tracing.level, Level::Debug);
        assert_eq!(config.pages.base, "/auth");
    }

    #[test]
    fn test_try_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.toml");
        let config = try_load_from::<Config>(path.to_string_lossy()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_try_load_from_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "accounts.toml", "bogus = [");
        let err = try_load_from::<Config>(&path).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::ConfigError(config::ConfigError::FileParse { .. })
        ));
    }

    #[test]
    fn test_try_load_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "accounts.toml", "[pages]\nbase = \"/acc\"");
        let config = try_load_from::<Config>(&path).unwrap().unwrap();
        assert_eq!(config.pages.base, "/acc");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = load_from::<Config>("/nonexistent/accounts.toml").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigError(_)));
    }
}
