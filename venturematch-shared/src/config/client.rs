use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};
use strum::{Display, EnumString};
use thiserror::Error;
use url::Url;

use crate::api::DEFAULT_API_URL;

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_URL_ENV: &str = "VENTUREMATCH_API_URL";
/// Environment variable overriding [`ClientConfig::log_level`].
pub const LOG_LEVEL_ENV: &str = "VENTUREMATCH_LOG_LEVEL";
/// Environment variable overriding [`ClientConfig::session_path`].
pub const SESSION_PATH_ENV: &str = "VENTUREMATCH_SESSION_PATH";

/// Errors raised while resolving the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported configuration format '{extension}'. Use 'yaml', 'json' or 'toml'.")]
    UnsupportedFormat { extension: String },

    #[error("Invalid {name} value '{value}': must be an absolute http(s) URL")]
    InvalidUrl { name: String, value: String },

    #[error("Failed to serialize configuration: {message}")]
    Serialize { message: String },
}

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConfigFormat {
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format implied by a file extension.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension
            .parse()
            .map_err(|_| ConfigError::UnsupportedFormat {
                extension: extension.to_string(),
            })
    }

    /// Conventional file name for a generated configuration.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Yaml => "venturematch.yaml",
            Self::Json => "venturematch.json",
            Self::Toml => "venturematch.toml",
        }
    }
}

/// Settings shared by the native clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the REST backend.
    pub api_base_url: Url,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,

    /// File holding the session token between runs.
    pub session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: default_api_url(),
            log_level: "info".to_string(),
            session_path: default_session_path(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a yaml, json or toml file.
    /// * `api_url_override` - Optional backend URL taking precedence over everything else.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if a URL is invalid.
    pub fn load_config(
        config_path: Option<&Path>,
        api_url_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        let defaults = Self::with_defaults();
        if config.api_base_url == defaults.api_base_url {
            if let Ok(url) = env::var(API_URL_ENV) {
                config.api_base_url = parse_url(API_URL_ENV, &url)?;
            }
        }
        if config.log_level == defaults.log_level {
            if let Ok(level) = env::var(LOG_LEVEL_ENV) {
                config.log_level = level;
            }
        }
        if config.session_path == defaults.session_path {
            if let Ok(path) = env::var(SESSION_PATH_ENV) {
                config.session_path = PathBuf::from(path);
            }
        }

        if let Some(url) = api_url_override {
            config.api_base_url = parse_url("--api-url", url)?;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let config: Self = match format {
            ConfigFormat::Yaml => {
                serde_yml::from_str(&content).map_err(|err| parse_error(err.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))?
            }
            ConfigFormat::Toml => {
                toml::from_str(&content).map_err(|err| parse_error(err.to_string()))?
            }
        };
        check_scheme("api_base_url", &config.api_base_url)?;
        Ok(config)
    }

    /// Renders the configuration in `format`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let serialize_error = |message: String| ConfigError::Serialize { message };
        match format {
            ConfigFormat::Yaml => {
                serde_yml::to_string(self).map_err(|err| serialize_error(err.to_string()))
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|err| serialize_error(err.to_string()))
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|err| serialize_error(err.to_string()))
            }
        }
    }

    /// Backend URL as a string without the trailing slash `Url` adds.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base_url.as_str().trim_end_matches('/')
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("default API URL is valid"))
}

fn default_session_path() -> PathBuf {
    BaseDirs::new().map_or_else(
        || PathBuf::from(".venturematch"),
        |dirs| dirs.config_dir().join("venturematch"),
    )
    .join("session.json")
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|_| ConfigError::InvalidUrl {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    check_scheme(name, &url)?;
    Ok(url)
}

fn check_scheme(name: &str, url: &Url) -> Result<(), ConfigError> {
    if matches!(url.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            name: name.to_string(),
            value: url.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var(API_URL_ENV);
            env::remove_var(LOG_LEVEL_ENV);
            env::remove_var(SESSION_PATH_ENV);
        }
    }

    #[test]
    fn test_config_with_defaults() {
        let config = ClientConfig::with_defaults();

        assert_eq!(config.api_base(), "http://localhost:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.session_path.ends_with("venturematch/session.json"));
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        cleanup_env_vars();
        let config = ClientConfig::load_config(None, None).unwrap();
        assert_eq!(config, ClientConfig::with_defaults());
    }

    #[test]
    #[serial]
    fn test_load_config_with_environment_variables() {
        cleanup_env_vars();
        unsafe {
            env::set_var(API_URL_ENV, "https://api.example.com/v1/");
            env::set_var(LOG_LEVEL_ENV, "debug");
            env::set_var(SESSION_PATH_ENV, "/tmp/vm-session.json");
        }

        let config = ClientConfig::load_config(None, None).unwrap();

        assert_eq!(config.api_base(), "https://api.example.com/v1");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.session_path, PathBuf::from("/tmp/vm-session.json"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_override_beats_environment() {
        cleanup_env_vars();
        unsafe {
            env::set_var(API_URL_ENV, "https://env.example.com");
        }

        let config = ClientConfig::load_config(None, Some("http://127.0.0.1:9000")).unwrap();
        assert_eq!(config.api_base(), "http://127.0.0.1:9000");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_environment_url() {
        cleanup_env_vars();
        unsafe {
            env::set_var(API_URL_ENV, "not a url");
        }

        let err = ClientConfig::load_config(None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid VENTUREMATCH_API_URL"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_file_values_win_over_environment() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(
            &path,
            "api_base_url = \"https://file.example.com/\"\nlog_level = \"warn\"\n",
        )
        .unwrap();
        unsafe {
            env::set_var(API_URL_ENV, "https://env.example.com");
            env::set_var(LOG_LEVEL_ENV, "trace");
        }

        let config = ClientConfig::load_config(Some(&path), None).unwrap();
        assert_eq!(config.api_base(), "https://file.example.com");
        assert_eq!(config.log_level, "warn");

        cleanup_env_vars();
    }

    #[test]
    fn test_partial_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();
        let yaml = dir.path().join("client.yml");
        fs::write(&yaml, "log_level: debug\n").unwrap();
        let json = dir.path().join("client.json");
        fs::write(&json, r#"{"session_path": "/var/vm/session.json"}"#).unwrap();

        let from_yaml = ClientConfig::from_file(&yaml).unwrap();
        assert_eq!(from_yaml.log_level, "debug");
        assert_eq!(from_yaml.api_base(), "http://localhost:8080");

        let from_json = ClientConfig::from_file(&json).unwrap();
        assert_eq!(from_json.session_path, PathBuf::from("/var/vm/session.json"));
    }

    #[test]
    fn test_unsupported_and_broken_files() {
        let dir = TempDir::new().unwrap();
        let ini = dir.path().join("client.ini");
        fs::write(&ini, "x=1").unwrap();
        assert!(matches!(
            ClientConfig::from_file(&ini),
            Err(ConfigError::UnsupportedFormat { .. })
        ));

        let broken = dir.path().join("client.json");
        fs::write(&broken, "{").unwrap();
        assert!(matches!(
            ClientConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));

        let ftp = dir.path().join("client.yaml");
        fs::write(&ftp, "api_base_url: ftp://example.com\n").unwrap();
        assert!(matches!(
            ClientConfig::from_file(&ftp),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_render_round_trips() {
        let config = ClientConfig::with_defaults();
        let dir = TempDir::new().unwrap();
        for format in [ConfigFormat::Yaml, ConfigFormat::Json, ConfigFormat::Toml] {
            let path = dir.path().join(format.file_name());
            fs::write(&path, config.render(format).unwrap()).unwrap();
            assert_eq!(ClientConfig::from_file(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!("YML".parse::<ConfigFormat>().unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::Toml.to_string(), "toml");
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/b.json")).unwrap(),
            ConfigFormat::Json
        );
    }
}
