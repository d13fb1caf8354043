//! Connection settings for the CLI.
//!
//! Values are resolved per field, first match wins:
//! command-line flag, environment variable, config file, built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use orchestra_client::{ClientConfig, DEFAULT_API_URL};
use orchestra_core::{Priority, Provider};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "AI_API_URL";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "AI_API_KEY";

/// Request timeout when neither the file nor a flag sets one.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Config File
// ============================================================================

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Orchestrator base URL.
    pub api_url: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Default provider for `chat`, `submit` and `batch`.
    pub provider: Option<Provider>,
    /// Default priority for `chat`, `submit` and `batch`.
    pub priority: Option<Priority>,
}

impl FileSettings {
    /// Loads settings from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(settings)
    }
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orchestra")
        .join("config.json")
}

// ============================================================================
// Resolution
// ============================================================================

/// Values given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    /// `--api-url`.
    pub api_url: Option<&'a str>,
    /// `--api-key`.
    pub api_key: Option<&'a str>,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Command-line flag.
    Flag,
    /// Environment variable.
    Env,
    /// Config file.
    File,
    /// Built-in default.
    Default,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Orchestrator base URL.
    pub api_url: String,
    /// Where `api_url` came from.
    pub api_url_source: Source,
    /// API key, if one was configured anywhere.
    pub api_key: Option<String>,
    /// Where `api_key` came from.
    pub api_key_source: Source,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Default provider.
    pub provider: Provider,
    /// Default priority.
    pub priority: Priority,
    /// Config file that was consulted.
    pub config_path: PathBuf,
}

impl Settings {
    /// Loads the config file and resolves against flags and the process
    /// environment.
    pub fn load(config_path: Option<&Path>, overrides: Overrides<'_>) -> Result<Self> {
        let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
        let file = FileSettings::load(&path)?;
        Ok(Self::resolve(overrides, |name| std::env::var(name).ok(), file, path))
    }

    /// Resolves settings from explicit inputs.
    pub fn resolve(
        overrides: Overrides<'_>,
        env: impl Fn(&str) -> Option<String>,
        file: FileSettings,
        config_path: PathBuf,
    ) -> Self {
        let (api_url, api_url_source) = pick(overrides.api_url, env(ENV_API_URL), file.api_url)
            .unwrap_or_else(|| (DEFAULT_API_URL.to_string(), Source::Default));

        let (api_key, api_key_source) =
            match pick(overrides.api_key, env(ENV_API_KEY), file.api_key) {
                Some((key, source)) => (Some(key), source),
                None => (None, Source::Default),
            };

        Self {
            api_url,
            api_url_source,
            api_key,
            api_key_source,
            request_timeout: Duration::from_secs(
                file.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            provider: file.provider.unwrap_or_default(),
            priority: file.priority.unwrap_or_default(),
            config_path,
        }
    }

    /// Builds the client configuration.
    ///
    /// # Errors
    ///
    /// Fails if no API key was configured.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let Some(api_key) = &self.api_key else {
            bail!(
                "No API key configured; pass --api-key, set {ENV_API_KEY}, or add \"api_key\" to {}",
                self.config_path.display()
            );
        };

        let config = ClientConfig::builder()
            .api_url(&self.api_url)
            .api_key(api_key)
            .request_timeout(self.request_timeout)
            .build()?;
        Ok(config)
    }

    /// Returns the API key with everything but its last four characters
    /// hidden.
    pub fn masked_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_key)
    }
}

/// First non-empty value among flag, env and file.
fn pick(
    flag: Option<&str>,
    env: Option<String>,
    file: Option<String>,
) -> Option<(String, Source)> {
    let non_empty = |s: &String| !s.trim().is_empty();

    flag.map(str::to_string)
        .filter(non_empty)
        .map(|v| (v, Source::Flag))
        .or_else(|| env.filter(non_empty).map(|v| (v, Source::Env)))
        .or_else(|| file.filter(non_empty).map(|v| (v, Source::File)))
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn file_with_url(url: &str) -> FileSettings {
        FileSettings {
            api_url: Some(url.to_string()),
            api_key: Some("file-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings = Settings::resolve(
            Overrides::default(),
            env_of(&[]),
            FileSettings::default(),
            PathBuf::from("config.json"),
        );

        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.api_url_source, Source::Default);
        assert!(settings.api_key.is_none());
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.provider, Provider::Auto);
        assert_eq!(settings.priority, Priority::Normal);
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let env = env_of(&[(ENV_API_URL, "http://env/api"), (ENV_API_KEY, "env-key")]);
        let file = file_with_url("http://file/api");

        let from_flag = Settings::resolve(
            Overrides {
                api_url: Some("http://flag/api"),
                api_key: None,
            },
            &env,
            file.clone(),
            PathBuf::new(),
        );
        assert_eq!(from_flag.api_url, "http://flag/api");
        assert_eq!(from_flag.api_url_source, Source::Flag);
        assert_eq!(from_flag.api_key.as_deref(), Some("env-key"));
        assert_eq!(from_flag.api_key_source, Source::Env);

        let from_file = Settings::resolve(Overrides::default(), env_of(&[]), file, PathBuf::new());
        assert_eq!(from_file.api_url, "http://file/api");
        assert_eq!(from_file.api_url_source, Source::File);
        assert_eq!(from_file.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let settings = Settings::resolve(
            Overrides {
                api_url: Some(""),
                api_key: Some("  "),
            },
            env_of(&[(ENV_API_URL, "http://env/api")]),
            FileSettings::default(),
            PathBuf::new(),
        );

        assert_eq!(settings.api_url, "http://env/api");
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_client_config_requires_key() {
        let settings = Settings::resolve(
            Overrides::default(),
            env_of(&[]),
            FileSettings::default(),
            PathBuf::from("/etc/orchestra/config.json"),
        );

        let err = settings.client_config().unwrap_err();
        assert!(err.to_string().contains("AI_API_KEY"));
        assert!(err.to_string().contains("/etc/orchestra/config.json"));
    }

    #[test]
    fn test_client_config_carries_timeout() {
        let file = FileSettings {
            api_url: Some("http://host/api/".to_string()),
            api_key: Some("key".to_string()),
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        let settings = Settings::resolve(Overrides::default(), env_of(&[]), file, PathBuf::new());

        let config = settings.client_config().unwrap();
        assert_eq!(config.api_url, "http://host/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_masked_key() {
        assert_eq!(mask_key("sk_live_abc123"), "**********c123");
        assert_eq!(mask_key("abcd"), "****");
        assert_eq!(mask_key(""), "");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = FileSettings::load(&dir.path().join("missing.json")).unwrap();
        assert_eq!(settings, FileSettings::default());
    }

    #[test]
    fn test_load_file_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_url": "http://host/api", "provider": "claude", "priority": "high"}"#,
        )
        .unwrap();

        let file = FileSettings::load(&path).unwrap();
        assert_eq!(file.api_url.as_deref(), Some("http://host/api"));
        assert_eq!(file.provider, Some(Provider::Claude));
        assert_eq!(file.priority, Some(Priority::High));
        assert!(file.api_key.is_none());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
