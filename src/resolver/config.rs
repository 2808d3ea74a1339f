// Resolver configuration
//
// Layered: built-in defaults, then an optional JSON file, then environment
// overrides (YTVURL_VERBOSE, YTVURL_PROXY, YTVURL_TIMEOUT).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::ResolveError;

/// Configuration for the resolver and its HTTP fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Log request/response details and page bodies
    pub verbose_logging: bool,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Overrides the default desktop browser user agent
    pub user_agent: Option<String>,
    /// Honour HTTP_PROXY/HTTPS_PROXY when no explicit proxy is set
    pub use_system_proxy: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            verbose_logging: false,
            timeout_seconds: 30,
            proxy: None,
            user_agent: None,
            use_system_proxy: true,
        }
    }
}

impl ResolverConfig {
    pub fn with_verbose_logging(mut self, enabled: bool) -> Self {
        self.verbose_logging = enabled;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    /// `<config dir>/youtube-video-url/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("youtube-video-url").join("config.json"))
    }

    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResolveError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ResolveError::Config(format!("Invalid JSON in {}: {}", path.display(), e))
        })
    }

    /// Defaults, overlaid with the default config file if it exists, then env.
    pub fn discover() -> Result<Self, ResolveError> {
        Self::discover_from(Self::default_path(), |key| std::env::var(key).ok())
    }

    /// Defaults, then `path` if it exists, then overrides from `lookup`.
    pub fn discover_from<F>(path: Option<PathBuf>, lookup: F) -> Result<Self, ResolveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading resolver config");
                Self::load(&path)?
            }
            _ => Self::default(),
        };

        config.apply_env(lookup)
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ResolveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("YTVURL_VERBOSE") {
            self.verbose_logging = parse_flag(&value).ok_or_else(|| {
                ResolveError::Config(format!("YTVURL_VERBOSE: not a boolean: {}", value))
            })?;
        }

        if let Some(value) = lookup("YTVURL_PROXY") {
            let trimmed = value.trim();
            self.proxy = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }

        if let Some(value) = lookup("YTVURL_TIMEOUT") {
            self.timeout_seconds = value.trim().parse().map_err(|_| {
                ResolveError::Config(format!("YTVURL_TIMEOUT: not a number of seconds: {}", value))
            })?;
        }

        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert!(!config.verbose_logging);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.proxy.is_none());
        assert!(config.use_system_proxy);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "verbose_logging": true, "proxy": "socks5h://127.0.0.1:1080" }}"#).unwrap();

        let config = ResolverConfig::load(file.path()).unwrap();
        assert!(config.verbose_logging);
        assert_eq!(config.proxy.as_deref(), Some("socks5h://127.0.0.1:1080"));
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ResolverConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ResolveError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResolverConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ResolveError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ResolverConfig::default()
            .apply_env(env_of(&[
                ("YTVURL_VERBOSE", "yes"),
                ("YTVURL_PROXY", " http://proxy:8080 "),
                ("YTVURL_TIMEOUT", "5"),
            ]))
            .unwrap();

        assert!(config.verbose_logging);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:8080"));
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_env_empty_proxy_clears() {
        let config = ResolverConfig::default()
            .with_proxy(Some("http://proxy:8080".into()))
            .apply_env(env_of(&[("YTVURL_PROXY", "")]))
            .unwrap();
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            ResolverConfig::discover_from(Some(dir.path().join("config.json")), env_of(&[]))
                .unwrap();
        assert_eq!(config, ResolverConfig::default());

        let config = ResolverConfig::discover_from(None, env_of(&[])).unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_discover_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "timeout_seconds": 10, "proxy": "http://file-proxy:3128", "verbose_logging": true }}"#
        )
        .unwrap();

        let config = ResolverConfig::discover_from(
            Some(file.path().to_path_buf()),
            env_of(&[("YTVURL_TIMEOUT", "3"), ("YTVURL_VERBOSE", "off")]),
        )
        .unwrap();

        assert_eq!(config.timeout_seconds, 3);
        assert!(!config.verbose_logging);
        assert_eq!(config.proxy.as_deref(), Some("http://file-proxy:3128"));
    }

    #[test]
    fn test_discover_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ broken").unwrap();

        let err = ResolverConfig::discover_from(Some(file.path().to_path_buf()), env_of(&[]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Config(_)));
    }

    #[test]
    fn test_env_bad_timeout() {
        let err = ResolverConfig::default()
            .apply_env(env_of(&[("YTVURL_TIMEOUT", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Config(_)));
    }
}
