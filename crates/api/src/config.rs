//! Application configuration loaded from environment variables.

use std::time::Duration;

use upstream::HttpDirectoryConfig;

/// Origins allowed by CORS when `CORS_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:8080",
    "http://127.0.0.1",
    "http://127.0.0.1:8080",
    "null",
];

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `API_KEY`: key expected in the `X-API-Key` header
/// - `UPSTREAM_BASE_URL`: base URL of the placeholder directory
/// - `UPSTREAM_TIMEOUT_SECS`: timeout for upstream calls (default: `10`)
/// - `STATIC_DIR`: directory served under `/static` (default: `"static"`)
/// - `CORS_ORIGINS`: comma-separated list of allowed origins
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub api_key: String,
    pub upstream_base_url: String,
    pub upstream_timeout: Duration,
    pub static_dir: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            api_key: lookup("API_KEY").unwrap_or(defaults.api_key),
            upstream_base_url: lookup("UPSTREAM_BASE_URL").unwrap_or(defaults.upstream_base_url),
            upstream_timeout: lookup("UPSTREAM_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings for the upstream directory.
    pub fn upstream(&self) -> HttpDirectoryConfig {
        HttpDirectoryConfig {
            base_url: self.upstream_base_url.clone(),
            timeout: self.upstream_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            api_key: "gcpd-secret-key-789".to_string(),
            upstream_base_url: upstream::DEFAULT_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(10),
            static_dir: "static".to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api_key, "gcpd-secret-key-789");
        assert_eq!(config.upstream_base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.cors_origins.len(), 5);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9000"),
            ("API_KEY", "wayne-manor"),
            ("UPSTREAM_TIMEOUT_SECS", "2"),
            ("CORS_ORIGINS", "http://gotham.city, ,http://bludhaven.city"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key, "wayne-manor");
        assert_eq!(config.upstream_timeout, Duration::from_secs(2));
        assert_eq!(
            config.cors_origins,
            vec!["http://gotham.city", "http://bludhaven.city"]
        );
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| "batcave".to_string()));
        assert_eq!(config.port, 8000);
    }
}
