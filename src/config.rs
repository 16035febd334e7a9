use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Base URL used when no backend is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Which claim source the service is assembled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Fetch from the claims backend.
    Live,
    /// Serve built-in sample claims.
    Fixture,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub source_mode: SourceMode,
    pub fixture_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_url: DEFAULT_API_URL.to_string(),
            source_mode: SourceMode::Live,
            fixture_delay: crate::fixtures::DEFAULT_FIXTURE_DELAY,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            port: var("PORT")
                .map(|p| p.trim().parse::<u16>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?
                .unwrap_or(defaults.port),
            api_url: var("CLAIMS_API_URL")
                .or_else(|| var("NEXT_PUBLIC_API_URL"))
                .map(|url| {
                    let url = url.trim().to_string();
                    validate_api_url(&url)?;
                    Ok::<_, anyhow::Error>(url)
                })
                .transpose()?
                .unwrap_or(defaults.api_url),
            source_mode: match var("CLAIMS_SOURCE") {
                None => defaults.source_mode,
                Some(mode) => match mode.trim().to_lowercase().as_str() {
                    "live" => SourceMode::Live,
                    "fixture" | "mock" => SourceMode::Fixture,
                    other => {
                        anyhow::bail!("CLAIMS_SOURCE must be 'live' or 'fixture', got '{}'", other)
                    }
                },
            },
            fixture_delay: var("FIXTURE_DELAY_MS")
                .map(|ms| ms.trim().parse::<u64>())
                .transpose()
                .map_err(|_| {
                    anyhow::anyhow!("FIXTURE_DELAY_MS must be a whole number of milliseconds")
                })?
                .map(Duration::from_millis)
                .unwrap_or(defaults.fixture_delay),
        };

        tracing::debug!("Claims API URL: {}", config.api_url);
        tracing::debug!("Claim source: {:?}", config.source_mode);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn validate_api_url(raw: &str) -> anyhow::Result<()> {
    let parsed = Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("CLAIMS_API_URL is not a valid URL ({}): {}", e, raw))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("CLAIMS_API_URL must start with http:// or https://");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.port, 3000);
        assert_eq!(config.source_mode, SourceMode::Live);
        assert_eq!(config.fixture_delay, Duration::from_millis(600));
    }

    #[test]
    fn test_api_url_alias_and_precedence() {
        let config =
            Config::from_lookup(lookup_from(&[("NEXT_PUBLIC_API_URL", "https://claims.example.com")]))
                .unwrap();
        assert_eq!(config.api_url, "https://claims.example.com");

        let config = Config::from_lookup(lookup_from(&[
            ("CLAIMS_API_URL", "http://primary:9000"),
            ("NEXT_PUBLIC_API_URL", "http://secondary:9000"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://primary:9000");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("CLAIMS_API_URL", "  "), ("PORT", "")]))
            .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("CLAIMS_API_URL", "ftp://host")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CLAIMS_API_URL", "not a url")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PORT", "99999")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CLAIMS_SOURCE", "database")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("FIXTURE_DELAY_MS", "-5")])).is_err());
    }

    #[test]
    fn test_fixture_mode() {
        let config = Config::from_lookup(lookup_from(&[
            ("CLAIMS_SOURCE", "Fixture"),
            ("FIXTURE_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.source_mode, SourceMode::Fixture);
        assert_eq!(config.fixture_delay, Duration::ZERO);
    }
}
