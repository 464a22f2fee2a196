//! Service configuration from environment variables.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_PACING_MS: u64 = 200;
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BULK_TIMEOUT_SECS: u64 = 15;

/// Settings for the external nutrition provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Spoonacular API key. `None` when unset or blank.
    pub api_key: Option<String>,
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Timeout for ingredient search and detail lookups.
    pub lookup_timeout: Duration,
    /// Timeout for the bulk ingredient-parse call.
    pub bulk_timeout: Duration,
    /// Pause between consecutive fallback lookups.
    pub pacing: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_SPOONACULAR_BASE_URL.into(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            bulk_timeout: Duration::from_secs(DEFAULT_BULK_TIMEOUT_SECS),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }
}

impl ProviderConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Top-level KitchenSense configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP server port.
    pub port: u16,
    pub provider: ProviderConfig,
}

impl ServiceConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable numeric values fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", &lookup, DEFAULT_PORT);

        let api_key = lookup("SPOONACULAR_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = lookup("SPOONACULAR_BASE_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_SPOONACULAR_BASE_URL.into());

        let pacing_ms = parse_or("NUTRITION_PACING_MS", &lookup, DEFAULT_PACING_MS);
        let lookup_secs = parse_or(
            "NUTRITION_LOOKUP_TIMEOUT_SECS",
            &lookup,
            DEFAULT_LOOKUP_TIMEOUT_SECS,
        );
        let bulk_secs = parse_or("NUTRITION_BULK_TIMEOUT_SECS", &lookup, DEFAULT_BULK_TIMEOUT_SECS);

        Self {
            port,
            provider: ProviderConfig {
                api_key,
                base_url,
                lookup_timeout: Duration::from_secs(lookup_secs),
                bulk_timeout: Duration::from_secs(bulk_secs),
                pacing: Duration::from_millis(pacing_ms),
            },
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: std::str::FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
