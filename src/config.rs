//! Service configuration read from the environment.
//!
//! Game balance is compiled in (`core::constants`); only deployment
//! details live here.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CRYPTO_PAY_API_URL: &str = "https://pay.crypt.bot/api";
pub const DEFAULT_AD_API_URL: &str = "https://hiviews.net/sendMessage";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Snapshot directory. `None` means the platform default.
    pub data_dir: Option<PathBuf>,
    /// Payment API token. Payments are disabled without one.
    pub crypto_pay_token: Option<String>,
    pub crypto_pay_api_url: String,
    /// Ad impression API key. Impressions are disabled without one.
    pub ad_api_key: Option<String>,
    pub ad_api_url: String,
    pub http_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            crypto_pay_token: None,
            crypto_pay_api_url: DEFAULT_CRYPTO_PAY_API_URL.to_string(),
            ad_api_key: None,
            ad_api_url: DEFAULT_AD_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Loads an optional `.env` file, then reads the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let http_timeout = match get("DM_HTTP_TIMEOUT_SECS").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!("DM_HTTP_TIMEOUT_SECS is not a positive integer, using default");
                defaults.http_timeout
            }
            None => defaults.http_timeout,
        };

        Self {
            data_dir: get("DM_DATA_DIR").map(PathBuf::from),
            crypto_pay_token: get("CRYPTO_PAY_TOKEN"),
            crypto_pay_api_url: get("CRYPTO_PAY_API_URL").unwrap_or(defaults.crypto_pay_api_url),
            ad_api_key: get("AD_API_KEY"),
            ad_api_url: get("AD_API_URL").unwrap_or(defaults.ad_api_url),
            http_timeout,
        }
    }

    pub fn payments_enabled(&self) -> bool {
        self.crypto_pay_token.is_some()
    }

    pub fn ads_enabled(&self) -> bool {
        self.ad_api_key.is_some()
    }
}
