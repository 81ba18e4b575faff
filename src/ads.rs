//! Ad impression reporting.
//!
//! Impressions are fire-and-forget: the request runs on a detached thread
//! and its outcome is only logged.

use serde::Serialize;
use std::error::Error;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Context of one player interaction shown to the ad network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Impression {
    pub user_id: u64,
    pub message_id: u64,
    pub user_first_name: String,
    pub language_code: String,
    /// Whether the interaction is the player's first contact.
    pub start_place: bool,
}

impl Impression {
    pub fn new(user_id: u64, message_id: u64, first_name: impl Into<String>) -> Self {
        Self {
            user_id,
            message_id,
            user_first_name: first_name.into(),
            language_code: "ru".to_string(),
            start_place: false,
        }
    }
}

pub trait AdImpressions: Send + Sync {
    /// Reports an impression. Must not block the caller.
    fn record(&self, impression: Impression);
}

/// Posts impressions to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpAdClient {
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpAdClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Client for the configured endpoint, `None` when no key is set.
    pub fn from_config(config: &crate::config::ServiceConfig) -> Option<Self> {
        config
            .ad_api_key
            .as_ref()
            .map(|key| Self::new(config.ad_api_url.clone(), key.clone(), config.http_timeout))
    }

    fn send(&self, impression: &Impression) -> Result<(u16, String), Box<dyn Error>> {
        let response = ureq::post(&self.api_url)
            .timeout(self.timeout)
            .set("Authorization", &self.api_key)
            .send_json(impression)?;
        let status = response.status();
        let body = response.into_string()?;
        Ok((status, body))
    }
}

impl AdImpressions for HttpAdClient {
    fn record(&self, impression: Impression) {
        let client = self.clone();
        thread::spawn(move || match client.send(&impression) {
            Ok((status, body)) => info!(
                user = impression.user_id,
                start = impression.start_place,
                status,
                response = %body,
                "ad impression sent"
            ),
            Err(e) => warn!(user = impression.user_id, error = %e, "ad impression failed"),
        });
    }
}
