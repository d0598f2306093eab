//! Mailing-list provider client
//!
//! Forwards confirmed sign-ups to the external newsletter form.

use serde::Serialize;
use thiserror::Error;

use crate::config::MailingListConfig;

const DEFAULT_BASE_URL: &str = "https://api.convertkit.com/v3";

/// Mailing-list error types
#[derive(Debug, Error)]
pub enum MailingListError {
    #[error("Mailing-list request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mailing-list provider returned status {0}")]
    Status(u16),
}

#[derive(Debug, Serialize)]
struct SubscribeRequest<'a> {
    api_key: &'a str,
    email: &'a str,
    tags: Vec<String>,
}

/// Tags attached to every sign-up
pub fn subscription_tags(source: &str) -> Vec<String> {
    vec![format!("calories-landing-{}", source), "early-access".to_string()]
}

/// Client for the form subscribe endpoint
#[derive(Clone)]
pub struct MailingListClient {
    http: reqwest::Client,
    base_url: String,
    config: MailingListConfig,
}

impl MailingListClient {
    pub fn new(config: MailingListConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(config: MailingListConfig, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        }
    }

    /// Subscribe endpoint for the configured form
    pub fn subscribe_url(&self) -> String {
        format!(
            "{}/forms/{}/subscribe",
            self.base_url.trim_end_matches('/'),
            self.config.form_id
        )
    }

    /// Add an email to the form, tagged with its sign-up source
    pub async fn subscribe(&self, email: &str, source: &str) -> Result<(), MailingListError> {
        let body = SubscribeRequest {
            api_key: &self.config.api_key,
            email,
            tags: subscription_tags(source),
        };

        let response = self.http.post(self.subscribe_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailingListError::Status(status.as_u16()));
        }

        tracing::debug!(source, "Forwarded subscriber to mailing list");
        Ok(())
    }
}
