//! Newsletter subscription tools
//!
//! Validates a sign-up, forwards it to the mailing-list provider when one is
//! configured, and keeps a local copy in development.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RunMode;
use crate::db::Database;
use crate::mailing_list::{MailingListClient, MailingListError};
use crate::models::Subscriber;

/// Subscription error types
#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Subscription failed: {0}")]
    Provider(#[from] MailingListError),
}

impl SubscribeError {
    /// HTTP status the web front end reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SubscribeError::InvalidEmail => 400,
            SubscribeError::Provider(_) => 500,
        }
    }
}

/// Incoming sign-up
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default = "default_source")]
    pub source: String,
    pub timestamp: Option<String>,
}

fn default_source() -> String {
    "website".to_string()
}

/// Response for a successful subscribe
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub status: u16,
    pub subscriber_id: String,
}

/// Response for a failed subscribe
#[derive(Debug, Serialize)]
pub struct SubscribeErrorResponse {
    pub error: String,
    pub status: u16,
}

impl From<&SubscribeError> for SubscribeErrorResponse {
    fn from(err: &SubscribeError) -> Self {
        let error = match err {
            SubscribeError::InvalidEmail => "Invalid email address",
            SubscribeError::Provider(_) => "Subscription failed",
        };
        Self {
            error: error.to_string(),
            status: err.status_code(),
        }
    }
}

/// Response for list_subscribers
#[derive(Debug, Serialize)]
pub struct ListSubscribersResponse {
    pub subscribers: Vec<Subscriber>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Check an address against `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

/// Collaborators a subscribe call may use
pub struct SubscribeContext<'a> {
    pub database: &'a Database,
    pub mailing_list: Option<&'a MailingListClient>,
    pub mode: RunMode,
}

/// Handle one sign-up
///
/// The address is checked exactly as given; surrounding whitespace makes it
/// invalid. Failing to write the local copy is logged and does not fail the
/// call.
pub async fn subscribe(
    ctx: &SubscribeContext<'_>,
    request: SubscribeRequest,
) -> Result<SubscribeResponse, SubscribeError> {
    let email = request.email.as_str();
    if !is_valid_email(email) {
        return Err(SubscribeError::InvalidEmail);
    }

    if let Some(client) = ctx.mailing_list {
        client.subscribe(email, &request.source).await?;
    }

    let timestamp = request
        .timestamp
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    let subscriber = Subscriber::new(email, request.source, timestamp);

    tracing::info!(
        id = %subscriber.id,
        source = %subscriber.source,
        timestamp = %subscriber.timestamp,
        "New subscriber"
    );

    if ctx.mode.keeps_local_log() {
        if let Err(e) = ctx.database.with_conn(|conn| subscriber.insert(conn)) {
            tracing::warn!("Could not save subscriber to local log: {}", e);
        }
    }

    Ok(SubscribeResponse {
        success: true,
        message: "Successfully subscribed!".to_string(),
        status: 200,
        subscriber_id: subscriber.id,
    })
}

/// List the local subscriber log
pub fn list_subscribers(db: &Database, limit: i64, offset: i64) -> Result<ListSubscribersResponse, String> {
    let limit = limit.clamp(1, 500);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let subscribers = Subscriber::list(&conn, limit, offset)
        .map_err(|e| format!("Failed to list subscribers: {}", e))?;
    let total = Subscriber::count(&conn).map_err(|e| format!("Failed to count subscribers: {}", e))?;

    Ok(ListSubscribersResponse {
        subscribers,
        total,
        limit,
        offset,
    })
}
