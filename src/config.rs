//! Runtime configuration
//!
//! Read once from environment variables at startup.

use std::path::PathBuf;

/// Deployment mode, controls the local subscriber log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Parse from string, `None` for anything unrecognised
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(RunMode::Development),
            "production" | "prod" => Some(RunMode::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }

    /// Only development keeps the local subscriber log
    pub fn keeps_local_log(&self) -> bool {
        *self == RunMode::Development
    }
}

/// Credentials for the external mailing-list provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailingListConfig {
    pub api_key: String,
    pub form_id: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub mode: RunMode,
    pub mailing_list: Option<MailingListConfig>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup("SERVINGS_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        // Unset means development; an unknown value gets production behaviour
        let mode = match lookup("SERVINGS_MODE") {
            None => RunMode::Development,
            Some(m) => RunMode::from_str(&m).unwrap_or_else(|| {
                tracing::warn!("Unrecognised SERVINGS_MODE '{}', using production", m);
                RunMode::Production
            }),
        };

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mailing_list = match (non_empty("CONVERTKIT_API_KEY"), non_empty("CONVERTKIT_FORM_ID")) {
            (Some(api_key), Some(form_id)) => Some(MailingListConfig { api_key, form_id }),
            _ => None,
        };

        Self {
            database_path,
            mode,
            mailing_list,
        }
    }
}

/// `<project root>/data/servings.db`, resolved from the executable location
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("servings.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.mode, RunMode::Development);
        assert!(cfg.mailing_list.is_none());
        assert!(cfg.database_path.ends_with("data/servings.db"));
    }

    #[test]
    fn test_explicit_values() {
        let cfg = config(&[
            ("SERVINGS_DATABASE_PATH", "/tmp/s.db"),
            ("SERVINGS_MODE", "Production"),
            ("CONVERTKIT_API_KEY", "key"),
            ("CONVERTKIT_FORM_ID", "123"),
        ]);
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/s.db"));
        assert_eq!(cfg.mode, RunMode::Production);
        assert_eq!(
            cfg.mailing_list,
            Some(MailingListConfig {
                api_key: "key".to_string(),
                form_id: "123".to_string(),
            })
        );
    }

    #[test]
    fn test_only_development_keeps_local_log() {
        assert!(config(&[]).mode.keeps_local_log());
        assert!(config(&[("SERVINGS_MODE", "development")]).mode.keeps_local_log());
        assert!(config(&[("SERVINGS_MODE", " Dev ")]).mode.keeps_local_log());

        for other in ["production", "staging", "test", ""] {
            let cfg = config(&[("SERVINGS_MODE", other)]);
            assert_eq!(cfg.mode, RunMode::Production, "{:?}", other);
            assert!(!cfg.mode.keeps_local_log(), "{:?}", other);
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(RunMode::from_str("PROD"), Some(RunMode::Production));
        assert_eq!(RunMode::from_str("development"), Some(RunMode::Development));
        assert_eq!(RunMode::from_str("staging"), None);
        assert_eq!(RunMode::Production.as_str(), "production");
    }

    #[test]
    fn test_mailing_list_needs_both_values() {
        let cfg = config(&[("CONVERTKIT_API_KEY", "key"), ("CONVERTKIT_FORM_ID", " ")]);
        assert!(cfg.mailing_list.is_none());
    }
}
