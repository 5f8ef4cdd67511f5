use anyhow::{Context, Result};
use std::time::Duration;

/// Default number of log lines requested by the logs view
pub const DEFAULT_LOG_LINES: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    // Admin server
    pub base_url: String,

    // Session
    pub session_cookie: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    // HTTP
    pub http_timeout_secs: u64,

    // Logs view
    pub log_lines: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_base_url(None)
    }

    /// Like `from_env`, but an explicit URL wins over `ADMIN_PANEL_URL`
    pub fn from_env_with_base_url(base_url: Option<String>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => std::env::var("ADMIN_PANEL_URL").context("ADMIN_PANEL_URL not set")?,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),

            // Either a ready session cookie or credentials for /login
            session_cookie: non_empty_var("ADMIN_SESSION_COOKIE"),
            username: non_empty_var("ADMIN_USERNAME"),
            password: non_empty_var("ADMIN_PASSWORD"),

            // 0 falls back to the default
            http_timeout_secs: std::env::var("ADMIN_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(30),

            log_lines: std::env::var("ADMIN_LOG_LINES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_LINES),
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Credentials for the login form, if both halves are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
